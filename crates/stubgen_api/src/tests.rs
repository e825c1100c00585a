use crate::*;
use pretty_assertions::assert_eq;

fn string_type() -> TypeRef {
    TypeRef::named("String")
}

#[test]
fn doc_comment_extracts_api_since() {
    let doc = DocComment::from_text("Commonly used column names.\n@apiSince 1");
    assert_eq!(doc.api_since, Some(ApiLevel(1)));
    assert_eq!(doc.deprecated_since, None);
    assert_eq!(doc.lines.len(), 2);
}

#[test]
fn doc_comment_extracts_deprecated_since() {
    let doc = DocComment::from_text("@deprecatedSince 29\n@apiSince 5");
    assert_eq!(doc.api_since, Some(ApiLevel(5)));
    assert_eq!(doc.deprecated_since, Some(ApiLevel(29)));
}

#[test]
fn canonical_rendering_covers_generics_arrays_and_wildcards() {
    let list_of_arrays = TypeRef::generic(
        "java.util.List",
        vec![TypeRef::Wildcard(WildcardBound::Extends(Box::new(
            TypeRef::Array {
                element: Box::new(TypeRef::Primitive(PrimitiveType::Int)),
                dimensions: 2,
            },
        )))],
    );
    assert_eq!(list_of_arrays.canonical(), "java.util.List<? extends int[][]>");
}

#[test]
fn string_constant_fits_string_field_only() {
    let constant = ConstantValue::String("_id".to_string());
    assert!(constant.fits(&string_type()));
    assert!(constant.fits(&TypeRef::named("java.lang.String")));
    assert!(!constant.fits(&TypeRef::Primitive(PrimitiveType::Int)));
}

#[test]
fn null_constant_requires_reference_type() {
    assert!(ConstantValue::Null.fits(&TypeRef::named("android.os.Parcelable")));
    assert!(!ConstantValue::Null.fits(&TypeRef::Primitive(PrimitiveType::Boolean)));
}

#[test]
fn merge_unions_packages_and_keeps_first_doc() {
    let mut base = ApiSurface::new();
    let mut package = PackageDecl::new("android.provider");
    package.doc = Some(DocComment::from_text("Provider contracts."));
    package.types.push(TypeDecl::new(TypeKind::Interface, "BaseColumns"));
    base.packages.push(package);

    let mut incoming = ApiSurface::new();
    let mut other = PackageDecl::new("android.provider");
    other.doc = Some(DocComment::from_text("Shadowed."));
    other.types.push(TypeDecl::new(TypeKind::Class, "Settings"));
    incoming.packages.push(other);

    base.merge(incoming);

    assert_eq!(base.packages.len(), 1);
    assert_eq!(base.packages[0].types.len(), 2);
    assert_eq!(
        base.packages[0].doc.as_ref().map(|doc| doc.lines[0].as_str()),
        Some("Provider contracts.")
    );
}

#[test]
fn sort_canonical_orders_packages_and_types() {
    let mut surface = ApiSurface::new();
    surface
        .package_mut("android.nfc")
        .types
        .push(TypeDecl::new(TypeKind::Class, "NfcManager"));
    surface
        .package_mut("android.nfc")
        .types
        .push(TypeDecl::new(TypeKind::Class, "NfcAdapter"));
    surface
        .package_mut("android.content")
        .types
        .push(TypeDecl::new(TypeKind::Class, "Intent"));

    surface.sort_canonical();

    assert_eq!(surface.packages[0].name, "android.content");
    assert_eq!(surface.packages[1].types[0].name, "NfcAdapter");
}

#[test]
fn validate_flags_duplicate_types() {
    let mut surface = ApiSurface::new();
    let package = surface.package_mut("android.provider");
    package.types.push(TypeDecl::new(TypeKind::Interface, "BaseColumns"));
    package.types.push(TypeDecl::new(TypeKind::Interface, "BaseColumns"));

    let issues = validate(&surface);
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].code, DUPLICATE_TYPE);
}

#[test]
fn validate_flags_constant_mismatch() {
    let mut decl = TypeDecl::new(TypeKind::Interface, "BaseColumns");
    decl.members.push(Member::Field {
        modifiers: Modifiers::public_static_final(),
        type_ref: TypeRef::Primitive(PrimitiveType::Int),
        nullability: Nullability::Unspecified,
        name: "_ID".to_string(),
        constant: Some(ConstantValue::String("_id".to_string())),
        doc: None,
        span: Span::dummy(),
    });
    let mut surface = ApiSurface::new();
    surface.package_mut("android.provider").types.push(decl);

    let issues = validate(&surface);
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].code, CONSTANT_TYPE_MISMATCH);
}

#[test]
fn validate_rejects_interface_constructor() {
    let mut decl = TypeDecl::new(TypeKind::Interface, "BaseColumns");
    decl.members.push(Member::Constructor {
        modifiers: Modifiers::public(),
        parameters: Vec::new(),
        throws: Vec::new(),
        doc: None,
        span: Span::dummy(),
    });
    let mut surface = ApiSurface::new();
    surface.package_mut("android.provider").types.push(decl);

    let issues = validate(&surface);
    assert_eq!(issues[0].code, CONSTRUCTOR_NOT_ALLOWED);
}

#[test]
fn validate_rejects_varargs_in_non_final_position() {
    let mut decl = TypeDecl::new(TypeKind::Class, "Formatter");
    let mut first = Parameter::new("args", TypeRef::array(string_type()));
    first.is_varargs = true;
    decl.members.push(Member::Method {
        modifiers: Modifiers::public(),
        type_params: Vec::new(),
        return_type: TypeRef::Void,
        return_nullability: Nullability::Unspecified,
        name: "format".to_string(),
        parameters: vec![first, Parameter::new("locale", TypeRef::named("java.util.Locale"))],
        throws: Vec::new(),
        annotation_default: None,
        doc: None,
        span: Span::dummy(),
    });
    let mut surface = ApiSurface::new();
    surface.package_mut("android.util").types.push(decl);

    let issues = validate(&surface);
    assert_eq!(issues[0].code, VARARGS_NOT_LAST);
}

#[test]
fn duplicate_member_detection_uses_erased_parameter_list() {
    let mut decl = TypeDecl::new(TypeKind::Class, "NfcManager");
    for _ in 0..2 {
        decl.members.push(Member::Method {
            modifiers: Modifiers::public(),
            type_params: Vec::new(),
            return_type: TypeRef::named("android.nfc.NfcAdapter"),
            return_nullability: Nullability::Nullable,
            name: "getDefaultAdapter".to_string(),
            parameters: Vec::new(),
            throws: Vec::new(),
            annotation_default: None,
            doc: None,
            span: Span::dummy(),
        });
    }
    let mut surface = ApiSurface::new();
    surface.package_mut("android.nfc").types.push(decl);

    let issues = validate(&surface);
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].code, DUPLICATE_MEMBER);
}
