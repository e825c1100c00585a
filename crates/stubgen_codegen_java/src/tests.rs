use crate::{plan_units, RenderError, StubGenConfig, StubRenderer};
use pretty_assertions::assert_eq;
use stubgen_api::{
    ConstantValue, DocComment, Member, Modifiers, Nullability, PackageDecl, Parameter,
    PrimitiveType, Span, TypeDecl, TypeKind, TypeRef,
};

fn field(
    name: &str,
    type_ref: TypeRef,
    constant: Option<ConstantValue>,
    modifiers: Modifiers,
) -> Member {
    Member::Field {
        modifiers,
        type_ref,
        nullability: Nullability::Unspecified,
        name: name.to_string(),
        constant,
        doc: None,
        span: Span::dummy(),
    }
}

fn method(name: &str, return_type: TypeRef) -> Member {
    Member::Method {
        modifiers: Modifiers::public(),
        type_params: Vec::new(),
        return_type,
        return_nullability: Nullability::Unspecified,
        name: name.to_string(),
        parameters: Vec::new(),
        throws: Vec::new(),
        annotation_default: None,
        doc: None,
        span: Span::dummy(),
    }
}

fn render_single(package_name: &str, decl: TypeDecl) -> String {
    let mut package = PackageDecl::new(package_name);
    package.types.push(decl);
    let (plans, errors) = plan_units(&package);
    assert!(errors.is_empty());
    let mut renderer = StubRenderer::new();
    renderer
        .render_unit(&package, &plans[0])
        .expect("unit renders")
        .source
}

#[test]
fn executable_members_always_throw() {
    let mut decl = TypeDecl::new(TypeKind::Class, "NfcManager");
    decl.modifiers.is_final = true;
    decl.members.push(Member::Constructor {
        modifiers: Modifiers::public(),
        parameters: Vec::new(),
        throws: Vec::new(),
        doc: None,
        span: Span::dummy(),
    });
    decl.members
        .push(method("getDefaultAdapter", TypeRef::named("android.nfc.NfcAdapter")));

    let source = render_single("android.nfc", decl);
    assert!(source.contains("public NfcManager() { throw new RuntimeException(\"Stub!\"); }"));
    assert!(source
        .contains("public NfcAdapter getDefaultAdapter() { throw new RuntimeException(\"Stub!\"); }"));
    // No executable member escapes the stub body.
    assert_eq!(source.matches("throw new RuntimeException(\"Stub!\");").count(), 2);
}

#[test]
fn string_constants_keep_their_literals() {
    let mut decl = TypeDecl::new(TypeKind::Interface, "BaseColumns");
    decl.members.push(field(
        "_COUNT",
        TypeRef::named("String"),
        Some(ConstantValue::String("_count".to_string())),
        Modifiers::public_static_final(),
    ));
    decl.members.push(field(
        "_ID",
        TypeRef::named("String"),
        Some(ConstantValue::String("_id".to_string())),
        Modifiers::public_static_final(),
    ));

    let source = render_single("android.provider", decl);
    assert!(source.contains("public static final String _COUNT = \"_count\";"));
    assert!(source.contains("public static final String _ID = \"_id\";"));
}

#[test]
fn runtime_final_field_gets_null_sentinel() {
    let mut decl = TypeDecl::new(TypeKind::Class, "Intent");
    decl.members.push(field(
        "CREATOR",
        TypeRef::generic(
            "android.os.Parcelable.Creator",
            vec![TypeRef::named("Intent")],
        ),
        None,
        Modifiers::public_static_final(),
    ));

    let source = render_single("android.content", decl);
    assert!(source.contains("public static final Parcelable.Creator<Intent> CREATOR = null;"));
    assert!(source.contains("import android.os.Parcelable;"));
}

#[test]
fn runtime_final_primitive_field_gets_default_literal() {
    let mut decl = TypeDecl::new(TypeKind::Class, "Build");
    decl.members.push(field(
        "SDK_INT",
        TypeRef::Primitive(PrimitiveType::Int),
        None,
        Modifiers::public_static_final(),
    ));

    let source = render_single("android.os", decl);
    assert!(source.contains("public static final int SDK_INT = 0;"));
}

#[test]
fn non_final_field_has_no_initializer() {
    let mut decl = TypeDecl::new(TypeKind::Class, "Point");
    decl.members.push(field(
        "x",
        TypeRef::Primitive(PrimitiveType::Int),
        None,
        Modifiers::public(),
    ));

    let source = render_single("android.graphics", decl);
    assert!(source.contains("public int x;"));
    assert!(!source.contains("x ="));
}

#[test]
fn char_and_string_literals_are_escaped() {
    let mut decl = TypeDecl::new(TypeKind::Class, "Chars");
    decl.members.push(field(
        "SEP",
        TypeRef::Primitive(PrimitiveType::Char),
        Some(ConstantValue::Char('\'')),
        Modifiers::public_static_final(),
    ));
    decl.members.push(field(
        "NL",
        TypeRef::named("String"),
        Some(ConstantValue::String("line\n\"quoted\"".to_string())),
        Modifiers::public_static_final(),
    ));

    let source = render_single("android.text", decl);
    assert!(source.contains("public static final char SEP = '\\'';"));
    assert!(source.contains("public static final String NL = \"line\\n\\\"quoted\\\"\";"));
}

#[test]
fn constant_literal_must_fit_field_type() {
    let mut decl = TypeDecl::new(TypeKind::Class, "Broken");
    decl.members.push(field(
        "FLAG",
        TypeRef::Primitive(PrimitiveType::Int),
        Some(ConstantValue::String("oops".to_string())),
        Modifiers::public_static_final(),
    ));

    let mut package = PackageDecl::new("android.util");
    package.types.push(decl);
    let (plans, _) = plan_units(&package);
    let mut renderer = StubRenderer::new();
    let error = renderer
        .render_unit(&package, &plans[0])
        .expect_err("must abort the unit");
    assert!(matches!(error, RenderError::ConstantError { .. }));
}

#[test]
fn abstract_and_interface_methods_render_bodiless() {
    let mut class_decl = TypeDecl::new(TypeKind::Class, "Service");
    class_decl.modifiers.is_abstract = true;
    let mut on_bind = method("onBind", TypeRef::Void);
    if let Member::Method { modifiers, .. } = &mut on_bind {
        modifiers.is_abstract = true;
    }
    class_decl.members.push(on_bind);

    let source = render_single("android.app", class_decl);
    assert!(source.contains("public abstract void onBind();"));
    assert!(!source.contains("onBind() {"));

    let mut interface_decl = TypeDecl::new(TypeKind::Interface, "Observer");
    interface_decl.members.push(method("onChanged", TypeRef::Void));
    let source = render_single("android.database", interface_decl);
    assert!(source.contains("public void onChanged();"));
}

#[test]
fn interface_default_method_throws() {
    let mut decl = TypeDecl::new(TypeKind::Interface, "Callback");
    let mut member = method("onDone", TypeRef::Void);
    if let Member::Method { modifiers, .. } = &mut member {
        modifiers.is_default = true;
    }
    decl.members.push(member);

    let source = render_single("android.os", decl);
    assert!(source.contains("public default void onDone() { throw new RuntimeException(\"Stub!\"); }"));
}

#[test]
fn native_modifier_never_reaches_the_stub() {
    let mut decl = TypeDecl::new(TypeKind::Class, "Binder");
    let mut member = method("flushPendingCommands", TypeRef::Void);
    if let Member::Method { modifiers, .. } = &mut member {
        modifiers.is_native = true;
        modifiers.is_static = true;
    }
    decl.members.push(member);

    let source = render_single("android.os", decl);
    assert!(!source.contains("native"));
    assert!(source.contains(
        "public static void flushPendingCommands() { throw new RuntimeException(\"Stub!\"); }"
    ));
}

#[test]
fn enum_constants_precede_members() {
    let mut decl = TypeDecl::new(TypeKind::Enum, "Mode");
    decl.members.push(Member::EnumConstant {
        name: "CLEAR".to_string(),
        doc: None,
        span: Span::dummy(),
    });
    decl.members.push(Member::EnumConstant {
        name: "SRC_OVER".to_string(),
        doc: None,
        span: Span::dummy(),
    });
    decl.members.push(method("nativeInt", TypeRef::Primitive(PrimitiveType::Int)));

    let source = render_single("android.graphics", decl);
    let clear = source.find("CLEAR,").expect("first constant");
    let src_over = source.find("SRC_OVER;").expect("last constant ends the run");
    let native_int = source.find("nativeInt").expect("method");
    assert!(clear < src_over && src_over < native_int);
}

#[test]
fn annotation_elements_render_with_defaults() {
    let mut decl = TypeDecl::new(TypeKind::Annotation, "TargetApi");
    let mut member = method("value", TypeRef::Primitive(PrimitiveType::Int));
    if let Member::Method {
        annotation_default, ..
    } = &mut member
    {
        *annotation_default = Some(ConstantValue::Int(1));
    }
    decl.members.push(member);

    let source = render_single("android.annotation", decl);
    assert!(source.contains("public @interface TargetApi {"));
    assert!(source.contains("public int value() default 1;"));
    assert!(!source.contains("Stub!"));
}

#[test]
fn constructor_on_interface_aborts_unit() {
    let mut decl = TypeDecl::new(TypeKind::Interface, "Broken");
    decl.members.push(Member::Constructor {
        modifiers: Modifiers::public(),
        parameters: Vec::new(),
        throws: Vec::new(),
        doc: None,
        span: Span::dummy(),
    });

    let mut package = PackageDecl::new("android.util");
    package.types.push(decl);
    let (plans, _) = plan_units(&package);
    let mut renderer = StubRenderer::new();
    let error = renderer
        .render_unit(&package, &plans[0])
        .expect_err("must abort the unit");
    assert!(matches!(error, RenderError::UnsupportedConstruct { .. }));
}

#[test]
fn varargs_parameter_renders_with_ellipsis() {
    let mut decl = TypeDecl::new(TypeKind::Class, "Log");
    let mut member = method("println", TypeRef::Void);
    if let Member::Method { parameters, .. } = &mut member {
        let mut parameter = Parameter::new("args", TypeRef::array(TypeRef::named("Object")));
        parameter.is_varargs = true;
        parameters.push(parameter);
    }
    decl.members.push(member);

    let source = render_single("android.util", decl);
    assert!(source.contains("public void println(Object... args)"));
}

#[test]
fn javadoc_and_api_since_are_emitted_verbatim() {
    let mut decl = TypeDecl::new(TypeKind::Interface, "BaseColumns");
    decl.doc = Some(DocComment::from_text(
        "Commonly used column names.\n@apiSince 1",
    ));
    let source = render_single("android.provider", decl);
    assert!(source.contains("/**\n * Commonly used column names.\n * @apiSince 1\n */"));
}

#[test]
fn doc_comments_can_be_disabled() {
    let mut decl = TypeDecl::new(TypeKind::Interface, "BaseColumns");
    decl.doc = Some(DocComment::from_text("Docs.\n@apiSince 1"));
    let mut package = PackageDecl::new("android.provider");
    package.types.push(decl);
    let (plans, _) = plan_units(&package);

    let mut renderer = StubRenderer::with_config(StubGenConfig {
        emit_doc_comments: false,
        ..StubGenConfig::default()
    });
    let source = renderer
        .render_unit(&package, &plans[0])
        .expect("unit renders")
        .source;
    assert!(!source.contains("/**"));
    assert!(!source.contains("@apiSince"));
}

#[test]
fn imports_are_first_claim_wins_and_sorted() {
    let mut decl = TypeDecl::new(TypeKind::Class, "Loader");
    decl.members.push(method("peek", TypeRef::named("android.content.Intent")));
    decl.members.push(method("steal", TypeRef::named("com.example.Intent")));
    decl.members.push(method("uri", TypeRef::named("android.net.Uri")));

    let source = render_single("android.app", decl);
    assert!(source.contains("import android.content.Intent;"));
    assert!(source.contains("import android.net.Uri;"));
    assert!(!source.contains("import com.example.Intent;"));
    assert!(source.contains("public Intent peek()"));
    assert!(source.contains("public com.example.Intent steal()"));

    let content = source.find("import android.content.Intent;").expect("first import");
    let net = source.find("import android.net.Uri;").expect("second import");
    assert!(content < net);
}

#[test]
fn java_lang_and_same_package_types_never_import() {
    let mut decl = TypeDecl::new(TypeKind::Class, "NfcEvent");
    decl.members.push(method("name", TypeRef::named("java.lang.String")));
    decl.members.push(method("adapter", TypeRef::named("android.nfc.NfcAdapter")));

    let source = render_single("android.nfc", decl);
    assert!(!source.contains("import"));
    assert!(source.contains("public String name()"));
    assert!(source.contains("public NfcAdapter adapter()"));
}

#[test]
fn nested_types_render_inside_their_outer_unit() {
    let mut outer = TypeDecl::new(TypeKind::Interface, "Parcelable");
    outer.members.push(method("describeContents", TypeRef::Primitive(PrimitiveType::Int)));
    let mut nested = TypeDecl::new(TypeKind::Interface, "Parcelable.Creator");
    nested.modifiers.is_static = true;
    nested.type_params.push(stubgen_api::TypeParam::new("T"));
    nested.members.push(method("createFromParcel", TypeRef::named("T")));

    let mut package = PackageDecl::new("android.os");
    package.types.push(outer);
    package.types.push(nested);
    let (plans, errors) = plan_units(&package);
    assert!(errors.is_empty());
    assert_eq!(plans.len(), 1);

    let mut renderer = StubRenderer::new();
    let unit = renderer.render_unit(&package, &plans[0]).expect("renders");
    assert_eq!(unit.file_name, "Parcelable.java");
    assert!(unit.source.contains("public interface Parcelable {"));
    assert!(unit.source.contains("public static interface Creator<T> {"));
}

#[test]
fn nested_type_without_outer_is_reported() {
    let mut package = PackageDecl::new("android.os");
    package
        .types
        .push(TypeDecl::new(TypeKind::Interface, "Parcelable.Creator"));

    let (plans, errors) = plan_units(&package);
    assert!(plans.is_empty());
    assert!(matches!(errors[0], RenderError::MissingOuterType { .. }));
}

#[test]
fn package_info_unit_carries_package_doc() {
    let mut package = PackageDecl::new("android.provider");
    package.doc = Some(DocComment::from_text("Content provider contracts."));

    let mut renderer = StubRenderer::new();
    let unit = renderer.render_package_info(&package).expect("package-info");
    assert_eq!(unit.file_name, "package-info.java");
    assert!(unit.source.starts_with("/**\n * Content provider contracts.\n */\npackage android.provider;"));
}

#[test]
fn undocumented_package_yields_no_package_info() {
    let package = PackageDecl::new("android.provider");
    let mut renderer = StubRenderer::new();
    assert!(renderer.render_package_info(&package).is_none());
}

#[test]
fn license_header_prefixes_every_unit() {
    let mut decl = TypeDecl::new(TypeKind::Class, "NfcManager");
    decl.members.push(method("hash", TypeRef::Primitive(PrimitiveType::Int)));
    let mut package = PackageDecl::new("android.nfc");
    package.types.push(decl);
    let (plans, _) = plan_units(&package);

    let header = "/*\n * Copyright (C) 2008 The Android Open Source Project\n */";
    let mut renderer = StubRenderer::with_config(StubGenConfig {
        license_header: Some(header.to_string()),
        ..StubGenConfig::default()
    });
    let source = renderer
        .render_unit(&package, &plans[0])
        .expect("renders")
        .source;
    assert!(source.starts_with("/*\n * Copyright (C) 2008 The Android Open Source Project\n */\n"));
}

#[test]
fn rendering_is_deterministic() {
    let mut decl = TypeDecl::new(TypeKind::Class, "Loader");
    decl.members.push(method("uri", TypeRef::named("android.net.Uri")));
    decl.members.push(method("peek", TypeRef::named("android.content.Intent")));
    let mut package = PackageDecl::new("android.app");
    package.types.push(decl);
    let (plans, _) = plan_units(&package);

    let mut first_renderer = StubRenderer::new();
    let first = first_renderer.render_unit(&package, &plans[0]).expect("renders");
    let mut second_renderer = StubRenderer::new();
    let second = second_renderer.render_unit(&package, &plans[0]).expect("renders");
    assert_eq!(first.source, second.source);
}
