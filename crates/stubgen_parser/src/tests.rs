use crate::lexer::{Lexer, TokenType};
use crate::parser::{parse_surface, ParseError};
use pretty_assertions::assert_eq;
use stubgen_api::{
    ApiLevel, ConstantValue, Member, Nullability, PrimitiveType, TypeKind, TypeRef, Visibility,
};

const BASE_COLUMNS: &str = r#"
// Signature format: 2.0
package android.provider {

  /**
   * Commonly used column names.
   * @apiSince 1
   */
  public interface BaseColumns {
    /** @apiSince 1 */
    field public static final String _COUNT = "_count";
    /** @apiSince 1 */
    field public static final String _ID = "_id";
  }

}
"#;

#[test]
fn lexes_member_keywords_and_literals() {
    let tokens = Lexer::new("field public static final String _ID = \"_id\";")
        .tokenize()
        .expect("lexes");
    let types: Vec<&TokenType> = tokens.iter().map(|token| &token.token_type).collect();
    assert!(matches!(types[0], TokenType::Field));
    assert!(matches!(types[1], TokenType::Public));
    assert!(matches!(types[4], TokenType::Identifier(name) if name == "String"));
    assert!(matches!(types[6], TokenType::Assign));
    assert!(matches!(types[7], TokenType::String(value) if value == "_id"));
}

#[test]
fn lexer_reports_line_and_column() {
    let tokens = Lexer::new("package a {\n}\n").tokenize().expect("lexes");
    let closing = tokens
        .iter()
        .find(|token| token.token_type == TokenType::RightBrace)
        .expect("right brace token");
    assert_eq!(closing.line, 2);
    assert_eq!(closing.column, 1);
}

#[test]
fn doc_blocks_are_captured_with_gutters_stripped() {
    let tokens = Lexer::new("/**\n * Hello.\n * @apiSince 9\n */")
        .tokenize()
        .expect("lexes");
    match &tokens[0].token_type {
        TokenType::DocComment(text) => assert_eq!(text, "Hello.\n@apiSince 9"),
        other => panic!("expected doc comment, got {:?}", other),
    }
}

#[test]
fn parses_base_columns_surface() {
    let surface = parse_surface(BASE_COLUMNS).expect("parses");
    assert_eq!(surface.packages.len(), 1);
    let package = &surface.packages[0];
    assert_eq!(package.name, "android.provider");

    let decl = &package.types[0];
    assert_eq!(decl.kind, TypeKind::Interface);
    assert_eq!(decl.name, "BaseColumns");
    assert_eq!(
        decl.doc.as_ref().and_then(|doc| doc.api_since),
        Some(ApiLevel(1))
    );

    assert_eq!(decl.members.len(), 2);
    match &decl.members[1] {
        Member::Field { name, constant, .. } => {
            assert_eq!(name, "_ID");
            assert_eq!(constant, &Some(ConstantValue::String("_id".to_string())));
        }
        other => panic!("expected field, got {:?}", other),
    }
}

#[test]
fn parses_methods_with_nullability_and_throws() {
    let input = r#"
package android.nfc {
  public final class NfcManager {
    ctor public NfcManager();
    method @Nullable public android.nfc.NfcAdapter getDefaultAdapter();
    method public void dispatch(@NonNull android.content.Intent intent) throws java.io.IOException;
  }
}
"#;
    let surface = parse_surface(input).expect("parses");
    let decl = &surface.packages[0].types[0];
    assert!(decl.modifiers.is_final);
    assert_eq!(decl.modifiers.visibility, Visibility::Public);

    match &decl.members[0] {
        Member::Constructor { parameters, .. } => assert!(parameters.is_empty()),
        other => panic!("expected ctor, got {:?}", other),
    }
    match &decl.members[1] {
        Member::Method {
            name,
            return_nullability,
            return_type,
            ..
        } => {
            assert_eq!(name, "getDefaultAdapter");
            assert_eq!(*return_nullability, Nullability::Nullable);
            assert_eq!(return_type, &TypeRef::named("android.nfc.NfcAdapter"));
        }
        other => panic!("expected method, got {:?}", other),
    }
    match &decl.members[2] {
        Member::Method {
            parameters, throws, ..
        } => {
            assert_eq!(parameters[0].nullability, Nullability::NonNull);
            assert_eq!(parameters[0].name, "intent");
            assert_eq!(throws[0], TypeRef::named("java.io.IOException"));
        }
        other => panic!("expected method, got {:?}", other),
    }
}

#[test]
fn parses_generics_varargs_and_arrays() {
    let input = r#"
package android.util {
  public class ArrayMap<K, V> {
    method public java.util.List<? extends V> values();
    method public void putAll(K[] keys, V... values);
  }
}
"#;
    let surface = parse_surface(input).expect("parses");
    let decl = &surface.packages[0].types[0];
    assert_eq!(decl.type_params.len(), 2);

    match &decl.members[1] {
        Member::Method { parameters, .. } => {
            assert_eq!(
                parameters[0].type_ref,
                TypeRef::Array {
                    element: Box::new(TypeRef::named("K")),
                    dimensions: 1,
                }
            );
            assert!(parameters[1].is_varargs);
        }
        other => panic!("expected method, got {:?}", other),
    }
}

#[test]
fn parses_enum_and_annotation_types() {
    let input = r#"
package android.graphics {
  public enum PorterDuffMode {
    enum_constant public static final android.graphics.PorterDuffMode CLEAR;
    enum_constant public static final android.graphics.PorterDuffMode SRC_OVER;
    method public int nativeInt();
  }
  public @interface TargetApi {
    method public abstract int value() default 1;
  }
}
"#;
    let surface = parse_surface(input).expect("parses");
    let enum_decl = &surface.packages[0].types[0];
    assert_eq!(enum_decl.kind, TypeKind::Enum);
    assert_eq!(
        enum_decl
            .members
            .iter()
            .filter(|member| matches!(member, Member::EnumConstant { .. }))
            .count(),
        2
    );
    match &enum_decl.members[0] {
        Member::EnumConstant { name, .. } => assert_eq!(name, "CLEAR"),
        other => panic!("expected enum constant, got {:?}", other),
    }

    let annotation = &surface.packages[0].types[1];
    assert_eq!(annotation.kind, TypeKind::Annotation);
    match &annotation.members[0] {
        Member::Method {
            annotation_default, ..
        } => assert_eq!(annotation_default, &Some(ConstantValue::Int(1))),
        other => panic!("expected annotation element, got {:?}", other),
    }
}

#[test]
fn parses_numeric_constant_spellings() {
    let input = r#"
package android.os {
  public class Build {
    field public static final int SDK_INT = 34;
    field public static final long SERIAL = 0x7fffffffL;
    field public static final float GRAVITY = 9.80665f;
    field public static final int MIN = -2147483648;
  }
}
"#;
    let surface = parse_surface(input).expect("parses");
    let members = &surface.packages[0].types[0].members;

    let constants: Vec<&ConstantValue> = members
        .iter()
        .filter_map(|member| match member {
            Member::Field {
                constant: Some(constant),
                ..
            } => Some(constant),
            _ => None,
        })
        .collect();

    assert_eq!(constants[0], &ConstantValue::Int(34));
    assert_eq!(constants[1], &ConstantValue::Long(0x7fffffff));
    assert_eq!(constants[2], &ConstantValue::Float("9.80665f".to_string()));
    assert_eq!(constants[3], &ConstantValue::Int(-2147483648));
}

#[test]
fn hex_constants_ending_in_float_digits_stay_integers() {
    let input = r#"
package android.view {
  public class Flags {
    field public static final int MASK = 0x1f;
    field public static final int FILL = 0xd;
  }
}
"#;
    let surface = parse_surface(input).expect("parses");
    let members = &surface.packages[0].types[0].members;
    match (&members[0], &members[1]) {
        (
            Member::Field {
                constant: Some(first),
                ..
            },
            Member::Field {
                constant: Some(second),
                ..
            },
        ) => {
            assert_eq!(first, &ConstantValue::Int(0x1f));
            assert_eq!(second, &ConstantValue::Int(0xd));
        }
        other => panic!("expected two constant fields, got {:?}", other),
    }
}

#[test]
fn interface_extends_list_lands_in_implements() {
    let input = r#"
package android.view {
  public interface ViewParent extends android.view.ViewManager, android.view.Observable {
  }
}
"#;
    let surface = parse_surface(input).expect("parses");
    let decl = &surface.packages[0].types[0];
    assert!(decl.extends.is_none());
    assert_eq!(decl.implements.len(), 2);
}

#[test]
fn same_package_across_files_merges_on_parse() {
    let input = r#"
package android.nfc {
  public class NfcAdapter {
  }
}
package android.nfc {
  public class NfcManager {
  }
}
"#;
    let surface = parse_surface(input).expect("parses");
    assert_eq!(surface.packages.len(), 1);
    assert_eq!(surface.packages[0].types.len(), 2);
}

#[test]
fn malformed_member_reports_expectation_and_position() {
    let input = "package android.nfc {\n  public class NfcManager {\n    bogus;\n  }\n}\n";
    let error = parse_surface(input).expect_err("must fail");
    match error {
        ParseError::UnexpectedToken {
            expected,
            found,
            line,
            ..
        } => {
            assert!(expected.contains("ctor"));
            assert_eq!(found, "bogus");
            assert_eq!(line, 3);
        }
        other => panic!("unexpected error {:?}", other),
    }
}

#[test]
fn missing_semicolon_aborts_file() {
    let input = "package a {\n  public class B {\n    field public int x = 1\n  }\n}\n";
    assert!(parse_surface(input).is_err());
}

#[test]
fn primitive_field_types_parse_as_primitives() {
    let input = "package a {\n  public class B {\n    field public static final boolean FLAG = true;\n  }\n}\n";
    let surface = parse_surface(input).expect("parses");
    match &surface.packages[0].types[0].members[0] {
        Member::Field { type_ref, .. } => {
            assert_eq!(type_ref, &TypeRef::Primitive(PrimitiveType::Boolean));
        }
        other => panic!("expected field, got {:?}", other),
    }
}
