// stubgen_codegen_java/renderer/types - Type references and literals
use super::StubRenderer;
use stubgen_api::{ConstantValue, TypeRef, WildcardBound};

impl StubRenderer {
    /// Render a type reference, registering imports for dot-qualified names
    /// along the way.
    pub(crate) fn generate_type(&mut self, type_ref: &TypeRef) -> String {
        match type_ref {
            TypeRef::Void => "void".to_string(),
            TypeRef::Primitive(primitive) => primitive.as_str().to_string(),
            TypeRef::Named { name, type_args } => {
                let rendered_name = self.register_type_name(name);
                if type_args.is_empty() {
                    rendered_name
                } else {
                    let args = type_args
                        .iter()
                        .map(|arg| self.generate_type(arg))
                        .collect::<Vec<_>>()
                        .join(", ");
                    format!("{}<{}>", rendered_name, args)
                }
            }
            TypeRef::Array {
                element,
                dimensions,
            } => {
                let mut rendered = self.generate_type(element);
                for _ in 0..*dimensions {
                    rendered.push_str("[]");
                }
                rendered
            }
            TypeRef::Wildcard(bound) => match bound {
                WildcardBound::Unbounded => "?".to_string(),
                WildcardBound::Extends(inner) => {
                    format!("? extends {}", self.generate_type(inner))
                }
                WildcardBound::Super(inner) => format!("? super {}", self.generate_type(inner)),
            },
        }
    }

    /// Java source spelling of a constant literal.
    pub(crate) fn render_constant(value: &ConstantValue) -> String {
        match value {
            ConstantValue::String(text) => format!("\"{}\"", escape_string(text)),
            ConstantValue::Char(c) => format!("'{}'", escape_char(*c)),
            ConstantValue::Int(value) => value.to_string(),
            ConstantValue::Long(value) => format!("{}L", value),
            // Floating literals keep their surface spelling, suffix and all.
            ConstantValue::Float(text) | ConstantValue::Double(text) => text.clone(),
            ConstantValue::Boolean(value) => value.to_string(),
            ConstantValue::Null => "null".to_string(),
        }
    }

    /// Placeholder initializer for a `final` field whose real value only
    /// exists at runtime.
    pub(crate) fn sentinel_literal(type_ref: &TypeRef) -> String {
        match type_ref {
            TypeRef::Primitive(primitive) => primitive.default_literal().to_string(),
            _ => "null".to_string(),
        }
    }
}

fn escape_string(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '"' => escaped.push_str("\\\""),
            '\\' => escaped.push_str("\\\\"),
            '\n' => escaped.push_str("\\n"),
            '\t' => escaped.push_str("\\t"),
            '\r' => escaped.push_str("\\r"),
            '\0' => escaped.push_str("\\0"),
            c if (c as u32) < 0x20 => {
                escaped.push_str(&format!("\\u{:04x}", c as u32));
            }
            c => escaped.push(c),
        }
    }
    escaped
}

fn escape_char(c: char) -> String {
    match c {
        '\'' => "\\'".to_string(),
        '\\' => "\\\\".to_string(),
        '\n' => "\\n".to_string(),
        '\t' => "\\t".to_string(),
        '\r' => "\\r".to_string(),
        '\0' => "\\0".to_string(),
        c if (c as u32) < 0x20 => format!("\\u{:04x}", c as u32),
        c => c.to_string(),
    }
}
