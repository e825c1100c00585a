// stubgen_api/types - Spans, API levels, type references and constant values
use serde::{Deserialize, Serialize};
use std::fmt;

/// Position information for surface declarations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Span {
    pub start_line: usize,
    pub start_column: usize,
    pub end_line: usize,
    pub end_column: usize,
}

impl Span {
    pub fn new(start_line: usize, start_column: usize, end_line: usize, end_column: usize) -> Self {
        Self {
            start_line,
            start_column,
            end_line,
            end_column,
        }
    }

    pub fn point(line: usize, column: usize) -> Self {
        Self::new(line, column, line, column)
    }

    pub fn dummy() -> Self {
        Self::default()
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.start_line, self.start_column)
    }
}

/// Platform release that introduced a symbol (`@apiSince`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ApiLevel(pub u32);

impl fmt::Display for ApiLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Nullability metadata attached to a type use. Informational only; the
/// generator renders it back as annotations, nothing enforces it here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Nullability {
    NonNull,
    Nullable,
    #[default]
    Unspecified,
}

/// Java primitive types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PrimitiveType {
    Boolean,
    Byte,
    Short,
    Int,
    Long,
    Char,
    Float,
    Double,
}

impl PrimitiveType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PrimitiveType::Boolean => "boolean",
            PrimitiveType::Byte => "byte",
            PrimitiveType::Short => "short",
            PrimitiveType::Int => "int",
            PrimitiveType::Long => "long",
            PrimitiveType::Char => "char",
            PrimitiveType::Float => "float",
            PrimitiveType::Double => "double",
        }
    }

    pub fn from_keyword(word: &str) -> Option<Self> {
        Some(match word {
            "boolean" => PrimitiveType::Boolean,
            "byte" => PrimitiveType::Byte,
            "short" => PrimitiveType::Short,
            "int" => PrimitiveType::Int,
            "long" => PrimitiveType::Long,
            "char" => PrimitiveType::Char,
            "float" => PrimitiveType::Float,
            "double" => PrimitiveType::Double,
            _ => return None,
        })
    }

    /// Literal a `static final` field of this type falls back to when the
    /// surface carries no compile-time value. Reference types use `null`;
    /// primitives cannot, so each gets its default value literal.
    pub fn default_literal(&self) -> &'static str {
        match self {
            PrimitiveType::Boolean => "false",
            PrimitiveType::Byte | PrimitiveType::Short | PrimitiveType::Int => "0",
            PrimitiveType::Long => "0L",
            PrimitiveType::Char => "' '",
            PrimitiveType::Float => "0.0f",
            PrimitiveType::Double => "0.0",
        }
    }
}

/// Bound on a wildcard type argument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WildcardBound {
    Unbounded,
    Extends(Box<TypeRef>),
    Super(Box<TypeRef>),
}

/// A Java type reference as it appears in a surface signature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TypeRef {
    Void,
    Primitive(PrimitiveType),
    /// Class, interface, enum, annotation or type-variable reference. The
    /// name is kept as written: dot-qualified for foreign types, simple for
    /// same-package types and type variables.
    Named {
        name: String,
        type_args: Vec<TypeRef>,
    },
    Array {
        element: Box<TypeRef>,
        dimensions: usize,
    },
    Wildcard(WildcardBound),
}

impl TypeRef {
    pub fn named(name: impl Into<String>) -> Self {
        TypeRef::Named {
            name: name.into(),
            type_args: Vec::new(),
        }
    }

    pub fn generic(name: impl Into<String>, type_args: Vec<TypeRef>) -> Self {
        TypeRef::Named {
            name: name.into(),
            type_args,
        }
    }

    pub fn array(element: TypeRef) -> Self {
        match element {
            TypeRef::Array {
                element,
                dimensions,
            } => TypeRef::Array {
                element,
                dimensions: dimensions + 1,
            },
            other => TypeRef::Array {
                element: Box::new(other),
                dimensions: 1,
            },
        }
    }

    pub fn is_reference(&self) -> bool {
        !matches!(self, TypeRef::Void | TypeRef::Primitive(_))
    }

    /// Fully-qualified canonical rendering, independent of any import table.
    /// Used for duplicate-signature keys and diagnostics.
    pub fn canonical(&self) -> String {
        match self {
            TypeRef::Void => "void".to_string(),
            TypeRef::Primitive(primitive) => primitive.as_str().to_string(),
            TypeRef::Named { name, type_args } => {
                if type_args.is_empty() {
                    name.clone()
                } else {
                    let args = type_args
                        .iter()
                        .map(TypeRef::canonical)
                        .collect::<Vec<_>>()
                        .join(", ");
                    format!("{}<{}>", name, args)
                }
            }
            TypeRef::Array {
                element,
                dimensions,
            } => {
                let mut rendered = element.canonical();
                for _ in 0..*dimensions {
                    rendered.push_str("[]");
                }
                rendered
            }
            TypeRef::Wildcard(bound) => match bound {
                WildcardBound::Unbounded => "?".to_string(),
                WildcardBound::Extends(inner) => format!("? extends {}", inner.canonical()),
                WildcardBound::Super(inner) => format!("? super {}", inner.canonical()),
            },
        }
    }
}

/// Compile-time literal value of a `public static final` field. Floating
/// literals keep their source spelling so regeneration is byte-stable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ConstantValue {
    String(String),
    Char(char),
    Int(i64),
    Long(i64),
    Float(String),
    Double(String),
    Boolean(bool),
    Null,
}

impl ConstantValue {
    /// Whether this literal is assignable to the given field type. String
    /// values only fit `String`/`CharSequence`, numerics only primitives of
    /// a matching family, `null` only reference types.
    pub fn fits(&self, field_type: &TypeRef) -> bool {
        match self {
            ConstantValue::String(_) => matches!(
                field_type,
                TypeRef::Named { name, .. }
                    if name == "String"
                        || name == "java.lang.String"
                        || name == "CharSequence"
                        || name == "java.lang.CharSequence"
            ),
            ConstantValue::Char(_) => {
                matches!(field_type, TypeRef::Primitive(PrimitiveType::Char))
            }
            ConstantValue::Int(_) => matches!(
                field_type,
                TypeRef::Primitive(
                    PrimitiveType::Byte
                        | PrimitiveType::Short
                        | PrimitiveType::Int
                        | PrimitiveType::Long
                        | PrimitiveType::Char
                )
            ),
            ConstantValue::Long(_) => {
                matches!(field_type, TypeRef::Primitive(PrimitiveType::Long))
            }
            ConstantValue::Float(_) => {
                matches!(field_type, TypeRef::Primitive(PrimitiveType::Float))
            }
            ConstantValue::Double(_) => matches!(
                field_type,
                TypeRef::Primitive(PrimitiveType::Double | PrimitiveType::Float)
            ),
            ConstantValue::Boolean(_) => {
                matches!(field_type, TypeRef::Primitive(PrimitiveType::Boolean))
            }
            ConstantValue::Null => field_type.is_reference(),
        }
    }
}

/// Type parameter declaration, e.g. `T extends Comparable<T> & Cloneable`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeParam {
    pub name: String,
    pub bounds: Vec<TypeRef>,
}

impl TypeParam {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bounds: Vec::new(),
        }
    }
}
