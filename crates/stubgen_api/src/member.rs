// stubgen_api/member - Member declarations: fields, constructors, methods
use crate::docs::DocComment;
use crate::types::{ConstantValue, Nullability, Span, TypeParam, TypeRef};
use serde::{Deserialize, Serialize};

/// Visibility of a surface declaration. Private and package-private members
/// never reach a published surface; the extractor strips them upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Visibility {
    #[default]
    Public,
    Protected,
}

impl Visibility {
    pub fn as_str(&self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::Protected => "protected",
        }
    }
}

/// Modifier set for a type or member declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Modifiers {
    pub visibility: Visibility,
    pub is_static: bool,
    pub is_final: bool,
    pub is_abstract: bool,
    pub is_default: bool,
    pub is_native: bool,
    pub is_synchronized: bool,
    pub is_transient: bool,
    pub is_volatile: bool,
    pub deprecated: bool,
}

impl Modifiers {
    pub fn public() -> Self {
        Self::default()
    }

    pub fn public_static_final() -> Self {
        Self {
            is_static: true,
            is_final: true,
            ..Self::default()
        }
    }
}

/// A formal parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    pub type_ref: TypeRef,
    pub nullability: Nullability,
    pub is_varargs: bool,
}

impl Parameter {
    pub fn new(name: impl Into<String>, type_ref: TypeRef) -> Self {
        Self {
            name: name.into(),
            type_ref,
            nullability: Nullability::Unspecified,
            is_varargs: false,
        }
    }
}

/// One member declaration of a stub unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Member {
    Field {
        modifiers: Modifiers,
        type_ref: TypeRef,
        nullability: Nullability,
        name: String,
        /// Compile-time literal, preserved into the stub so call sites can
        /// constant-fold. `None` means the real value only exists at runtime
        /// and the stub gets a placeholder sentinel instead.
        constant: Option<ConstantValue>,
        doc: Option<DocComment>,
        span: Span,
    },
    Constructor {
        modifiers: Modifiers,
        parameters: Vec<Parameter>,
        throws: Vec<TypeRef>,
        doc: Option<DocComment>,
        span: Span,
    },
    Method {
        modifiers: Modifiers,
        type_params: Vec<TypeParam>,
        return_type: TypeRef,
        return_nullability: Nullability,
        name: String,
        parameters: Vec<Parameter>,
        throws: Vec<TypeRef>,
        /// Annotation-type elements carry their `default` literal here.
        annotation_default: Option<ConstantValue>,
        doc: Option<DocComment>,
        span: Span,
    },
    EnumConstant {
        name: String,
        doc: Option<DocComment>,
        span: Span,
    },
}

impl Member {
    pub fn name(&self) -> &str {
        match self {
            Member::Field { name, .. } => name,
            Member::Constructor { .. } => "<init>",
            Member::Method { name, .. } => name,
            Member::EnumConstant { name, .. } => name,
        }
    }

    pub fn span(&self) -> &Span {
        match self {
            Member::Field { span, .. } => span,
            Member::Constructor { span, .. } => span,
            Member::Method { span, .. } => span,
            Member::EnumConstant { span, .. } => span,
        }
    }

    pub fn doc(&self) -> Option<&DocComment> {
        match self {
            Member::Field { doc, .. } => doc.as_ref(),
            Member::Constructor { doc, .. } => doc.as_ref(),
            Member::Method { doc, .. } => doc.as_ref(),
            Member::EnumConstant { doc, .. } => doc.as_ref(),
        }
    }

    /// Key identifying a member within its declaring type: overloads differ
    /// by erased parameter lists, fields and enum constants by bare name.
    pub fn signature_key(&self) -> String {
        match self {
            Member::Field { name, .. } => format!("field {}", name),
            Member::EnumConstant { name, .. } => format!("enum_constant {}", name),
            Member::Constructor { parameters, .. } => {
                format!("ctor({})", Self::parameter_key(parameters))
            }
            Member::Method {
                name, parameters, ..
            } => format!("{}({})", name, Self::parameter_key(parameters)),
        }
    }

    fn parameter_key(parameters: &[Parameter]) -> String {
        parameters
            .iter()
            .map(|parameter| {
                let mut key = parameter.type_ref.canonical();
                if parameter.is_varargs {
                    key.push_str("...");
                }
                key
            })
            .collect::<Vec<_>>()
            .join(", ")
    }
}
