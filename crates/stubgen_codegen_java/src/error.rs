// stubgen_codegen_java/error - Rendering failures
use stubgen_api::Span;
use thiserror::Error;

/// Error variants produced while rendering a surface declaration into stub
/// source. Any error aborts the whole unit; callers must not write partial
/// output for it.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RenderError {
    #[error("Unrenderable construct in {type_name}: {message}")]
    UnsupportedConstruct {
        type_name: String,
        message: String,
        span: Option<Span>,
    },

    #[error("Invalid signature in {type_name}: {message}")]
    InvalidSignature {
        type_name: String,
        message: String,
        span: Option<Span>,
    },

    #[error("Constant error in {type_name}: {message}")]
    ConstantError {
        type_name: String,
        message: String,
        span: Option<Span>,
    },

    #[error("Missing outer type `{outer}` for nested declaration `{nested}`")]
    MissingOuterType { outer: String, nested: String },
}
