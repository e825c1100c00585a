// stubgen_api - API surface model for SDK stub generation
//! Data model for a platform API surface: packages, type declarations,
//! member signatures, documentation blocks and API-level metadata.
//!
//! The model deliberately has no representation for method bodies. A surface
//! describes signatures only; what goes inside a rendered body is decided by
//! the code generator, which makes "every stubbed member fails" a guarantee
//! the model cannot be used to circumvent.

pub mod decl;
pub mod docs;
pub mod member;
pub mod types;
pub mod validate;

pub use decl::*;
pub use docs::*;
pub use member::*;
pub use types::*;
pub use validate::*;

#[cfg(test)]
mod tests;
