// stubgen_codegen_java - Java stub source generation from an API surface
//! The Stub Unit Renderer.
//!
//! Given a parsed public-API declaration this crate renders a compilation
//! unit that is source-compatible with real call sites while guaranteeing
//! that any invocation fails immediately: every executable member body is
//! `throw new RuntimeException("Stub!");`. Compile-time constants keep their
//! real literals so consumers can constant-fold against the stub, and
//! Javadoc (`@apiSince` tags included) is carried through verbatim.

mod builder;
mod config;
mod error;
mod renderer;

pub use builder::{JavaCompilationUnit, JavaSourceBuilder};
pub use config::StubGenConfig;
pub use error::RenderError;
pub use renderer::{plan_units, RenderedUnit, StubRenderer, UnitPlan};

#[cfg(test)]
mod tests;
