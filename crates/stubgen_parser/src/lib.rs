// stubgen_parser - Lexer and parser for the API signature format
//! Turns textual API surface descriptions into [`stubgen_api::ApiSurface`]
//! values.
//!
//! The accepted grammar is the signature format used for published platform
//! API surfaces: `package x.y { ... }` blocks containing type declarations
//! whose members are introduced by the keywords `ctor`, `method`, `field`
//! and `enum_constant`, with `/** ... */` documentation blocks attached to
//! the following declaration. The first error aborts the whole input file;
//! a partially-understood surface is never returned.

pub mod lexer;
pub mod parser;

pub use lexer::{LexError, Lexer, Token, TokenType};
pub use parser::{parse_surface, ParseError, Parser};

#[cfg(test)]
mod tests;
