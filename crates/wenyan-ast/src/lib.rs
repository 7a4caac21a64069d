//! # Wenyan AST
//!
//! Abstract Syntax Tree definitions for wenyan.
//!
//! The tree is built once by the parser and only read afterwards. Every node
//! may carry a [`SourceLocation`](wenyan_diagnostics::SourceLocation) used for
//! diagnostics; locations never affect semantics, and
//! [`ClearLocations`] strips them so trees can be compared structurally.

mod ast;
mod clear;
mod located;

pub use ast::*;
pub use clear::ClearLocations;
pub use located::Located;
