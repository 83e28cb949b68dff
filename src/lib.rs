#![forbid(unsafe_code)]
//! typpy: a static type checker for Python source.
//!
//! typpy reads Python modules without running them, infers the types of assignments and call
//! arguments, and checks them against the annotations the code declares. This crate provides the
//! analyzer (scopes, type algebra, subtype relation, validators, driver) and the `typpy` CLI; the
//! syntax frontend lives in `typpy_syntax` and the builtin vocabulary in `typpy_core`.
//!
//! ## Panic Policy
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. The `cli` module
//!   enforces `#![deny(clippy::unwrap_used)]`.
//!
//! - **Diagnostics are data**: problems found in analyzed code are returned as diagnostics, never
//!   raised as panics.
//!
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.

pub mod cli;
pub mod frontend;

pub use frontend::ast;
pub use frontend::diagnostics;
pub use frontend::lexer;
pub use frontend::parser;
pub use frontend::typechecker;

pub use frontend::report::{TypingError, print_errors};
pub use frontend::typechecker::TypeChecker;
