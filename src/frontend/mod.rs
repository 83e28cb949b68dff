//! typpy analyzer frontend
//!
//! This module contains all analysis components:
//! - `lexer`, `parser`, `ast`, `diagnostics`: the syntax frontend
//! - `types`, `subtype`: the static type algebra and its subtype relation
//! - `scope`: lexical symbol tables and the builtin scope
//! - `provider`: discovery of a unit's top-level symbols
//! - `typechecker`: expression inference, call/assignment validation, the scope driver
//! - `report`: located diagnostics and their rendering
//! - `resolver`, `discover`: module names and input files

// Syntax components are provided by the shared typpy_syntax crate.
pub use typpy_syntax::{ast, diagnostics, lexer, parser};

pub mod discover;
pub mod provider;
pub mod report;
pub mod resolver;
pub mod scope;
pub mod subtype;
pub mod typechecker;
pub mod types;
