//! Syntax frontend for the analyzed Python subset: lexer, parser, AST, diagnostics.
//!
//! ## Notes
//! - This crate is "syntax-only": it does not resolve names or compute types.
//! - Vocabulary identity (keywords/operators/punctuation) comes from `typpy_core::lang` registries.
//! - Every AST node carries a byte [`ast::Span`]; [`diagnostics::LineIndex`] maps offsets to
//!   1-based lines and 0-based columns.
//!
//! ## Examples
//! ```rust,no_run
//! use typpy_syntax::{lexer, parser};
//!
//! let tokens = lexer::lex("x = 1\n").unwrap();
//! let program = parser::parse(&tokens).unwrap();
//! assert_eq!(program.body.len(), 1);
//! ```

pub mod ast;
pub mod diagnostics;
pub mod lexer;
pub mod parser;
pub mod token_helpers;
