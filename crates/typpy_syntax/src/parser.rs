//! Parser for the analyzed Python subset.
//!
//! Converts a token stream into an AST [`Program`].
//!
//! ## Examples
//!
//! ```rust,no_run
//! use typpy_syntax::{lexer, parser};
//!
//! let source = "def foo() -> int:\n    return 42\n";
//! let tokens = lexer::lex(source).unwrap();
//! let program = parser::parse(&tokens).unwrap();
//! assert_eq!(program.body.len(), 1);
//! ```

use crate::ast::*;
use crate::diagnostics::CompileError;
use crate::lexer::{Token, TokenKind};
use typpy_core::lang::keywords::{self, KeywordId};
use typpy_core::lang::operators::{self, OperatorId};
use typpy_core::lang::punctuation::{self, PunctuationId};

// NOTE: This module is split across multiple files using `include!` to keep all parser
// methods in the same Rust module (preserving privacy + call patterns) while avoiding
// a single large source file.

include!("parser/core.rs");
include!("parser/helpers.rs");
include!("parser/decl.rs");
include!("parser/stmts.rs");
include!("parser/expr.rs");
include!("parser/util.rs");
include!("parser/api.rs");
include!("parser/tests.rs");
