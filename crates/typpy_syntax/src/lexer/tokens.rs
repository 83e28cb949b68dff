//! Token types for the lexer.
//!
//! Reserved words, operators and punctuation carry **registry-backed IDs** from
//! `typpy_core::lang` so the parser never compares spellings.

use crate::ast::Span;
use typpy_core::lang::keywords::{self, KeywordId};
use typpy_core::lang::operators::OperatorId;
use typpy_core::lang::punctuation::PunctuationId;

/// Kind of token produced by the lexer.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // ========== Keyword / operator / punctuation (ID-based) ==========
    Keyword(KeywordId),
    Operator(OperatorId),
    Punctuation(PunctuationId),
    /// `@` starting a decorator line
    At,

    // ========== Identifiers and Literals ==========
    Ident(String),
    Int(i64),
    Float(f64),
    /// Imaginary literal (`2j`, `1.5j`)
    Imaginary(f64),
    String(String),
    Bytes(Vec<u8>),

    // ========== Indentation ==========
    Newline,
    Indent,
    Dedent,

    Eof,
}

/// A token with its kind and source span.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }
}

/// Resolve an identifier spelling to a keyword id, if reserved.
pub fn keyword_id(name: &str) -> Option<KeywordId> {
    keywords::from_str(name)
}
