//! Lexer for the analyzed Python subset.
//!
//! Handles tokenization including:
//! - Keywords and identifiers
//! - Numeric literals (int, float, imaginary) and string/byte literals with prefixes
//! - Operators and punctuation
//! - Indentation-based blocks (INDENT/DEDENT tokens)
//!
//! ## Module Structure
//!
//! - `tokens` - Token types (TokenKind, Token)
//! - `strings` - String/byte-string scanning
//! - `numbers` - Numeric literal scanning
//! - `indent` - INDENT/DEDENT handling

mod indent;
mod numbers;
mod strings;
pub mod tokens;

pub use tokens::{Token, TokenKind, keyword_id};

use crate::ast::Span;
use crate::diagnostics::CompileError;
use typpy_core::lang::operators;
use typpy_core::lang::punctuation::{self, PUNCTUATION, PunctuationId};

/// Longest operator or punctuation spelling (`//=`, `...`).
const MAX_SYMBOL_LEN: usize = 3;

/// Python tokenizer producing a layout-aware token stream.
///
/// Newlines inside `()`, `[]` and `{}` are insignificant, as are newlines escaped with `\`.
pub struct Lexer<'a> {
    source: &'a str,
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
    current_pos: usize,
    indent_stack: Vec<usize>,
    pending_dedents: usize,
    at_line_start: bool,
    /// Brackets not closed yet, with their offsets.
    open_brackets: Vec<(PunctuationId, usize)>,
    tokens: Vec<Token>,
    errors: Vec<CompileError>,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.char_indices().peekable(),
            current_pos: 0,
            indent_stack: vec![0],
            pending_dedents: 0,
            at_line_start: true,
            open_brackets: Vec::new(),
            tokens: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// Tokenize the entire source code.
    ///
    /// The token stream always ends with `Newline`, any pending `Dedent`s and `Eof`.
    pub fn tokenize(mut self) -> Result<Vec<Token>, Vec<CompileError>> {
        while !self.is_at_end() {
            self.scan_token();
        }
        while self.pending_dedents > 0 {
            self.pending_dedents -= 1;
            self.push_at_end(TokenKind::Dedent);
        }

        for (open, offset) in std::mem::take(&mut self.open_brackets) {
            self.errors.push(CompileError::syntax(
                format!("'{}' was never closed", punctuation::as_str(open)),
                Span::new(offset, offset + 1),
            ));
        }

        if self.tokens.last().is_some_and(|t| !matches!(t.kind, TokenKind::Newline | TokenKind::Dedent)) {
            self.push_at_end(TokenKind::Newline);
        }
        while self.indent_stack.len() > 1 {
            self.indent_stack.pop();
            self.push_at_end(TokenKind::Dedent);
        }
        self.push_at_end(TokenKind::Eof);

        if self.errors.is_empty() {
            Ok(self.tokens)
        } else {
            Err(self.errors)
        }
    }

    fn push_at_end(&mut self, kind: TokenKind) {
        self.tokens
            .push(Token::new(kind, Span::new(self.current_pos, self.current_pos)));
    }

    fn is_at_end(&mut self) -> bool {
        self.chars.peek().is_none()
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().map(|(_, c)| *c)
    }

    fn peek_next(&self) -> Option<char> {
        let mut iter = self.source[self.current_pos..].chars();
        iter.next();
        iter.next()
    }

    fn advance(&mut self) -> Option<char> {
        let (pos, c) = self.chars.next()?;
        self.current_pos = pos + c.len_utf8();
        Some(c)
    }

    fn add_token(&mut self, kind: TokenKind, start: usize) {
        self.tokens.push(Token::new(kind, Span::new(start, self.current_pos)));
    }

    fn error(&mut self, message: impl Into<String>, start: usize) {
        self.errors
            .push(CompileError::syntax(message, Span::new(start, self.current_pos)));
    }

    fn scan_token(&mut self) {
        if self.pending_dedents > 0 {
            self.pending_dedents -= 1;
            self.push_at_end(TokenKind::Dedent);
            return;
        }

        if self.at_line_start && self.open_brackets.is_empty() {
            self.handle_indentation();
            return;
        }

        while matches!(self.peek(), Some(' ' | '\t' | '\x0c')) {
            self.advance();
        }

        let start = self.current_pos;
        let Some(c) = self.advance() else {
            return;
        };

        match c {
            '#' => {
                while self.peek().is_some_and(|c| c != '\n') {
                    self.advance();
                }
            }
            '\n' => {
                if self.open_brackets.is_empty() && !self.at_line_start {
                    self.add_token(TokenKind::Newline, start);
                    self.at_line_start = true;
                }
            }
            '\r' => {}
            '\\' => {
                if self.peek() == Some('\r') {
                    self.advance();
                }
                if self.advance() != Some('\n') {
                    self.error("unexpected character after line continuation character", start);
                }
            }
            '@' => self.add_token(TokenKind::At, start),
            '"' | '\'' => self.scan_string(start, c, StringPrefix::default()),
            '0'..='9' => self.scan_number(start, c),
            '.' if self.peek().is_some_and(|d| d.is_ascii_digit()) => self.scan_number(start, c),
            _ if is_ident_start(c) => self.scan_identifier(start),
            _ => self.scan_symbol(start, c),
        }
    }

    /// Longest-match scan over the operator and punctuation registries.
    fn scan_symbol(&mut self, start: usize, first: char) {
        let rest = &self.source[start..];
        let matched = (1..=MAX_SYMBOL_LEN)
            .rev()
            .filter_map(|len| rest.get(..len))
            .find_map(|spelling| symbol_kind(spelling).map(|kind| (spelling.len(), kind)));

        let Some((len, kind)) = matched else {
            self.error(format!("invalid character '{}'", first), start);
            return;
        };
        while self.current_pos < start + len {
            self.advance();
        }
        if let TokenKind::Punctuation(id) = kind {
            self.track_bracket(id, start);
        }
        self.add_token(kind, start);
    }

    fn track_bracket(&mut self, id: PunctuationId, start: usize) {
        if closing_bracket(id).is_some() {
            self.open_brackets.push((id, start));
            return;
        }
        if !matches!(id, PunctuationId::RParen | PunctuationId::RBracket | PunctuationId::RBrace) {
            return;
        }
        match self.open_brackets.pop() {
            Some((open, _)) if closing_bracket(open) == Some(id) => {}
            Some((open, _)) => self.error(
                format!(
                    "closing parenthesis '{}' does not match opening parenthesis '{}'",
                    punctuation::as_str(id),
                    punctuation::as_str(open)
                ),
                start,
            ),
            None => self.error(format!("unmatched '{}'", punctuation::as_str(id)), start),
        }
    }

    fn scan_identifier(&mut self, start: usize) {
        while self.peek().is_some_and(is_ident_continue) {
            self.advance();
        }
        let spelling = &self.source[start..self.current_pos];

        // `b"..."`, `rb'...'`, `f"..."`
        if let Some(quote) = self.peek().filter(|q| *q == '"' || *q == '\'') {
            if let Some(prefix) = StringPrefix::parse(spelling) {
                self.advance();
                self.scan_string(start, quote, prefix);
                return;
            }
        }

        let kind = match keyword_id(spelling) {
            Some(id) => TokenKind::Keyword(id),
            None => TokenKind::Ident(spelling.to_string()),
        };
        self.add_token(kind, start);
    }
}

fn symbol_kind(spelling: &str) -> Option<TokenKind> {
    operators::from_str(spelling).map(TokenKind::Operator).or_else(|| {
        PUNCTUATION
            .iter()
            .find(|p| p.canonical == spelling)
            .map(|p| TokenKind::Punctuation(p.id))
    })
}

fn closing_bracket(open: PunctuationId) -> Option<PunctuationId> {
    match open {
        PunctuationId::LParen => Some(PunctuationId::RParen),
        PunctuationId::LBracket => Some(PunctuationId::RBracket),
        PunctuationId::LBrace => Some(PunctuationId::RBrace),
        _ => None,
    }
}

/// Flags decoded from a string literal prefix.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct StringPrefix {
    pub raw: bool,
    pub bytes: bool,
}

impl StringPrefix {
    fn parse(spelling: &str) -> Option<Self> {
        let lower = spelling.to_ascii_lowercase();
        match lower.as_str() {
            "r" => Some(Self { raw: true, bytes: false }),
            "b" => Some(Self { raw: false, bytes: true }),
            "rb" | "br" => Some(Self { raw: true, bytes: true }),
            "f" | "u" => Some(Self::default()),
            "fr" | "rf" => Some(Self { raw: true, bytes: false }),
            _ => None,
        }
    }
}

/// Identifiers follow Python: letters (any script), digits and `_`.
fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

fn is_ident_continue(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Tokenize `source`, collecting every lexical error.
#[tracing::instrument(skip_all, fields(source_len = source.len()))]
pub fn lex(source: &str) -> Result<Vec<Token>, Vec<CompileError>> {
    Lexer::new(source).tokenize()
}
