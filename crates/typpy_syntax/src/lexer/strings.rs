//! String scanning: plain, raw and byte strings, single- or triple-quoted.
//!
//! Formatted strings (`f"..."`) are lexed as plain strings; their replacement
//! fields are not analyzed.

use super::tokens::TokenKind;
use super::{Lexer, StringPrefix};
use crate::ast::Span;
use crate::diagnostics::CompileError;

// ============================================================================
// Escape sequence handling
// ============================================================================

/// Result of processing an escape sequence
enum Escape {
    Char(char),
    /// A single raw byte (`\xNN` inside a byte string)
    Byte(u8),
    /// Backslash-newline: the line break is dropped
    LineJoin,
    /// Unknown escape, preserved as backslash + char
    Unknown(char),
    Invalid(String),
    Eof,
}

impl<'a> Lexer<'a> {
    /// Process an escape sequence. Called after consuming the backslash.
    fn scan_escape(&mut self, bytes: bool) -> Escape {
        match self.advance() {
            Some('n') => Escape::Char('\n'),
            Some('t') => Escape::Char('\t'),
            Some('r') => Escape::Char('\r'),
            Some('0') => Escape::Char('\0'),
            Some(c @ ('\\' | '\'' | '"')) => Escape::Char(c),
            Some('\n') => Escape::LineJoin,
            Some('x') => {
                let hex = self.take_hex(2);
                match u8::from_str_radix(&hex, 16) {
                    Ok(b) if bytes => Escape::Byte(b),
                    Ok(b) => Escape::Char(char::from(b)),
                    Err(_) => Escape::Invalid(format!("\\x{}", hex)),
                }
            }
            Some('u') if !bytes => {
                let hex = self.take_hex(4);
                match u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32) {
                    Some(c) => Escape::Char(c),
                    None => Escape::Invalid(format!("\\u{}", hex)),
                }
            }
            Some(c) => Escape::Unknown(c),
            None => Escape::Eof,
        }
    }

    fn take_hex(&mut self, n: usize) -> String {
        let mut hex = String::new();
        for _ in 0..n {
            match self.peek() {
                Some(c) if c.is_ascii_hexdigit() => {
                    hex.push(c);
                    self.advance();
                }
                _ => break,
            }
        }
        hex
    }
}

// ============================================================================
// String scanning
// ============================================================================

impl<'a> Lexer<'a> {
    /// Scan a string literal whose opening quote has been consumed.
    pub(super) fn scan_string(&mut self, start: usize, quote: char, prefix: StringPrefix) {
        let triple = if self.peek() == Some(quote) && self.peek_next() == Some(quote) {
            self.advance();
            self.advance();
            true
        } else {
            false
        };

        let mut buf: Vec<u8> = Vec::new();
        let mut terminated = false;

        loop {
            match self.peek() {
                None => break,
                Some(c) if c == quote => {
                    self.advance();
                    if !triple {
                        terminated = true;
                        break;
                    }
                    if self.peek() == Some(quote) && self.peek_next() == Some(quote) {
                        self.advance();
                        self.advance();
                        terminated = true;
                        break;
                    }
                    push_char(&mut buf, quote);
                }
                Some('\n') if !triple => break,
                Some('\\') => {
                    self.advance();
                    if prefix.raw {
                        buf.push(b'\\');
                        if let Some(c) = self.advance() {
                            push_char(&mut buf, c);
                        }
                        continue;
                    }
                    match self.scan_escape(prefix.bytes) {
                        Escape::Char(c) => push_char(&mut buf, c),
                        Escape::Byte(b) => buf.push(b),
                        Escape::LineJoin => {}
                        Escape::Unknown(c) => {
                            buf.push(b'\\');
                            push_char(&mut buf, c);
                        }
                        Escape::Invalid(text) => {
                            self.errors.push(CompileError::syntax(
                                format!("Invalid escape sequence '{}'", text),
                                Span::new(start, self.current_pos),
                            ));
                        }
                        Escape::Eof => break,
                    }
                }
                Some(c) => {
                    if prefix.bytes && !c.is_ascii() {
                        self.errors.push(CompileError::syntax(
                            "Bytes can only contain ASCII literal characters",
                            Span::new(start, self.current_pos),
                        ));
                    }
                    push_char(&mut buf, c);
                    self.advance();
                }
            }
        }

        if !terminated {
            let message = if triple {
                "Unterminated triple-quoted string"
            } else {
                "Unterminated string"
            };
            self.errors
                .push(CompileError::syntax(message, Span::new(start, self.current_pos)));
            return;
        }

        if prefix.bytes {
            self.add_token(TokenKind::Bytes(buf), start);
        } else {
            // Only whole chars are pushed outside byte strings.
            let text = String::from_utf8_lossy(&buf).into_owned();
            self.add_token(TokenKind::String(text), start);
        }
    }
}

fn push_char(buf: &mut Vec<u8>, c: char) {
    let mut tmp = [0u8; 4];
    buf.extend_from_slice(c.encode_utf8(&mut tmp).as_bytes());
}
