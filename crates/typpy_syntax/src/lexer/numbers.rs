//! Numeric literal scanning: integers (decimal, hex, octal, binary), floats and imaginary literals.

use super::Lexer;
use super::tokens::TokenKind;
use crate::ast::Span;
use crate::diagnostics::CompileError;

impl<'a> Lexer<'a> {
    pub(super) fn scan_number(&mut self, start: usize, first: char) {
        if first == '0' {
            let radix = match self.peek() {
                Some('x' | 'X') => Some(16),
                Some('o' | 'O') => Some(8),
                Some('b' | 'B') => Some(2),
                _ => None,
            };
            if let Some(radix) = radix {
                self.advance();
                self.scan_radix_int(start, radix);
                return;
            }
        }

        let mut value = String::from(first);
        let mut is_float = first == '.';

        self.take_digits(&mut value);

        // Decimal part (`1.5`, `1.`), but not `1..` or `1.attr`
        if !is_float && self.peek() == Some('.') && !self.peek_next().is_some_and(|c| c == '.' || c.is_ascii_alphabetic() || c == '_')
        {
            is_float = true;
            value.push('.');
            self.advance();
            self.take_digits(&mut value);
        }

        // Exponent part
        if matches!(self.peek(), Some('e' | 'E')) {
            is_float = true;
            value.push('e');
            self.advance();
            if let Some(sign @ ('+' | '-')) = self.peek() {
                value.push(sign);
                self.advance();
            }
            self.take_digits(&mut value);
        }

        let imaginary = matches!(self.peek(), Some('j' | 'J'));
        if imaginary {
            self.advance();
        }

        if is_float || imaginary {
            match value.parse::<f64>() {
                Ok(f) if imaginary => self.add_token(TokenKind::Imaginary(f), start),
                Ok(f) => self.add_token(TokenKind::Float(f), start),
                Err(_) => self.invalid_literal("float", &value, start),
            }
        } else {
            match value.parse::<i64>() {
                Ok(i) => self.add_token(TokenKind::Int(i), start),
                Err(_) => self.invalid_literal("integer", &value, start),
            }
        }
    }

    fn take_digits(&mut self, value: &mut String) {
        while let Some(c) = self.peek() {
            if c.is_ascii_digit() || c == '_' {
                if c != '_' {
                    value.push(c);
                }
                self.advance();
            } else {
                break;
            }
        }
    }

    fn scan_radix_int(&mut self, start: usize, radix: u32) {
        let mut digits = String::new();
        while let Some(c) = self.peek() {
            if c.is_digit(radix) || c == '_' {
                if c != '_' {
                    digits.push(c);
                }
                self.advance();
            } else {
                break;
            }
        }
        match i64::from_str_radix(&digits, radix) {
            Ok(i) => self.add_token(TokenKind::Int(i), start),
            Err(_) => {
                let text = self.source[start..self.current_pos].to_string();
                self.invalid_literal("integer", &text, start);
            }
        }
    }

    fn invalid_literal(&mut self, what: &str, text: &str, start: usize) {
        self.errors.push(CompileError::syntax(
            format!("Invalid {} literal: {}", what, text),
            Span::new(start, self.current_pos),
        ));
    }
}
