/// Miscellaneous parser utilities.
///
/// Identifier parsing and string literal handling.
impl<'a> Parser<'a> {
    // ========================================================================
    // Utilities
    // ========================================================================

    fn identifier(&mut self) -> Result<Ident, CompileError> {
        self.identifier_spanned().map(|ident| ident.node)
    }

    fn identifier_spanned(&mut self) -> Result<Spanned<Ident>, CompileError> {
        match &self.peek().kind {
            TokenKind::Ident(name) => {
                let span = self.current_span();
                let name = name.clone();
                self.advance();
                Ok(Spanned::new(name, span))
            }
            _ => Err(self.unexpected("Expected identifier")),
        }
    }

    /// Parse a string or bytes literal, joining adjacent literals (`"a" "b"`).
    fn string_literal(&mut self) -> Result<Spanned<Expr>, CompileError> {
        let start = self.current_span().start;
        let mut text: Option<String> = None;
        let mut bytes: Option<Vec<u8>> = None;

        loop {
            match &self.peek().kind {
                TokenKind::String(s) if bytes.is_none() => {
                    text.get_or_insert_with(String::new).push_str(s);
                }
                TokenKind::Bytes(b) if text.is_none() => {
                    bytes.get_or_insert_with(Vec::new).extend_from_slice(b);
                }
                TokenKind::String(_) | TokenKind::Bytes(_) => {
                    return Err(CompileError::syntax(
                        "Cannot mix bytes and nonbytes literals",
                        self.current_span(),
                    ));
                }
                _ => break,
            }
            self.advance();
        }

        let literal = match (text, bytes) {
            (_, Some(b)) => Literal::Bytes(b),
            (Some(s), None) => Literal::Str(s),
            (None, None) => return Err(self.unexpected("Expected string literal")),
        };
        Ok(Spanned::new(Expr::Literal(literal), Span::new(start, self.prev_end())))
    }
}
