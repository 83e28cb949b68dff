/// Parser core types and entrypoint.
///
/// This chunk defines the [`Parser`] type and its top-level `parse()` entrypoint.
///
/// ## Notes
/// - This file is `include!`'d into `crate::parser` to keep all parser methods in a
///   single module.

/// Parser state.
///
/// ## Notes
/// - The parser is single-pass and recovers from errors by synchronizing at statement
///   boundaries, so one run reports every syntax error it can find.
pub struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    errors: Vec<CompileError>,
}

impl<'a> Parser<'a> {
    /// Create a new parser for a token stream.
    ///
    /// ## Parameters
    /// - `tokens`: Token stream produced by `typpy_syntax::lexer`; must end with `Eof`.
    pub fn new(tokens: &'a [Token]) -> Self {
        Self {
            tokens,
            pos: 0,
            errors: Vec::new(),
        }
    }

    /// Parse the entire token stream into a [`Program`].
    ///
    /// ## Errors
    /// Returns a list of [`CompileError`]s if parsing fails.
    pub fn parse(mut self) -> Result<Program, Vec<CompileError>> {
        let mut body = Vec::new();

        self.skip_newlines();
        // Stray top-level DEDENT can appear after error recovery.
        self.skip_dedents();

        while !self.is_at_end() {
            match self.statement() {
                Ok(stmt) => body.push(stmt),
                Err(e) => {
                    self.errors.push(e);
                    self.synchronize();
                }
            }
            self.skip_newlines();
            self.skip_dedents();
        }

        if self.errors.is_empty() {
            Ok(Program { body })
        } else {
            Err(self.errors)
        }
    }

    /// Parse a standalone expression (a string annotation such as `"list[int]"`).
    pub fn parse_expression(mut self) -> Result<Spanned<Expr>, Vec<CompileError>> {
        let result = self.expression().and_then(|expr| {
            self.skip_newlines();
            if self.is_at_end() {
                Ok(expr)
            } else {
                Err(CompileError::syntax(
                    format!("Unexpected {} after expression", describe(&self.peek().kind)),
                    self.current_span(),
                ))
            }
        });
        result.map_err(|e| vec![e])
    }
}
