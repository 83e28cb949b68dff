/// Parse a token stream into an AST [`Program`].
///
/// This is the main public entrypoint for parsing.
///
/// ## Errors
/// Returns `Err(Vec<CompileError>)` if parsing fails.
#[tracing::instrument(skip_all, fields(token_count = tokens.len()))]
pub fn parse(tokens: &[Token]) -> Result<Program, Vec<CompileError>> {
    Parser::new(tokens).parse()
}

/// Lex and parse a standalone expression, such as the body of a string annotation.
///
/// Spans in the result are relative to `source`.
pub fn parse_expression(source: &str) -> Result<Spanned<Expr>, Vec<CompileError>> {
    let tokens = crate::lexer::lex(source)?;
    Parser::new(&tokens).parse_expression()
}
