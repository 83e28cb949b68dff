/// Declaration parsing methods.
///
/// This chunk parses decorated and plain `def` / `class` statements, parameter lists and
/// `import` / `from ... import` statements.
///
/// ## Notes
/// - Definitions are statements here: they can appear at module level, in class bodies and
///   nested inside functions or `if` blocks.
impl<'a> Parser<'a> {
    // ========================================================================
    // Declarations
    // ========================================================================

    fn decorators(&mut self) -> Result<Vec<Spanned<Expr>>, CompileError> {
        let mut decorators = Vec::new();
        while self.match_token(&TokenKind::At) {
            decorators.push(self.expression()?);
            self.expect(&TokenKind::Newline, "Expected newline after decorator")?;
            self.skip_newlines();
        }
        Ok(decorators)
    }

    /// Parse a `def` or `class`, possibly preceded by decorators.
    fn definition(&mut self) -> Result<Statement, CompileError> {
        let decorators = self.decorators()?;
        if self.check_keyword(KeywordId::Def) {
            Ok(Statement::FunctionDef(self.function_def(decorators)?))
        } else if self.check_keyword(KeywordId::Class) {
            Ok(Statement::ClassDef(self.class_def(decorators)?))
        } else {
            Err(self.unexpected("Expected 'def' or 'class' after decorator"))
        }
    }

    fn function_def(&mut self, decorators: Vec<Spanned<Expr>>) -> Result<FunctionDef, CompileError> {
        self.expect_keyword(KeywordId::Def, "Expected 'def'")?;
        let name = self.identifier_spanned()?;
        self.expect_punct(PunctuationId::LParen, "Expected '(' after function name")?;
        let params = self.params()?;
        self.expect_punct(PunctuationId::RParen, "Expected ')' after parameters")?;

        let returns = if self.match_punct(PunctuationId::Arrow) {
            Some(self.expression()?)
        } else {
            None
        };

        self.expect_punct(PunctuationId::Colon, "Expected ':' after function signature")?;
        let body = self.suite()?;

        Ok(FunctionDef {
            decorators,
            name,
            params,
            returns,
            body,
        })
    }

    fn params(&mut self) -> Result<Vec<Spanned<Param>>, CompileError> {
        let mut params = Vec::new();
        let mut keyword_only = false;
        while !self.check_punct(PunctuationId::RParen) {
            // Positional-only marker
            if self.match_op(OperatorId::Slash) {
                if !self.match_punct(PunctuationId::Comma) {
                    break;
                }
                continue;
            }

            let start = self.current_span().start;
            let kind = if self.match_op(OperatorId::Star) {
                keyword_only = true;
                // Bare `*` only marks the following parameters keyword-only.
                if self.check_punct(PunctuationId::Comma) {
                    self.advance();
                    continue;
                }
                ParamKind::VarPositional
            } else if self.match_op(OperatorId::StarStar) {
                ParamKind::VarKeyword
            } else if keyword_only {
                ParamKind::KeywordOnly
            } else {
                ParamKind::Regular
            };

            let name = self.identifier()?;
            let annotation = if self.match_punct(PunctuationId::Colon) {
                Some(self.expression()?)
            } else {
                None
            };
            let default = if self.match_op(OperatorId::Eq) {
                Some(self.expression()?)
            } else {
                None
            };

            let end = self.prev_end();
            params.push(Spanned::new(
                Param {
                    name,
                    kind,
                    annotation,
                    default,
                },
                Span::new(start, end),
            ));

            if !self.match_punct(PunctuationId::Comma) {
                break;
            }
        }
        Ok(params)
    }

    fn class_def(&mut self, decorators: Vec<Spanned<Expr>>) -> Result<ClassDef, CompileError> {
        self.expect_keyword(KeywordId::Class, "Expected 'class'")?;
        let name = self.identifier_spanned()?;

        let mut bases = Vec::new();
        if self.match_punct(PunctuationId::LParen) {
            // Class keywords such as `metaclass=...` do not contribute bases.
            for arg in self.call_args()? {
                if let CallArg::Positional(base) = arg {
                    bases.push(base);
                }
            }
        }

        self.expect_punct(PunctuationId::Colon, "Expected ':' after class header")?;
        let body = self.suite()?;

        Ok(ClassDef {
            decorators,
            name,
            bases,
            body,
        })
    }

    // ========================================================================
    // Imports
    // ========================================================================

    fn import_stmt(&mut self) -> Result<Statement, CompileError> {
        if self.match_keyword(KeywordId::Import) {
            let module = self.dotted_name()?;
            let alias = if self.match_keyword(KeywordId::As) {
                Some(self.identifier()?)
            } else {
                None
            };
            return Ok(Statement::Import(ImportStmt {
                level: 0,
                module,
                alias,
                names: Vec::new(),
            }));
        }

        self.expect_keyword(KeywordId::From, "Expected 'import' or 'from'")?;
        let mut level = 0;
        loop {
            if self.match_punct(PunctuationId::Dot) {
                level += 1;
            } else if self.match_punct(PunctuationId::Ellipsis) {
                level += 3;
            } else {
                break;
            }
        }
        let module = if level > 0 && self.check_keyword(KeywordId::Import) {
            Vec::new()
        } else {
            self.dotted_name()?
        };
        self.expect_keyword(KeywordId::Import, "Expected 'import' after module path")?;

        let parenthesized = self.match_punct(PunctuationId::LParen);
        let mut names = Vec::new();
        if self.match_op(OperatorId::Star) {
            names.push(("*".to_string(), None));
        } else {
            loop {
                let name = self.identifier()?;
                let alias = if self.match_keyword(KeywordId::As) {
                    Some(self.identifier()?)
                } else {
                    None
                };
                names.push((name, alias));
                if !self.match_punct(PunctuationId::Comma) {
                    break;
                }
                if parenthesized && self.check_punct(PunctuationId::RParen) {
                    break;
                }
            }
        }
        if parenthesized {
            self.expect_punct(PunctuationId::RParen, "Expected ')' after imported names")?;
        }

        Ok(Statement::Import(ImportStmt {
            level,
            module,
            alias: None,
            names,
        }))
    }

    fn dotted_name(&mut self) -> Result<Vec<Ident>, CompileError> {
        let mut segments = vec![self.identifier()?];
        while self.match_punct(PunctuationId::Dot) {
            segments.push(self.identifier()?);
        }
        Ok(segments)
    }
}
