/// Statement parsing methods.
///
/// This chunk parses statement forms (e.g. `if`, `while`, `for`, `return`, assignments)
/// as well as indentation-based blocks.
///
/// ## Notes
/// - Block parsing relies on `Indent` / `Dedent` layout tokens produced by the lexer.
/// - A suite may also be a single simple statement on the header line (`def f(): pass`).
impl<'a> Parser<'a> {
    // ========================================================================
    // Statements
    // ========================================================================

    /// Parse the body after a compound statement header's `:`.
    fn suite(&mut self) -> Result<Vec<Spanned<Statement>>, CompileError> {
        if !self.match_token(&TokenKind::Newline) {
            return Ok(vec![self.statement()?]);
        }
        self.skip_newlines();
        self.expect(&TokenKind::Indent, "Expected indented block")?;
        let body = self.block()?;
        if !self.is_at_end() {
            self.expect(&TokenKind::Dedent, "Expected dedent after block")?;
        }
        Ok(body)
    }

    fn block(&mut self) -> Result<Vec<Spanned<Statement>>, CompileError> {
        let mut stmts = Vec::new();
        self.skip_newlines();
        while !self.check(&TokenKind::Dedent) && !self.is_at_end() {
            stmts.push(self.statement()?);
            self.skip_newlines();
        }
        Ok(stmts)
    }

    fn statement(&mut self) -> Result<Spanned<Statement>, CompileError> {
        let start = self.current_span().start;

        let compound = if self.check(&TokenKind::At)
            || self.check_keyword(KeywordId::Def)
            || self.check_keyword(KeywordId::Class)
        {
            Some(self.definition()?)
        } else if self.check_keyword(KeywordId::If) {
            Some(self.if_stmt()?)
        } else if self.check_keyword(KeywordId::While) {
            Some(self.while_stmt()?)
        } else if self.check_keyword(KeywordId::For) {
            Some(self.for_stmt()?)
        } else {
            None
        };

        if let Some(stmt) = compound {
            let end = self.prev_end();
            return Ok(Spanned::new(stmt, Span::new(start, end)));
        }

        let stmt = self.simple_statement()?;
        let end = self.prev_end();
        self.end_of_statement()?;
        Ok(Spanned::new(stmt, Span::new(start, end)))
    }

    fn simple_statement(&mut self) -> Result<Statement, CompileError> {
        if self.match_keyword(KeywordId::Return) {
            let value = if self.is_at_expr_start() {
                Some(self.expression_list()?)
            } else {
                None
            };
            Ok(Statement::Return(value))
        } else if self.match_keyword(KeywordId::Pass) {
            Ok(Statement::Pass)
        } else if self.match_keyword(KeywordId::Break) {
            Ok(Statement::Break)
        } else if self.match_keyword(KeywordId::Continue) {
            Ok(Statement::Continue)
        } else if self.check_keyword(KeywordId::Import) || self.check_keyword(KeywordId::From) {
            self.import_stmt()
        } else if self.check_punct(PunctuationId::Ellipsis) {
            // `...` as a placeholder body
            self.advance();
            Ok(Statement::Pass)
        } else if self.is_at_expr_start() {
            self.assignment_or_expr_stmt()
        } else {
            Err(self.unexpected("Expected statement"))
        }
    }

    fn if_stmt(&mut self) -> Result<Statement, CompileError> {
        self.expect_keyword(KeywordId::If, "Expected 'if'")?;
        let condition = self.expression()?;
        self.expect_punct(PunctuationId::Colon, "Expected ':' after if condition")?;
        let then_body = self.suite()?;

        let mut elif_branches = vec![];
        while self.match_keyword(KeywordId::Elif) {
            let elif_condition = self.expression()?;
            self.expect_punct(PunctuationId::Colon, "Expected ':' after elif condition")?;
            let elif_body = self.suite()?;
            elif_branches.push((elif_condition, elif_body));
        }

        let else_body = if self.match_keyword(KeywordId::Else) {
            self.expect_punct(PunctuationId::Colon, "Expected ':' after else")?;
            Some(self.suite()?)
        } else {
            None
        };

        Ok(Statement::If(IfStmt {
            condition,
            then_body,
            elif_branches,
            else_body,
        }))
    }

    fn while_stmt(&mut self) -> Result<Statement, CompileError> {
        self.expect_keyword(KeywordId::While, "Expected 'while'")?;
        let condition = self.expression()?;
        self.expect_punct(PunctuationId::Colon, "Expected ':' after while condition")?;
        let body = self.suite()?;
        Ok(Statement::While(WhileStmt { condition, body }))
    }

    fn for_stmt(&mut self) -> Result<Statement, CompileError> {
        self.expect_keyword(KeywordId::For, "Expected 'for'")?;
        let parenthesized = self.match_punct(PunctuationId::LParen);
        let mut targets = vec![self.identifier_spanned()?];
        while self.match_punct(PunctuationId::Comma) {
            if self.check_keyword(KeywordId::In) || self.check_punct(PunctuationId::RParen) {
                break;
            }
            targets.push(self.identifier_spanned()?);
        }
        if parenthesized {
            self.expect_punct(PunctuationId::RParen, "Expected ')' after loop targets")?;
        }
        self.expect_keyword(KeywordId::In, "Expected 'in' after for variable")?;
        let iter = self.expression_list()?;
        self.expect_punct(PunctuationId::Colon, "Expected ':' after for expression")?;
        let body = self.suite()?;
        Ok(Statement::For(ForStmt { targets, iter, body }))
    }

    // ========================================================================
    // Assignments
    // ========================================================================

    fn assignment_or_expr_stmt(&mut self) -> Result<Statement, CompileError> {
        let first = self.expression_list()?;

        // name: annotation [= value]
        if self.check_punct(PunctuationId::Colon) {
            let Expr::Ident(name) = &first.node else {
                return Err(CompileError::syntax(
                    "Only single names can be annotated",
                    first.span,
                ));
            };
            let target = Spanned::new(name.clone(), first.span);
            self.advance();
            let annotation = self.expression()?;
            let value = if self.match_op(OperatorId::Eq) {
                Some(self.expression_list()?)
            } else {
                None
            };
            return Ok(Statement::AnnAssign(AnnAssignStmt {
                target,
                annotation,
                value,
            }));
        }

        // name += value
        if let Some(op) = self.augmented_op() {
            self.advance();
            if !matches!(first.node, Expr::Ident(_) | Expr::Attribute(..) | Expr::Subscript(..)) {
                return Err(CompileError::syntax(
                    format!("Illegal target for augmented assignment: {}", first.node.kind_name()),
                    first.span,
                ));
            }
            let value = self.expression_list()?;
            return Ok(Statement::AugAssign(AugAssignStmt {
                target: first,
                op,
                value,
            }));
        }

        if !self.check_op(OperatorId::Eq) {
            return Ok(Statement::Expr(first));
        }

        // a = b = value
        let mut targets = vec![assign_target(first)?];
        self.advance();
        let mut value = self.expression_list()?;
        while self.match_op(OperatorId::Eq) {
            targets.push(assign_target(value)?);
            value = self.expression_list()?;
        }

        Ok(Statement::Assign(AssignStmt { targets, value }))
    }

    fn augmented_op(&self) -> Option<BinaryOp> {
        let TokenKind::Operator(id) = self.peek().kind else {
            return None;
        };
        match id {
            OperatorId::PlusEq => Some(BinaryOp::Add),
            OperatorId::MinusEq => Some(BinaryOp::Sub),
            OperatorId::StarEq => Some(BinaryOp::Mul),
            OperatorId::SlashEq => Some(BinaryOp::Div),
            OperatorId::SlashSlashEq => Some(BinaryOp::FloorDiv),
            OperatorId::PercentEq => Some(BinaryOp::Mod),
            _ => None,
        }
    }
}

/// Convert a parsed expression into an assignment target.
fn assign_target(expr: Spanned<Expr>) -> Result<Spanned<AssignTarget>, CompileError> {
    let span = expr.span;
    let target = match expr.node {
        Expr::Ident(name) => AssignTarget::Name(name),
        Expr::Tuple(items) | Expr::List(items) if items.iter().all(|i| matches!(i.node, Expr::Ident(_))) => {
            let names = items
                .into_iter()
                .filter_map(|item| match item.node {
                    Expr::Ident(name) => Some(Spanned::new(name, item.span)),
                    _ => None,
                })
                .collect();
            AssignTarget::Tuple(names)
        }
        node @ (Expr::Attribute(..) | Expr::Subscript(..) | Expr::Tuple(_) | Expr::List(_)) => AssignTarget::Expr(node),
        other => {
            return Err(CompileError::syntax(
                format!("Cannot assign to {}", other.kind_name()),
                span,
            ));
        }
    };
    Ok(Spanned::new(target, span))
}
