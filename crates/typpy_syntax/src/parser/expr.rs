/// Expression parsing methods.
///
/// Precedence, lowest to highest:
///
/// | Level          | Forms                                         |
/// |----------------|-----------------------------------------------|
/// | or             | `a or b`                                      |
/// | and            | `a and b`                                     |
/// | not            | `not a`                                       |
/// | comparison     | `==` `!=` `<` `<=` `>` `>=` `in` `not in` `is` `is not` |
/// | additive       | `+` `-`                                       |
/// | multiplicative | `*` `/` `//` `%`                              |
/// | unary          | `-a` `+a`                                     |
/// | power          | `a ** b` (right-associative)                  |
/// | postfix        | calls, subscripts, attribute access           |
/// | primary        | literals, names, parenthesized/tuple, list, dict/set |
impl<'a> Parser<'a> {
    // ========================================================================
    // Expressions
    // ========================================================================

    /// Parse a comma-separated expression list; more than one item yields an unparenthesized tuple.
    fn expression_list(&mut self) -> Result<Spanned<Expr>, CompileError> {
        let first = self.expression()?;
        if !self.check_punct(PunctuationId::Comma) {
            return Ok(first);
        }

        let start = first.span.start;
        let mut items = vec![first];
        while self.match_punct(PunctuationId::Comma) {
            if !self.is_at_expr_start() {
                break;
            }
            items.push(self.expression()?);
        }
        let end = self.prev_end();
        Ok(Spanned::new(Expr::Tuple(items), Span::new(start, end)))
    }

    fn expression(&mut self) -> Result<Spanned<Expr>, CompileError> {
        self.or_expr()
    }

    fn or_expr(&mut self) -> Result<Spanned<Expr>, CompileError> {
        let mut left = self.and_expr()?;
        while self.match_keyword(KeywordId::Or) {
            let right = self.and_expr()?;
            left = binary(left, BinaryOp::Or, right);
        }
        Ok(left)
    }

    fn and_expr(&mut self) -> Result<Spanned<Expr>, CompileError> {
        let mut left = self.not_expr()?;
        while self.match_keyword(KeywordId::And) {
            let right = self.not_expr()?;
            left = binary(left, BinaryOp::And, right);
        }
        Ok(left)
    }

    fn not_expr(&mut self) -> Result<Spanned<Expr>, CompileError> {
        if self.check_keyword(KeywordId::Not) {
            let start = self.current_span().start;
            self.advance();
            let operand = self.not_expr()?;
            let span = Span::new(start, operand.span.end);
            return Ok(Spanned::new(Expr::Unary(UnaryOp::Not, Box::new(operand)), span));
        }
        self.comparison()
    }

    fn comparison(&mut self) -> Result<Spanned<Expr>, CompileError> {
        let mut left = self.additive()?;
        while let Some(op) = self.comparison_op() {
            let right = self.additive()?;
            left = binary(left, op, right);
        }
        Ok(left)
    }

    /// Consume a comparison operator, including the two-word forms `not in` and `is not`.
    fn comparison_op(&mut self) -> Option<BinaryOp> {
        let kind = self.peek().kind.clone();
        let op = match kind {
            TokenKind::Operator(OperatorId::EqEq) => BinaryOp::Eq,
            TokenKind::Operator(OperatorId::NotEq) => BinaryOp::NotEq,
            TokenKind::Operator(OperatorId::Lt) => BinaryOp::Lt,
            TokenKind::Operator(OperatorId::LtEq) => BinaryOp::LtEq,
            TokenKind::Operator(OperatorId::Gt) => BinaryOp::Gt,
            TokenKind::Operator(OperatorId::GtEq) => BinaryOp::GtEq,
            TokenKind::Keyword(KeywordId::In) => BinaryOp::In,
            TokenKind::Keyword(KeywordId::Is) => {
                self.advance();
                return Some(if self.match_keyword(KeywordId::Not) {
                    BinaryOp::IsNot
                } else {
                    BinaryOp::Is
                });
            }
            TokenKind::Keyword(KeywordId::Not) if self.peek_next().kind.is_keyword(KeywordId::In) => {
                self.advance();
                self.advance();
                return Some(BinaryOp::NotIn);
            }
            _ => return None,
        };
        self.advance();
        Some(op)
    }

    fn additive(&mut self) -> Result<Spanned<Expr>, CompileError> {
        let mut left = self.multiplicative()?;
        loop {
            let op = if self.match_op(OperatorId::Plus) {
                BinaryOp::Add
            } else if self.match_op(OperatorId::Minus) {
                BinaryOp::Sub
            } else {
                break;
            };
            let right = self.multiplicative()?;
            left = binary(left, op, right);
        }
        Ok(left)
    }

    fn multiplicative(&mut self) -> Result<Spanned<Expr>, CompileError> {
        let mut left = self.unary()?;
        loop {
            let op = if self.match_op(OperatorId::Star) {
                BinaryOp::Mul
            } else if self.match_op(OperatorId::Slash) {
                BinaryOp::Div
            } else if self.match_op(OperatorId::SlashSlash) {
                BinaryOp::FloorDiv
            } else if self.match_op(OperatorId::Percent) {
                BinaryOp::Mod
            } else {
                break;
            };
            let right = self.unary()?;
            left = binary(left, op, right);
        }
        Ok(left)
    }

    fn unary(&mut self) -> Result<Spanned<Expr>, CompileError> {
        let op = if self.check_op(OperatorId::Minus) {
            UnaryOp::Neg
        } else if self.check_op(OperatorId::Plus) {
            UnaryOp::Pos
        } else {
            return self.power();
        };
        let start = self.current_span().start;
        self.advance();
        let operand = self.unary()?;
        let span = Span::new(start, operand.span.end);
        Ok(Spanned::new(Expr::Unary(op, Box::new(operand)), span))
    }

    fn power(&mut self) -> Result<Spanned<Expr>, CompileError> {
        let base = self.postfix()?;
        if self.match_op(OperatorId::StarStar) {
            let exponent = self.unary()?;
            return Ok(binary(base, BinaryOp::Pow, exponent));
        }
        Ok(base)
    }

    fn postfix(&mut self) -> Result<Spanned<Expr>, CompileError> {
        let mut expr = self.primary()?;
        loop {
            let start = expr.span.start;
            if self.match_punct(PunctuationId::LParen) {
                let args = self.call_args()?;
                let end = self.prev_end();
                expr = Spanned::new(Expr::Call(Box::new(expr), args), Span::new(start, end));
            } else if self.match_punct(PunctuationId::LBracket) {
                let index = self.subscript_index()?;
                self.expect_punct(PunctuationId::RBracket, "Expected ']' after subscript")?;
                let end = self.prev_end();
                expr = Spanned::new(Expr::Subscript(Box::new(expr), Box::new(index)), Span::new(start, end));
            } else if self.match_punct(PunctuationId::Dot) {
                let attr = self.identifier_spanned()?;
                let end = attr.span.end;
                expr = Spanned::new(Expr::Attribute(Box::new(expr), attr), Span::new(start, end));
            } else {
                break;
            }
        }
        Ok(expr)
    }

    /// Parse call arguments after `(`, consuming the closing `)`.
    fn call_args(&mut self) -> Result<Vec<CallArg>, CompileError> {
        let mut args = Vec::new();
        while !self.check_punct(PunctuationId::RParen) {
            if self.check_op(OperatorId::Star) || self.check_op(OperatorId::StarStar) {
                return Err(CompileError::syntax(
                    "Argument unpacking is not supported",
                    self.current_span(),
                ));
            }

            if matches!(self.peek().kind, TokenKind::Ident(_)) && self.peek_next().kind.is_operator(OperatorId::Eq) {
                let name = self.identifier_spanned()?;
                self.advance();
                let value = self.expression()?;
                args.push(CallArg::Keyword(name, value));
            } else {
                if args.iter().any(|a| matches!(a, CallArg::Keyword(..))) {
                    return Err(CompileError::syntax(
                        "Positional argument follows keyword argument",
                        self.current_span(),
                    ));
                }
                args.push(CallArg::Positional(self.expression()?));
            }

            if !self.match_punct(PunctuationId::Comma) {
                break;
            }
        }
        self.expect_punct(PunctuationId::RParen, "Expected ')' after arguments")?;
        Ok(args)
    }

    /// `x[i]` or `x[a, b]`; several comma-separated items form a tuple index.
    fn subscript_index(&mut self) -> Result<Spanned<Expr>, CompileError> {
        if self.check_punct(PunctuationId::Colon) {
            return Err(CompileError::syntax("Slices are not supported", self.current_span()));
        }
        let index = self.expression_list()?;
        if self.check_punct(PunctuationId::Colon) {
            return Err(CompileError::syntax("Slices are not supported", self.current_span()));
        }
        Ok(index)
    }

    fn primary(&mut self) -> Result<Spanned<Expr>, CompileError> {
        let token = self.peek().clone();
        let span = token.span;

        let literal = match token.kind {
            TokenKind::Int(n) => Some(Literal::Int(n)),
            TokenKind::Float(f) => Some(Literal::Float(f)),
            TokenKind::Imaginary(f) => Some(Literal::Complex(f)),
            TokenKind::Keyword(KeywordId::True) => Some(Literal::Bool(true)),
            TokenKind::Keyword(KeywordId::False) => Some(Literal::Bool(false)),
            TokenKind::Keyword(KeywordId::None) => Some(Literal::None),
            _ => None,
        };
        if let Some(literal) = literal {
            self.advance();
            return Ok(Spanned::new(Expr::Literal(literal), span));
        }

        match token.kind {
            TokenKind::Ident(name) => {
                self.advance();
                Ok(Spanned::new(Expr::Ident(name), span))
            }
            TokenKind::String(_) | TokenKind::Bytes(_) => self.string_literal(),
            TokenKind::Punctuation(PunctuationId::LParen) => self.paren_expr(),
            TokenKind::Punctuation(PunctuationId::LBracket) => self.list_expr(),
            TokenKind::Punctuation(PunctuationId::LBrace) => self.brace_expr(),
            _ => Err(self.unexpected("Expected expression")),
        }
    }

    /// `()`, `(expr)` or `(a, b, ...)`.
    fn paren_expr(&mut self) -> Result<Spanned<Expr>, CompileError> {
        let start = self.current_span().start;
        self.advance();
        if self.match_punct(PunctuationId::RParen) {
            return Ok(Spanned::new(Expr::Tuple(Vec::new()), Span::new(start, self.prev_end())));
        }

        let first = self.expression()?;
        if self.match_punct(PunctuationId::RParen) {
            // Parentheses only group; keep the inner node but widen its span.
            return Ok(Spanned::new(first.node, Span::new(start, self.prev_end())));
        }

        let mut items = vec![first];
        while self.match_punct(PunctuationId::Comma) {
            if self.check_punct(PunctuationId::RParen) {
                break;
            }
            items.push(self.expression()?);
        }
        self.expect_punct(PunctuationId::RParen, "Expected ')' after tuple")?;
        Ok(Spanned::new(Expr::Tuple(items), Span::new(start, self.prev_end())))
    }

    fn list_expr(&mut self) -> Result<Spanned<Expr>, CompileError> {
        let start = self.current_span().start;
        self.advance();
        let items = self.comma_separated(PunctuationId::RBracket)?;
        self.expect_punct(PunctuationId::RBracket, "Expected ']' after list")?;
        Ok(Spanned::new(Expr::List(items), Span::new(start, self.prev_end())))
    }

    /// `{}` (empty dict), `{k: v, ...}` or `{a, b, ...}`.
    fn brace_expr(&mut self) -> Result<Spanned<Expr>, CompileError> {
        let start = self.current_span().start;
        self.advance();
        if self.match_punct(PunctuationId::RBrace) {
            return Ok(Spanned::new(Expr::Dict(Vec::new()), Span::new(start, self.prev_end())));
        }

        let first = self.expression()?;
        if self.match_punct(PunctuationId::Colon) {
            let mut entries = vec![(first, self.expression()?)];
            while self.match_punct(PunctuationId::Comma) {
                if self.check_punct(PunctuationId::RBrace) {
                    break;
                }
                let key = self.expression()?;
                self.expect_punct(PunctuationId::Colon, "Expected ':' after dict key")?;
                entries.push((key, self.expression()?));
            }
            self.expect_punct(PunctuationId::RBrace, "Expected '}' after dict")?;
            return Ok(Spanned::new(Expr::Dict(entries), Span::new(start, self.prev_end())));
        }

        let mut items = vec![first];
        if self.match_punct(PunctuationId::Comma) {
            items.extend(self.comma_separated(PunctuationId::RBrace)?);
        }
        self.expect_punct(PunctuationId::RBrace, "Expected '}' after set")?;
        Ok(Spanned::new(Expr::Set(items), Span::new(start, self.prev_end())))
    }

    /// Expressions separated by commas up to (not including) `close`; a trailing comma is allowed.
    fn comma_separated(&mut self, close: PunctuationId) -> Result<Vec<Spanned<Expr>>, CompileError> {
        let mut items = Vec::new();
        while !self.check_punct(close) {
            items.push(self.expression()?);
            if !self.match_punct(PunctuationId::Comma) {
                break;
            }
        }
        Ok(items)
    }
}

fn binary(left: Spanned<Expr>, op: BinaryOp, right: Spanned<Expr>) -> Spanned<Expr> {
    let span = left.span.merge(right.span);
    Spanned::new(Expr::Binary(Box::new(left), op, Box::new(right)), span)
}
