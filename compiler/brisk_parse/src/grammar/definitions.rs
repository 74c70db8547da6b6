//! Function and object definitions, and `new`.

use brisk_ir::{ExprId, ExprKind, ExprRange, Name, ParamRange, ScopeSel, TokenKind};

use crate::{ParseError, Parser};

impl Parser<'_> {
    /// ```text
    /// fn NAME? '(' params ')' '->' expr
    /// fn NAME? '(' params ')' NL stmts end
    /// ```
    pub(crate) fn parse_fn(&mut self) -> Result<ExprId, ParseError> {
        let start = self.expect(&TokenKind::Fn)?;
        let name = self.cursor.check_ident();
        if name.is_some() {
            self.advance();
        }
        let params = self.parse_params()?;

        let (body, auto_return) = if self.check(&TokenKind::Arrow) {
            self.advance();
            (self.parse_expr()?, true)
        } else if self.check(&TokenKind::Newline) {
            let body = self.parse_statements(&[TokenKind::End])?;
            self.expect(&TokenKind::End)?;
            (body, false)
        } else {
            return Err(ParseError::expected(
                &[TokenKind::Arrow, TokenKind::Newline],
                self.cursor.current_span(),
            ));
        };

        let span = start.merge(self.cursor.previous_span());
        Ok(self.alloc(
            ExprKind::FuncDef {
                name,
                params,
                body,
                auto_return,
            },
            span,
        ))
    }

    /// `object NAME ('(' params ')')? NL stmts end`
    pub(crate) fn parse_object(&mut self) -> Result<ExprId, ParseError> {
        let start = self.expect(&TokenKind::Object)?;
        let name = self.expect_ident()?;
        let params = if self.check(&TokenKind::LParen) {
            self.parse_params()?
        } else {
            ParamRange::default()
        };
        if !self.check(&TokenKind::Newline) {
            return Err(ParseError::expected(
                &[TokenKind::LParen, TokenKind::Newline],
                self.cursor.current_span(),
            ));
        }
        let body = self.parse_statements(&[TokenKind::End])?;
        self.expect(&TokenKind::End)?;
        let span = start.merge(self.cursor.previous_span());
        Ok(self.alloc(ExprKind::ObjectDef { name, params, body }, span))
    }

    /// `new TARGET ('(' args ')')?` where TARGET is a name optionally
    /// qualified with `.member` steps.
    pub(crate) fn parse_new(&mut self) -> Result<ExprId, ParseError> {
        let start = self.expect(&TokenKind::New)?;
        let mut template = match self.cursor.current_kind() {
            TokenKind::Ident(name) => {
                let span = self.advance();
                self.alloc(ExprKind::Ident(name), span)
            }
            TokenKind::Outer | TokenKind::Global => self.parse_scope_keyword()?,
            _ => {
                return Err(ParseError::expected(
                    &[TokenKind::Ident(Name::EMPTY)],
                    self.cursor.current_span(),
                ))
            }
        };
        while self.check(&TokenKind::Dot) {
            self.advance();
            let member = self.expect_ident()?;
            let span = self.span_of(template).merge(self.cursor.previous_span());
            template = self.alloc(
                ExprKind::ScopeAccess {
                    target: ScopeSel::Value(template),
                    member,
                },
                span,
            );
        }
        let args = if self.check(&TokenKind::LParen) {
            self.parse_args()?
        } else {
            ExprRange::EMPTY
        };
        let span = start.merge(self.cursor.previous_span());
        Ok(self.alloc(ExprKind::NewObject { template, args }, span))
    }

    /// `'(' (IDENT (',' IDENT)*)? ')'`
    fn parse_params(&mut self) -> Result<ParamRange, ParseError> {
        self.expect(&TokenKind::LParen)?;
        let mut names = Vec::new();
        if let Some(first) = self.cursor.check_ident() {
            self.advance();
            names.push(first);
            while self.check(&TokenKind::Comma) {
                self.advance();
                names.push(self.expect_ident()?);
            }
        }
        if !self.check(&TokenKind::RParen) {
            return Err(ParseError::expected(
                &[TokenKind::RParen, TokenKind::Comma],
                self.cursor.current_span(),
            ));
        }
        self.advance();
        Ok(self.arena.alloc_params(names))
    }
}
