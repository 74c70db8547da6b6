//! Statement sequences and statement keywords.

use brisk_ir::{ExprId, ExprKind, Span, TokenKind};

use crate::{ParseError, Parser};

impl Parser<'_> {
    /// Newline-separated statements up to `Eof` or one of `terminators`
    /// (which is left for the caller to consume).
    pub(crate) fn parse_statements(
        &mut self,
        terminators: &[TokenKind],
    ) -> Result<ExprId, ParseError> {
        let start = self.cursor.current_span();
        self.cursor.skip_newlines();

        let mut statements = Vec::new();
        while !self.cursor.is_at_end() && !self.cursor.check_any(terminators) {
            statements.push(self.parse_statement()?);
            if self.cursor.skip_newlines() == 0 {
                break;
            }
        }

        let span = match (statements.first(), statements.last()) {
            (Some(&first), Some(&last)) => self.span_of(first).merge(self.span_of(last)),
            _ => Span::point(start.start),
        };
        let list = self.arena.alloc_expr_list(statements);
        Ok(self.alloc(ExprKind::Block(list), span))
    }

    pub(crate) fn parse_statement(&mut self) -> Result<ExprId, ParseError> {
        let start = self.cursor.current_span();
        match self.cursor.current_kind() {
            TokenKind::Return => {
                self.advance();
                // `return` may stand alone; an expression is optional.
                let attempt = self.attempt(Self::parse_expr);
                let value = self.try_register(attempt);
                let span = value.map_or(start, |v| start.merge(self.span_of(v)));
                Ok(self.alloc(ExprKind::Return(value), span))
            }
            TokenKind::Break => {
                self.advance();
                Ok(self.alloc(ExprKind::Break, start))
            }
            TokenKind::Continue => {
                self.advance();
                Ok(self.alloc(ExprKind::Continue, start))
            }
            _ => self.parse_expr(),
        }
    }

    /// Body after `then`, `else` or `do`.
    ///
    /// A newline opens a block that runs until one of `terminators`;
    /// anything else is a single inline statement. Returns the body and
    /// whether it was inline.
    pub(crate) fn parse_body(
        &mut self,
        terminators: &[TokenKind],
    ) -> Result<(ExprId, bool), ParseError> {
        if self.check(&TokenKind::Newline) {
            Ok((self.parse_statements(terminators)?, false))
        } else {
            Ok((self.parse_statement()?, true))
        }
    }
}
