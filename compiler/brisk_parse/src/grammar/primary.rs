//! Atoms and postfix chains (calls and member access).

use brisk_ir::{ExprId, ExprKind, ExprRange, ScopeSel, Span, TokenKind};

use crate::{ParseError, Parser};

/// Tokens that can start an atom, for the error message.
const ATOM_STARTS: &[TokenKind] = &[
    TokenKind::Int(0),
    TokenKind::Float(0),
    TokenKind::Ident(brisk_ir::Name::EMPTY),
    TokenKind::Plus,
    TokenKind::Minus,
    TokenKind::LParen,
    TokenKind::LBracket,
    TokenKind::If,
    TokenKind::For,
    TokenKind::While,
    TokenKind::Fn,
    TokenKind::New,
];

impl Parser<'_> {
    /// `atom ( '(' args ')' | '.' IDENT )*`
    pub(crate) fn parse_call(&mut self) -> Result<ExprId, ParseError> {
        let mut expr = self.parse_atom()?;
        loop {
            if self.check(&TokenKind::LParen) {
                let args = self.parse_args()?;
                let span = self.span_of(expr).merge(self.cursor.previous_span());
                expr = self.alloc(ExprKind::Call { callee: expr, args }, span);
            } else if self.check(&TokenKind::Dot) {
                self.advance();
                let member = self.expect_ident()?;
                let span = self.span_of(expr).merge(self.cursor.previous_span());
                expr = self.alloc(
                    ExprKind::ScopeAccess {
                        target: ScopeSel::Value(expr),
                        member,
                    },
                    span,
                );
            } else {
                return Ok(expr);
            }
        }
    }

    /// `'(' (expr (',' expr)*)? ')'`; newlines inside the parentheses are ignored.
    pub(crate) fn parse_args(&mut self) -> Result<ExprRange, ParseError> {
        self.expect(&TokenKind::LParen)?;
        let mut args = Vec::new();
        self.cursor.skip_newlines();
        if !self.check(&TokenKind::RParen) {
            loop {
                args.push(self.parse_expr()?);
                self.cursor.skip_newlines();
                if self.check(&TokenKind::Comma) {
                    self.advance();
                    self.cursor.skip_newlines();
                } else {
                    break;
                }
            }
        }
        if !self.check(&TokenKind::RParen) {
            return Err(ParseError::expected(
                &[TokenKind::RParen, TokenKind::Comma],
                self.cursor.current_span(),
            ));
        }
        self.advance();
        Ok(self.arena.alloc_expr_list(args))
    }

    fn parse_atom(&mut self) -> Result<ExprId, ParseError> {
        let token = self.cursor.current();
        let literal = match token.kind {
            TokenKind::Int(n) => Some(ExprKind::Int(n)),
            TokenKind::Float(bits) => Some(ExprKind::Float(bits)),
            TokenKind::Str(name) => Some(ExprKind::Str(name)),
            TokenKind::True => Some(ExprKind::Bool(true)),
            TokenKind::False => Some(ExprKind::Bool(false)),
            TokenKind::Null => Some(ExprKind::Null),
            TokenKind::Ident(name) => Some(ExprKind::Ident(name)),
            _ => None,
        };
        if let Some(kind) = literal {
            self.advance();
            return Ok(self.alloc(kind, token.span));
        }

        match token.kind {
            TokenKind::Outer | TokenKind::Global => self.parse_scope_keyword(),
            TokenKind::LParen => {
                self.advance();
                let inner = self.parse_expr()?;
                self.expect(&TokenKind::RParen)?;
                Ok(inner)
            }
            TokenKind::LBracket => self.parse_list(),
            TokenKind::If => self.parse_if(),
            TokenKind::For => self.parse_for(),
            TokenKind::While => self.parse_while(),
            TokenKind::Fn => self.parse_fn(),
            TokenKind::Object => self.parse_object(),
            TokenKind::New => self.parse_new(),
            _ => Err(ParseError::expected(ATOM_STARTS, token.span)),
        }
    }

    /// `('outer' | 'global') '.' IDENT`
    pub(crate) fn parse_scope_keyword(&mut self) -> Result<ExprId, ParseError> {
        let start = self.cursor.current_span();
        let target = if self.check(&TokenKind::Outer) {
            ScopeSel::Outer
        } else {
            ScopeSel::Global
        };
        self.advance();
        self.expect(&TokenKind::Dot)?;
        let member = self.expect_ident()?;
        let span = start.merge(self.cursor.previous_span());
        Ok(self.alloc(ExprKind::ScopeAccess { target, member }, span))
    }

    /// `'[' (expr (',' expr)*)? ']'`
    fn parse_list(&mut self) -> Result<ExprId, ParseError> {
        let start = self.expect(&TokenKind::LBracket)?;
        let mut items = Vec::new();
        self.cursor.skip_newlines();
        if !self.check(&TokenKind::RBracket) {
            loop {
                items.push(self.parse_expr()?);
                self.cursor.skip_newlines();
                if self.check(&TokenKind::Comma) {
                    self.advance();
                    self.cursor.skip_newlines();
                } else {
                    break;
                }
            }
        }
        if !self.check(&TokenKind::RBracket) {
            return Err(ParseError::expected(
                &[TokenKind::RBracket, TokenKind::Comma],
                self.cursor.current_span(),
            ));
        }
        let end = self.advance();
        let range = self.arena.alloc_expr_list(items);
        Ok(self.alloc(ExprKind::List(range), Span::merge(start, end)))
    }
}
