//! Binary-operator precedence ladder and assignment.
//!
//! ```text
//! expr   := assignment | or
//! or     := and ('||' and)*
//! and    := comp ('&&' comp)*
//! comp   := '!' comp | arith (cmp-op arith)*
//! arith  := term (('+' | '-') term)*
//! term   := factor (('*' | '/' | '%') factor)*
//! factor := ('+' | '-') factor | power
//! power  := call ('^' factor)*
//! ```

use brisk_ir::{BinaryOp, ExprId, ExprKind, Name, ScopeSel, Span, TokenKind, UnaryOp};
use brisk_stack::ensure_sufficient_stack;

use crate::{ParseError, Parser};

type Rule<'a> = fn(&mut Parser<'a>) -> Result<ExprId, ParseError>;

const OR_OPS: &[(TokenKind, BinaryOp)] = &[(TokenKind::OrOr, BinaryOp::Or)];
const AND_OPS: &[(TokenKind, BinaryOp)] = &[(TokenKind::AndAnd, BinaryOp::And)];
const COMPARISON_OPS: &[(TokenKind, BinaryOp)] = &[
    (TokenKind::EqEq, BinaryOp::Eq),
    (TokenKind::NotEq, BinaryOp::NotEq),
    (TokenKind::Lt, BinaryOp::Lt),
    (TokenKind::Gt, BinaryOp::Gt),
    (TokenKind::LtEq, BinaryOp::LtEq),
    (TokenKind::GtEq, BinaryOp::GtEq),
];
const ADDITIVE_OPS: &[(TokenKind, BinaryOp)] = &[
    (TokenKind::Plus, BinaryOp::Add),
    (TokenKind::Minus, BinaryOp::Sub),
];
const MULTIPLICATIVE_OPS: &[(TokenKind, BinaryOp)] = &[
    (TokenKind::Star, BinaryOp::Mul),
    (TokenKind::Slash, BinaryOp::Div),
    (TokenKind::Percent, BinaryOp::Mod),
];
const POWER_OPS: &[(TokenKind, BinaryOp)] = &[(TokenKind::Caret, BinaryOp::Pow)];

/// Left-hand side of an assignment, recognized speculatively.
enum AssignTarget {
    Local(Name, Span),
    Scoped(ScopeSel, Name, Span),
}

impl<'a> Parser<'a> {
    pub(crate) fn parse_expr(&mut self) -> Result<ExprId, ParseError> {
        ensure_sufficient_stack(|| {
            if self.assignment_follows() {
                let attempt = self.attempt(Self::parse_assign_target);
                if let Some(target) = self.try_register(attempt) {
                    return self.finish_assignment(target);
                }
            }
            self.parse_or()
        })
    }

    /// Whether the tokens ahead read as `<call chain> '='`. Scans without
    /// building nodes.
    fn assignment_follows(&self) -> bool {
        if !matches!(
            self.cursor.current_kind(),
            TokenKind::Ident(_) | TokenKind::Outer | TokenKind::Global
        ) {
            return false;
        }
        let mut depth = 0usize;
        let mut offset = 1;
        loop {
            match self.cursor.peek_kind(offset) {
                TokenKind::Eof => return false,
                TokenKind::LParen | TokenKind::LBracket => depth += 1,
                TokenKind::RParen | TokenKind::RBracket if depth > 0 => depth -= 1,
                _ if depth > 0 => {}
                TokenKind::Dot => {
                    if !matches!(self.cursor.peek_kind(offset + 1), TokenKind::Ident(_)) {
                        return false;
                    }
                    offset += 1;
                }
                TokenKind::Eq => return true,
                _ => return false,
            }
            offset += 1;
        }
    }

    /// `IDENT '='` or `<call chain>.IDENT '='`.
    fn parse_assign_target(&mut self) -> Result<AssignTarget, ParseError> {
        let target = self.parse_call()?;
        self.expect(&TokenKind::Eq)?;
        let expr = *self.arena.get_expr(target);
        match expr.kind {
            ExprKind::Ident(name) => Ok(AssignTarget::Local(name, expr.span)),
            ExprKind::ScopeAccess { target, member } => {
                Ok(AssignTarget::Scoped(target, member, expr.span))
            }
            _ => Err(ParseError::new("Invalid assignment target", expr.span)),
        }
    }

    fn finish_assignment(&mut self, target: AssignTarget) -> Result<ExprId, ParseError> {
        let value = self.parse_expr()?;
        let value_span = self.span_of(value);
        Ok(match target {
            AssignTarget::Local(name, span) => {
                self.alloc(ExprKind::Assign { name, value }, span.merge(value_span))
            }
            AssignTarget::Scoped(target, member, span) => self.alloc(
                ExprKind::ScopeAssign {
                    target,
                    member,
                    value,
                },
                span.merge(value_span),
            ),
        })
    }

    /// One precedence level: `operand (op right)*`, left-associative.
    ///
    /// `right` defaults to `operand`.
    fn parse_binary_level(
        &mut self,
        operand: Rule<'a>,
        ops: &[(TokenKind, BinaryOp)],
        right: Option<Rule<'a>>,
    ) -> Result<ExprId, ParseError> {
        let right = right.unwrap_or(operand);
        let mut left = operand(self)?;
        while let Some(op) = self.match_binary_op(ops) {
            self.advance();
            let rhs = right(self)?;
            let span = self.span_of(left).merge(self.span_of(rhs));
            left = self.alloc(
                ExprKind::Binary {
                    op,
                    left,
                    right: rhs,
                },
                span,
            );
        }
        Ok(left)
    }

    fn match_binary_op(&self, ops: &[(TokenKind, BinaryOp)]) -> Option<BinaryOp> {
        let current = self.cursor.current_kind();
        ops.iter()
            .find(|(kind, _)| *kind == current)
            .map(|&(_, op)| op)
    }

    fn parse_or(&mut self) -> Result<ExprId, ParseError> {
        self.parse_binary_level(Self::parse_and, OR_OPS, None)
    }

    fn parse_and(&mut self) -> Result<ExprId, ParseError> {
        self.parse_binary_level(Self::parse_comparison, AND_OPS, None)
    }

    fn parse_comparison(&mut self) -> Result<ExprId, ParseError> {
        if self.check(&TokenKind::Bang) {
            let start = self.advance();
            let operand = self.parse_comparison()?;
            let span = start.merge(self.span_of(operand));
            return Ok(self.alloc(
                ExprKind::Unary {
                    op: UnaryOp::Not,
                    operand,
                },
                span,
            ));
        }
        self.parse_binary_level(Self::parse_additive, COMPARISON_OPS, None)
    }

    fn parse_additive(&mut self) -> Result<ExprId, ParseError> {
        self.parse_binary_level(Self::parse_multiplicative, ADDITIVE_OPS, None)
    }

    fn parse_multiplicative(&mut self) -> Result<ExprId, ParseError> {
        self.parse_binary_level(Self::parse_factor, MULTIPLICATIVE_OPS, None)
    }

    fn parse_factor(&mut self) -> Result<ExprId, ParseError> {
        let op = match self.cursor.current_kind() {
            TokenKind::Minus => UnaryOp::Neg,
            TokenKind::Plus => UnaryOp::Pos,
            _ => return self.parse_power(),
        };
        let start = self.advance();
        let operand = ensure_sufficient_stack(|| self.parse_factor())?;
        let span = start.merge(self.span_of(operand));
        Ok(self.alloc(ExprKind::Unary { op, operand }, span))
    }

    fn parse_power(&mut self) -> Result<ExprId, ParseError> {
        self.parse_binary_level(Self::parse_call, POWER_OPS, Some(Self::parse_factor))
    }
}
