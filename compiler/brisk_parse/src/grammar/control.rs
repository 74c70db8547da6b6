//! `if`, `while` and `for`.

use brisk_ir::{ExprId, ExprKind, IfBranch, TokenKind};

use crate::{ParseError, Parser};

const BRANCH_END: &[TokenKind] = &[TokenKind::End, TokenKind::Elif, TokenKind::Else];
const BLOCK_END: &[TokenKind] = &[TokenKind::End];

impl Parser<'_> {
    /// ```text
    /// if cond then stmt (elif cond then stmt)* (else stmt)?
    /// if cond then NL stmts (elif cond then NL stmts)* (else NL stmts)? end
    /// ```
    pub(crate) fn parse_if(&mut self) -> Result<ExprId, ParseError> {
        let start = self.expect(&TokenKind::If)?;
        let mut branches = Vec::new();
        let mut else_branch = None;
        let mut inline = None;

        loop {
            let cond = self.parse_expr()?;
            self.expect(&TokenKind::Then)?;
            let (body, is_inline) = self.parse_body(BRANCH_END)?;
            inline.get_or_insert(is_inline);
            branches.push(IfBranch { cond, body });

            if self.check(&TokenKind::Elif) {
                self.advance();
                continue;
            }
            if self.check(&TokenKind::Else) {
                self.advance();
                let (body, else_inline) = self.parse_body(BLOCK_END)?;
                if !else_inline {
                    self.expect(&TokenKind::End)?;
                }
                else_branch = Some(body);
            } else if !is_inline {
                self.expect(&TokenKind::End)?;
            }
            break;
        }

        let span = start.merge(self.cursor.previous_span());
        let branches = self.arena.alloc_branches(branches);
        Ok(self.alloc(
            ExprKind::If {
                branches,
                else_branch,
                inline: inline.unwrap_or(true),
            },
            span,
        ))
    }

    /// `while cond do (stmt | NL stmts end)`
    pub(crate) fn parse_while(&mut self) -> Result<ExprId, ParseError> {
        let start = self.expect(&TokenKind::While)?;
        let cond = self.parse_expr()?;
        self.expect(&TokenKind::Do)?;
        let (body, inline) = self.parse_loop_body()?;
        let span = start.merge(self.cursor.previous_span());
        Ok(self.alloc(ExprKind::While { cond, body, inline }, span))
    }

    /// `for IDENT = start to end (step s)? do (stmt | NL stmts end)`
    pub(crate) fn parse_for(&mut self) -> Result<ExprId, ParseError> {
        let start_span = self.expect(&TokenKind::For)?;
        let var = self.expect_ident()?;
        self.expect(&TokenKind::Eq)?;
        let start = self.parse_expr()?;
        self.expect(&TokenKind::To)?;
        let end = self.parse_expr()?;
        let step = if self.check(&TokenKind::Step) {
            self.advance();
            Some(self.parse_expr()?)
        } else {
            None
        };
        self.expect(&TokenKind::Do)?;
        let (body, inline) = self.parse_loop_body()?;
        let span = start_span.merge(self.cursor.previous_span());
        Ok(self.alloc(
            ExprKind::For {
                var,
                start,
                end,
                step,
                body,
                inline,
            },
            span,
        ))
    }

    fn parse_loop_body(&mut self) -> Result<(ExprId, bool), ParseError> {
        let (body, inline) = self.parse_body(BLOCK_END)?;
        if !inline {
            self.expect(&TokenKind::End)?;
        }
        Ok((body, inline))
    }
}
