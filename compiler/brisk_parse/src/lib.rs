//! Recursive-descent parser for Brisk.
//!
//! Consumes a [`TokenList`] and produces a [`Program`]: an [`ExprArena`]
//! holding every node plus the id of the root statement block. Parsing
//! stops at the first error.

mod cursor;
mod error;
mod grammar;
mod outcome;

use brisk_ir::{Expr, ExprArena, ExprId, ExprKind, Span, TokenKind, TokenList};
use tracing::debug;

pub use cursor::Cursor;
pub use error::ParseError;

/// A parsed script.
#[derive(Debug)]
pub struct Program {
    pub arena: ExprArena,
    /// A [`ExprKind::Block`] of top-level statements.
    pub root: ExprId,
}

/// Parser state: a cursor over the tokens and the arena being filled.
pub struct Parser<'a> {
    cursor: Cursor<'a>,
    arena: ExprArena,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a TokenList) -> Self {
        Parser {
            cursor: Cursor::new(tokens),
            arena: ExprArena::new(),
        }
    }

    /// Parse a whole script.
    pub fn parse_program(mut self) -> Result<Program, ParseError> {
        let root = self.parse_statements(&[])?;
        if !self.cursor.is_at_end() {
            let found = self.cursor.current();
            return Err(ParseError::new(
                format!(
                    "Unexpected {}: expected an operator or end of statement",
                    found.kind.describe()
                ),
                found.span,
            ));
        }
        debug!(nodes = self.arena.len(), "parsed program");
        Ok(Program {
            arena: self.arena,
            root,
        })
    }

    // --- token helpers --------------------------------------------------

    #[inline]
    fn check(&self, kind: &TokenKind) -> bool {
        self.cursor.check(kind)
    }

    #[inline]
    fn advance(&mut self) -> Span {
        self.cursor.advance().span
    }

    /// Consume `kind` or fail with an expectation message.
    fn expect(&mut self, kind: &TokenKind) -> Result<Span, ParseError> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(ParseError::expected(
                std::slice::from_ref(kind),
                self.cursor.current_span(),
            ))
        }
    }

    fn expect_ident(&mut self) -> Result<brisk_ir::Name, ParseError> {
        match self.cursor.check_ident() {
            Some(name) => {
                self.advance();
                Ok(name)
            }
            None => Err(ParseError::expected(
                &[TokenKind::Ident(brisk_ir::Name::EMPTY)],
                self.cursor.current_span(),
            )),
        }
    }

    fn alloc(&mut self, kind: ExprKind, span: Span) -> ExprId {
        self.arena.alloc_expr(Expr::new(kind, span))
    }

    fn span_of(&self, id: ExprId) -> Span {
        self.arena.get_expr(id).span
    }
}

/// Parse a token list into a [`Program`].
pub fn parse(tokens: &TokenList) -> Result<Program, ParseError> {
    Parser::new(tokens).parse_program()
}

#[cfg(test)]
mod tests;
