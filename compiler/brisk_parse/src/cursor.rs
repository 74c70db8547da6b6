//! Position tracking over a token list.

use brisk_ir::{Name, Span, Token, TokenKind, TokenList};

/// Read head over a token list that always ends with `Eof`.
pub struct Cursor<'a> {
    tokens: &'a TokenList,
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(tokens: &'a TokenList) -> Self {
        debug_assert!(
            tokens.last().is_some_and(|t| t.kind == TokenKind::Eof),
            "token list must end with Eof"
        );
        Cursor { tokens, pos: 0 }
    }

    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Logically un-consume `count` tokens.
    pub fn reverse(&mut self, count: usize) {
        debug_assert!(count <= self.pos, "cannot reverse past the first token");
        self.pos -= count.min(self.pos);
    }

    #[inline]
    pub fn current(&self) -> Token {
        match self.tokens.get(self.pos) {
            Some(token) => *token,
            None => Token::new(TokenKind::Eof, self.end_span()),
        }
    }

    #[inline]
    pub fn current_kind(&self) -> TokenKind {
        self.current().kind
    }

    #[inline]
    pub fn current_span(&self) -> Span {
        self.current().span
    }

    pub fn previous_span(&self) -> Span {
        match self.pos.checked_sub(1).and_then(|i| self.tokens.get(i)) {
            Some(token) => token.span,
            None => Span::DUMMY,
        }
    }

    pub fn peek_kind(&self, offset: usize) -> TokenKind {
        self.tokens
            .get(self.pos + offset)
            .map_or(TokenKind::Eof, |t| t.kind)
    }

    #[inline]
    pub fn check(&self, kind: &TokenKind) -> bool {
        self.current_kind() == *kind
    }

    pub fn check_any(&self, kinds: &[TokenKind]) -> bool {
        let current = self.current_kind();
        kinds.contains(&current)
    }

    pub fn check_ident(&self) -> Option<Name> {
        match self.current_kind() {
            TokenKind::Ident(name) => Some(name),
            _ => None,
        }
    }

    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.check(&TokenKind::Eof)
    }

    /// Consume the current token. Never moves past `Eof`.
    pub fn advance(&mut self) -> Token {
        let token = self.current();
        if !self.is_at_end() {
            self.pos += 1;
        }
        token
    }

    /// Skip newlines, returning how many were consumed.
    pub fn skip_newlines(&mut self) -> usize {
        let mut skipped = 0;
        while self.check(&TokenKind::Newline) {
            self.pos += 1;
            skipped += 1;
        }
        skipped
    }

    fn end_span(&self) -> Span {
        self.tokens.last().map_or(Span::DUMMY, |t| t.span)
    }
}
