//! Parse errors.

use std::fmt;

use brisk_ir::{Span, TokenKind};

/// An `Invalid Syntax` error at the offending token.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseError {
    pub message: String,
    pub span: Span,
}

impl ParseError {
    #[cold]
    pub fn new(message: impl Into<String>, span: Span) -> Self {
        ParseError {
            message: message.into(),
            span,
        }
    }

    /// `Expected 'a'`, `Expected 'a' or 'b'`, `Expected 'a', 'b' or 'c'`.
    #[cold]
    pub fn expected(kinds: &[TokenKind], span: Span) -> Self {
        let names: Vec<&str> = kinds.iter().map(TokenKind::describe).collect();
        let list = match names.split_last() {
            Some((last, [])) => (*last).to_string(),
            Some((last, init)) => format!("{} or {last}", init.join(", ")),
            None => "more input".to_string(),
        };
        Self::new(format!("Expected {list}"), span)
    }

    pub fn title(&self) -> &'static str {
        "Invalid Syntax"
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.title(), self.message)
    }
}

impl std::error::Error for ParseError {}
