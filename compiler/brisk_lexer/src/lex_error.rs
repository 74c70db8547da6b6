//! Lexer errors.

use std::fmt;

use brisk_ir::Span;

/// A lexing failure at `span`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LexError {
    pub kind: LexErrorKind,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LexErrorKind {
    /// A character that starts no token.
    IllegalCharacter(char),
    /// End of line or input before the closing `"`.
    UnterminatedString,
    /// Integer literal outside the `i64` range.
    IntegerTooLarge,
    /// Float literal that could not be decoded.
    InvalidFloat,
}

impl LexError {
    #[cold]
    pub fn new(kind: LexErrorKind, span: Span) -> Self {
        LexError { kind, span }
    }

    /// The `<ErrorKind>` part of the rendered message.
    pub fn title(&self) -> &'static str {
        match self.kind {
            LexErrorKind::IllegalCharacter(_) => "Illegal Character",
            LexErrorKind::UnterminatedString => "Unterminated String",
            LexErrorKind::IntegerTooLarge | LexErrorKind::InvalidFloat => "Illegal Number",
        }
    }

    pub fn details(&self) -> String {
        match self.kind {
            LexErrorKind::IllegalCharacter(ch) => format!("'{}'", ch.escape_default()),
            LexErrorKind::UnterminatedString => "expected closing '\"'".to_string(),
            LexErrorKind::IntegerTooLarge => "integer literal does not fit in 64 bits".to_string(),
            LexErrorKind::InvalidFloat => "malformed float literal".to_string(),
        }
    }
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.title(), self.details())
    }
}

impl std::error::Error for LexError {}

#[cfg(test)]
mod tests;
