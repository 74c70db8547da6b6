//! Tokenizer for Brisk scripts.
//!
//! A logos-generated scanner produces [`RawToken`]s, which are then decoded
//! (numbers parsed, strings unescaped and interned, identifiers checked
//! against the keyword table) into a [`TokenList`]. Unrecognized input is
//! recorded as a [`LexError`] and scanning continues, so one pass reports
//! every problem; callers act on the first.

mod lex_error;

use brisk_ir::{Span, StringInterner, Token, TokenKind, TokenList};
use logos::Logos;

pub use lex_error::{LexError, LexErrorKind};

/// Raw token from logos, before decoding.
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
#[logos(skip r"[ \t\r]+")]
#[logos(skip r"#[^\n]*")]
enum RawToken {
    #[token("\n")]
    #[token(";")]
    Newline,

    #[regex(r"[0-9]+")]
    Int,

    #[regex(r"[0-9]+\.[0-9]*")]
    Float,

    #[regex(r#""([^"\\\n]|\\.|\\\n)*""#)]
    Str,

    // Same body without the closing quote; only wins when the quote is missing.
    #[regex(r#""([^"\\\n]|\\.|\\\n)*"#)]
    UnterminatedStr,

    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Ident,

    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("^")]
    Caret,
    #[token("=")]
    Eq,
    #[token("==")]
    EqEq,
    #[token("!=")]
    NotEq,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token("<=")]
    LtEq,
    #[token(">=")]
    GtEq,
    #[token("->")]
    Arrow,
    #[token("&&")]
    AndAnd,
    #[token("||")]
    OrOr,
    #[token("!")]
    Bang,

    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token(",")]
    Comma,
    #[token(".")]
    Dot,
}

/// Tokens plus every error found while scanning.
#[derive(Clone, Debug, Default)]
pub struct LexOutput {
    pub tokens: TokenList,
    pub errors: Vec<LexError>,
}

impl LexOutput {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// The error reported to callers.
    pub fn first_error(&self) -> Option<&LexError> {
        self.errors.first()
    }

    /// Convert into the first-error-wins result used by the session.
    pub fn into_result(self) -> Result<TokenList, LexError> {
        match self.errors.into_iter().next() {
            Some(err) => Err(err),
            None => Ok(self.tokens),
        }
    }
}

/// Scan `source` into tokens. The token list always ends with `Eof`.
pub fn tokenize(source: &str, interner: &StringInterner) -> LexOutput {
    let mut out = LexOutput::default();
    let mut logos = RawToken::lexer(source);

    while let Some(result) = logos.next() {
        let span = Span::from_range(logos.span());
        let slice = logos.slice();
        match result {
            Ok(raw) => match decode(raw, slice, interner) {
                Ok(kind) => out.tokens.push(Token::new(kind, span)),
                Err(kind) => out.errors.push(LexError::new(kind, span)),
            },
            Err(()) => {
                let ch = slice.chars().next().unwrap_or('\0');
                out.errors
                    .push(LexError::new(LexErrorKind::IllegalCharacter(ch), span));
            }
        }
    }

    let eof = Span::point(u32::try_from(source.len()).unwrap_or(u32::MAX));
    out.tokens.push(Token::new(TokenKind::Eof, eof));
    out
}

fn decode(raw: RawToken, slice: &str, interner: &StringInterner) -> Result<TokenKind, LexErrorKind> {
    let kind = match raw {
        RawToken::Newline => TokenKind::Newline,
        RawToken::Int => TokenKind::Int(
            slice
                .parse::<i64>()
                .map_err(|_| LexErrorKind::IntegerTooLarge)?,
        ),
        RawToken::Float => TokenKind::Float(
            slice
                .parse::<f64>()
                .map_err(|_| LexErrorKind::InvalidFloat)?
                .to_bits(),
        ),
        RawToken::Str => {
            let body = &slice[1..slice.len() - 1];
            TokenKind::Str(interner.intern(&unescape(body)))
        }
        RawToken::UnterminatedStr => return Err(LexErrorKind::UnterminatedString),
        RawToken::Ident => {
            TokenKind::keyword(slice).unwrap_or_else(|| TokenKind::Ident(interner.intern(slice)))
        }
        RawToken::Plus => TokenKind::Plus,
        RawToken::Minus => TokenKind::Minus,
        RawToken::Star => TokenKind::Star,
        RawToken::Slash => TokenKind::Slash,
        RawToken::Percent => TokenKind::Percent,
        RawToken::Caret => TokenKind::Caret,
        RawToken::Eq => TokenKind::Eq,
        RawToken::EqEq => TokenKind::EqEq,
        RawToken::NotEq => TokenKind::NotEq,
        RawToken::Lt => TokenKind::Lt,
        RawToken::Gt => TokenKind::Gt,
        RawToken::LtEq => TokenKind::LtEq,
        RawToken::GtEq => TokenKind::GtEq,
        RawToken::Arrow => TokenKind::Arrow,
        RawToken::AndAnd => TokenKind::AndAnd,
        RawToken::OrOr => TokenKind::OrOr,
        RawToken::Bang => TokenKind::Bang,
        RawToken::LParen => TokenKind::LParen,
        RawToken::RParen => TokenKind::RParen,
        RawToken::LBracket => TokenKind::LBracket,
        RawToken::RBracket => TokenKind::RBracket,
        RawToken::Comma => TokenKind::Comma,
        RawToken::Dot => TokenKind::Dot,
    };
    Ok(kind)
}

/// Resolve escape sequences. Unknown escapes keep the escaped character.
fn unescape(body: &str) -> String {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('0') => out.push('\0'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}
