//! Errors surfaced by a script session.

use std::fmt::Write;

use brisk_eval::EvalError;
use brisk_ir::{Position, SourceMap, Span};
use brisk_lexer::LexError;
use brisk_parse::ParseError;
use thiserror::Error;

/// Why a script did not produce a value. Only the first error of the
/// first failing stage is reported.
#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("{error}")]
    Lex {
        error: LexError,
        position: Position,
        line: String,
    },
    #[error("{error}")]
    Parse {
        error: ParseError,
        position: Position,
        line: String,
    },
    #[error(transparent)]
    Runtime(#[from] EvalError),
}

impl ScriptError {
    pub(crate) fn lex(error: LexError, source: &SourceMap) -> Self {
        let (position, line) = locate(source, error.span);
        ScriptError::Lex {
            error,
            position,
            line,
        }
    }

    pub(crate) fn parse(error: ParseError, source: &SourceMap) -> Self {
        let (position, line) = locate(source, error.span);
        ScriptError::Parse {
            error,
            position,
            line,
        }
    }

    /// Name of the error category shown before the colon.
    pub fn title(&self) -> &'static str {
        match self {
            ScriptError::Lex { error, .. } => error.title(),
            ScriptError::Parse { .. } => "Invalid Syntax",
            ScriptError::Runtime(_) => "Runtime Error",
        }
    }

    pub fn as_runtime(&self) -> Option<&EvalError> {
        match self {
            ScriptError::Runtime(err) => Some(err),
            _ => None,
        }
    }

    /// Full diagnostic text.
    ///
    /// Lex and parse errors add their location and the offending line with
    /// a caret; runtime errors already carry a traceback.
    pub fn report(&self) -> String {
        match self {
            ScriptError::Lex {
                error,
                position,
                line,
            } => with_location(&error.to_string(), position, line),
            ScriptError::Parse {
                error,
                position,
                line,
            } => with_location(&error.to_string(), position, line),
            ScriptError::Runtime(err) => err.to_string(),
        }
    }
}

fn locate(source: &SourceMap, span: Span) -> (Position, String) {
    (source.position(span.start), source.line_text(span).to_string())
}

fn with_location(message: &str, position: &Position, line: &str) -> String {
    let mut out = format!("{message}\n{position}\n");
    if !line.is_empty() {
        let _ = writeln!(out, "    {line}");
        let _ = write!(out, "    {}^", " ".repeat(position.column as usize));
        out.push('\n');
    }
    out
}
