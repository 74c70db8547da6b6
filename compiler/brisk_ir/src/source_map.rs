//! Line/column resolution for byte offsets.

use std::fmt;
use std::sync::Arc;

use crate::Span;

/// A resolved source location.
///
/// `line` and `column` are zero-based; [`Position::line_number`] gives the
/// one-based line shown in diagnostics.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Position {
    pub index: u32,
    pub line: u32,
    pub column: u32,
    pub file: Arc<str>,
}

impl Position {
    #[inline]
    pub fn line_number(&self) -> u32 {
        self.line + 1
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "File {}, Line {}, Column {}",
            self.file,
            self.line_number(),
            self.column + 1
        )
    }
}

/// Source text of one script plus the byte offset of every line start.
#[derive(Clone, Debug)]
pub struct SourceMap {
    name: Arc<str>,
    text: Arc<str>,
    line_starts: Vec<u32>,
}

impl SourceMap {
    pub fn new(name: &str, text: &str) -> Self {
        let mut line_starts = vec![0];
        for (i, byte) in text.bytes().enumerate() {
            if byte == b'\n' {
                line_starts.push(u32::try_from(i + 1).unwrap_or(u32::MAX));
            }
        }
        SourceMap {
            name: Arc::from(name),
            text: Arc::from(text),
            line_starts,
        }
    }

    /// Empty map used before any script has been loaded.
    pub fn empty() -> Self {
        Self::new("<none>", "")
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Resolve a byte offset. Offsets past the end clamp to the last line.
    pub fn position(&self, offset: u32) -> Position {
        let line = match self.line_starts.binary_search(&offset) {
            Ok(exact) => exact,
            Err(next) => next.saturating_sub(1),
        };
        let line_start = self.line_starts.get(line).copied().unwrap_or(0);
        Position {
            index: offset,
            line: u32::try_from(line).unwrap_or(u32::MAX),
            column: offset.saturating_sub(line_start),
            file: Arc::clone(&self.name),
        }
    }

    /// Text of the (zero-based) line containing `span.start`, without its newline.
    pub fn line_text(&self, span: Span) -> &str {
        let pos = self.position(span.start);
        let start = self.line_starts.get(pos.line as usize).copied().unwrap_or(0) as usize;
        let end = self
            .line_starts
            .get(pos.line as usize + 1)
            .map_or(self.text.len(), |&next| next as usize - 1);
        self.text.get(start..end).unwrap_or("")
    }

    pub fn slice(&self, span: Span) -> &str {
        self.text.get(span.to_range()).unwrap_or("")
    }
}

#[cfg(test)]
mod tests;
