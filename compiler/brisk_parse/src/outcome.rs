//! Speculative parsing.
//!
//! An [`Attempt`] records how many tokens a production consumed before it
//! succeeded or failed. [`Parser::try_register`] keeps a successful result
//! and, on failure, reverses the cursor by that advance count so the caller
//! can try another production sharing the same prefix (for example `x = 1`
//! versus `x + 1`).
//!
//! Nodes allocated during a failed attempt stay in the arena unreferenced.

use crate::{ParseError, Parser};

/// Result of a speculative production plus the tokens it consumed.
pub(crate) struct Attempt<T> {
    pub(crate) result: Result<T, ParseError>,
    pub(crate) advance_count: usize,
}

impl Parser<'_> {
    /// Run `rule`, recording how far it advanced.
    pub(crate) fn attempt<T>(
        &mut self,
        rule: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Attempt<T> {
        let start = self.cursor.position();
        let result = rule(self);
        Attempt {
            result,
            advance_count: self.cursor.position() - start,
        }
    }

    /// Keep the attempt's value, or rewind over everything it consumed.
    pub(crate) fn try_register<T>(&mut self, attempt: Attempt<T>) -> Option<T> {
        match attempt.result {
            Ok(value) => Some(value),
            Err(err) => {
                tracing::trace!(
                    rewind = attempt.advance_count,
                    reason = %err.message,
                    "speculative production failed"
                );
                self.cursor.reverse(attempt.advance_count);
                None
            }
        }
    }
}
