//! Stack growth for deeply nested scripts.
//!
//! The parser and the tree-walking evaluator recurse once per nesting level
//! of the source (and once per script-level function call). Both wrap their
//! recursive entry points in [`ensure_sufficient_stack`] so a deeply nested
//! expression or a deep recursive script grows the native stack instead of
//! overflowing it.

/// Grow when less than this much stack remains.
const RED_ZONE: usize = 128 * 1024;

/// Size of each newly allocated stack segment.
const SEGMENT_SIZE: usize = 2 * 1024 * 1024;

/// Run `f`, first switching to a fresh stack segment if the current one is
/// nearly exhausted.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT_SIZE, f)
}

/// WASM manages its own stack; run `f` directly.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

/// Remaining stack in bytes, when the platform can report it.
#[cfg(not(target_arch = "wasm32"))]
pub fn remaining_stack() -> Option<usize> {
    stacker::remaining_stack()
}

#[cfg(target_arch = "wasm32")]
pub fn remaining_stack() -> Option<usize> {
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nest(depth: u32) -> u32 {
        ensure_sufficient_stack(|| if depth == 0 { 0 } else { nest(depth - 1) + 1 })
    }

    #[test]
    fn test_passes_through_result() {
        let out: Result<u8, String> = ensure_sufficient_stack(|| Ok(7));
        assert_eq!(out, Ok(7));
    }

    #[test]
    fn test_deep_nesting_does_not_overflow() {
        assert_eq!(nest(200_000), 200_000);
    }

    #[test]
    fn test_remaining_stack_reported() {
        if let Some(bytes) = remaining_stack() {
            assert!(bytes > 0);
        }
    }
}
