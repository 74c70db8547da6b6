//! Brisk - a small dynamically typed scripting language.
//!
//! This crate ties the pipeline together: source text is tokenized by
//! `brisk_lexer`, parsed by `brisk_parse` and evaluated by `brisk_eval`
//! inside a [`Vm`] session.
//!
//! ```no_run
//! let value = briskc::run_script("<stdin>", "fn sq(n) -> n * n\nsq(12)")?;
//! assert_eq!(value.to_string(), "144");
//! # Ok::<(), briskc::ScriptError>(())
//! ```

mod config;
mod error;
mod vm;

use std::sync::Once;

pub use brisk_eval::{EvalError, EvalErrorKind, NativeCall, NativeFn, RuntimeResult, Value};
pub use config::{Output, VmConfig};
pub use error::ScriptError;
pub use vm::{run_script, Vm};

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Safe to call more than once. Does nothing unless `RUST_LOG` is set, for
/// example `RUST_LOG=brisk_eval=debug` or `RUST_LOG=brisk_mem=trace`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(EnvFilter::from_default_env())
                .init();
        }
    });
}
