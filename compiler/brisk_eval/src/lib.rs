//! Brisk Eval - tree-walking interpreter for Brisk scripts.
//!
//! # Architecture
//!
//! - [`Value`]: tagged runtime values; non-scalar payloads live in the
//!   session [`Heap`](brisk_mem::Heap)
//! - [`Context`]: one frame of the lexical chain (program, call or instance)
//! - [`Interpreter`]: evaluates a parsed [`Unit`] node by node
//! - [`RuntimeResult`] / [`ControlAction`]: errors and non-local exits share
//!   the `Err` channel so `?` propagates both
//! - [`builtins`]: native functions bound in the global context

pub mod builtins;
pub mod context;
pub mod errors;
mod interpreter;
mod literal_cache;
pub mod operators;
mod print_handler;
mod unit;
mod value;

pub use builtins::{Builtin, NativeCall, NativeFn, BUILTINS};
pub use context::{Context, ContextRef, Owner};
pub use errors::{
    ControlAction, EvalError, EvalErrorKind, EvalResult, RuntimeResult, TraceFrame, Traceback,
};
pub use interpreter::{Interpreter, InterpreterBuilder, DEFAULT_MAX_CALL_DEPTH};
pub use literal_cache::LiteralCache;
pub use print_handler::{
    buffer_handler, silent_handler, stdout_handler, BufferPrintHandler, PrintHandlerImpl,
    SharedPrintHandler, StdoutPrintHandler,
};
pub use unit::{SharedUnit, Unit};
pub use value::{FunctionBody, FunctionData, ListData, ObjectData, Value};
