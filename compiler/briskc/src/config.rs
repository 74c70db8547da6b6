//! Session configuration.

use brisk_eval::{
    buffer_handler, silent_handler, stdout_handler, SharedPrintHandler, DEFAULT_MAX_CALL_DEPTH,
};
use brisk_mem::HeapConfig;

/// Where `print` output goes.
#[derive(Clone, Default)]
pub enum Output {
    #[default]
    Stdout,
    /// Keep output in memory; read it back with [`Vm::output`](crate::Vm::output).
    Capture,
    Silent,
    /// A handler the caller keeps a reference to.
    Handler(SharedPrintHandler),
}

impl Output {
    pub(crate) fn handler(&self) -> SharedPrintHandler {
        match self {
            Output::Stdout => stdout_handler(),
            Output::Capture => buffer_handler(),
            Output::Silent => silent_handler(),
            Output::Handler(handler) => SharedPrintHandler::clone(handler),
        }
    }
}

/// Settings for a [`Vm`](crate::Vm).
#[derive(Clone)]
pub struct VmConfig {
    /// Blocks created up front in the heap's pool.
    pub initial_blocks: usize,
    /// Minimum size of a newly created block.
    pub block_size: usize,
    /// Nested calls allowed before a script is stopped; `None` is unbounded.
    pub max_call_depth: Option<usize>,
    /// Share one heap string per string literal node.
    pub cache_literals: bool,
    pub output: Output,
}

impl VmConfig {
    pub fn new() -> Self {
        let heap = HeapConfig::default();
        VmConfig {
            initial_blocks: heap.initial_blocks,
            block_size: heap.block_size,
            max_call_depth: Some(DEFAULT_MAX_CALL_DEPTH),
            cache_literals: true,
            output: Output::Stdout,
        }
    }

    #[must_use]
    pub fn initial_blocks(mut self, count: usize) -> Self {
        self.initial_blocks = count;
        self
    }

    #[must_use]
    pub fn block_size(mut self, bytes: usize) -> Self {
        self.block_size = bytes;
        self
    }

    #[must_use]
    pub fn max_call_depth(mut self, limit: Option<usize>) -> Self {
        self.max_call_depth = limit;
        self
    }

    #[must_use]
    pub fn cache_literals(mut self, enabled: bool) -> Self {
        self.cache_literals = enabled;
        self
    }

    #[must_use]
    pub fn output(mut self, output: Output) -> Self {
        self.output = output;
        self
    }

    /// Shorthand for `output(Output::Capture)`.
    #[must_use]
    pub fn capture_output(self) -> Self {
        self.output(Output::Capture)
    }

    pub(crate) fn heap_config(&self) -> HeapConfig {
        HeapConfig {
            initial_blocks: self.initial_blocks,
            block_size: self.block_size,
        }
    }
}

impl Default for VmConfig {
    fn default() -> Self {
        Self::new()
    }
}
