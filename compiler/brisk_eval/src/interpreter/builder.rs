//! `InterpreterBuilder` for configuring an [`Interpreter`].

use std::rc::Rc;

use brisk_ir::{ExprArena, SharedInterner, SourceMap};
use brisk_mem::{Heap, HeapConfig};

use super::Interpreter;
use crate::builtins::BUILTINS;
use crate::context::Context;
use crate::literal_cache::LiteralCache;
use crate::unit::Unit;
use crate::{stdout_handler, SharedPrintHandler};

/// Nested calls allowed before a script is stopped.
pub const DEFAULT_MAX_CALL_DEPTH: usize = 2_000;

/// Builder for [`Interpreter`].
///
/// Every setting has a default, so `InterpreterBuilder::new().build()`
/// gives a working interpreter that prints to stdout.
pub struct InterpreterBuilder {
    heap_config: HeapConfig,
    interner: Option<SharedInterner>,
    print_handler: Option<SharedPrintHandler>,
    max_call_depth: Option<usize>,
    cache_literals: bool,
    builtins: bool,
}

impl InterpreterBuilder {
    pub fn new() -> Self {
        InterpreterBuilder {
            heap_config: HeapConfig::default(),
            interner: None,
            print_handler: None,
            max_call_depth: Some(DEFAULT_MAX_CALL_DEPTH),
            cache_literals: true,
            builtins: true,
        }
    }

    /// Block pool sizing for the session heap.
    #[must_use]
    pub fn heap_config(mut self, config: HeapConfig) -> Self {
        self.heap_config = config;
        self
    }

    /// Share an interner with the lexer and parser.
    #[must_use]
    pub fn interner(mut self, interner: SharedInterner) -> Self {
        self.interner = Some(interner);
        self
    }

    #[must_use]
    pub fn print_handler(mut self, handler: SharedPrintHandler) -> Self {
        self.print_handler = Some(handler);
        self
    }

    /// `None` removes the limit.
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

    /// Skip registering the standard builtins.
    #[must_use]
    pub fn without_builtins(mut self) -> Self {
        self.builtins = false;
        self
    }

    pub fn build(self) -> Interpreter {
        let heap = Heap::with_config(self.heap_config);
        let global = Context::root(&heap, "<program>");
        let mut interpreter = Interpreter {
            heap,
            interner: self.interner.unwrap_or_default(),
            global,
            unit: Rc::new(Unit::new(0, ExprArena::new(), SourceMap::empty())),
            print_handler: self.print_handler.unwrap_or_else(stdout_handler),
            literal_cache: LiteralCache::new(self.cache_literals),
            max_call_depth: self.max_call_depth,
            call_depth: 0,
            next_unit_id: 1,
        };
        if self.builtins {
            for builtin in BUILTINS {
                interpreter.register_native(builtin.name, builtin.params, builtin.func);
            }
        }
        interpreter
    }
}

impl Default for InterpreterBuilder {
    fn default() -> Self {
        Self::new()
    }
}
