//! Script sessions.

use brisk_eval::{Interpreter, NativeFn, Value};
use brisk_ir::SourceMap;
use brisk_mem::Heap;
use tracing::debug;

use crate::{ScriptError, VmConfig};

/// One interpreter session.
///
/// Owns the heap, interner, global context and builtins. Globals persist
/// across [`run_script`](Vm::run_script) calls. A `Vm` is not `Send`; give
/// each thread its own.
pub struct Vm {
    interpreter: Interpreter,
}

impl Vm {
    pub fn new() -> Self {
        Self::with_config(&VmConfig::default())
    }

    pub fn with_config(config: &VmConfig) -> Self {
        let interpreter = Interpreter::builder()
            .heap_config(config.heap_config())
            .print_handler(config.output.handler())
            .max_call_depth(config.max_call_depth)
            .cache_literals(config.cache_literals)
            .build();
        Vm { interpreter }
    }

    /// Lex, parse and run `text`, stopping at the first stage that fails.
    ///
    /// Returns the value of the last statement.
    pub fn run_script(&mut self, file_name: &str, text: &str) -> Result<Value, ScriptError> {
        debug!(file = file_name, bytes = text.len(), "run_script");
        let source = SourceMap::new(file_name, text);
        let interner = self.interpreter.interner().clone();

        let tokens = brisk_lexer::tokenize(text, &interner)
            .into_result()
            .map_err(|err| ScriptError::lex(err, &source))?;
        debug!(tokens = tokens.len(), "lexed");

        let program = brisk_parse::parse(&tokens).map_err(|err| ScriptError::parse(err, &source))?;
        debug!(nodes = program.arena.len(), "parsed");

        let unit = self.interpreter.load(program.arena, source);
        Ok(self.interpreter.run(&unit, program.root)?)
    }

    /// Bind a native function in the global context.
    pub fn register_native(&mut self, name: &str, params: &[&str], func: NativeFn) {
        self.interpreter.register_native(name, params, func);
    }

    /// Call a function value, such as one returned by a script.
    pub fn call(&mut self, callee: &Value, args: &[Value]) -> Result<Value, ScriptError> {
        Ok(self.interpreter.call_function(callee, args)?)
    }

    pub fn get_global(&self, name: &str) -> Option<Value> {
        let name = self.interpreter.interner().get(name)?;
        self.interpreter.global().get_local(name)
    }

    pub fn set_global(&mut self, name: &str, value: Value) {
        let name = self.interpreter.interner().intern(name);
        self.interpreter.global().set(name, value);
    }

    /// Drop every global binding except the builtins.
    pub fn reset(&mut self) {
        self.interpreter.reset_globals();
    }

    /// Output captured so far. Empty unless the session captures output.
    pub fn output(&self) -> String {
        self.interpreter.print_handler().output()
    }

    pub fn heap(&self) -> &Heap {
        self.interpreter.heap()
    }

    /// Bytes currently held by live heap blocks.
    pub fn mem_allocated(&self) -> usize {
        self.interpreter.heap().mem_allocated()
    }

    pub fn interpreter(&self) -> &Interpreter {
        &self.interpreter
    }
}

impl Default for Vm {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Vm {
    /// Functions stored in the global context keep it alive through their
    /// defining-context handle. Clearing the bindings breaks those cycles.
    fn drop(&mut self) {
        self.interpreter.global().clear();
    }
}

/// Run `text` in a fresh [`Vm`] that prints to stdout.
pub fn run_script(file_name: &str, text: &str) -> Result<Value, ScriptError> {
    Vm::new().run_script(file_name, text)
}
