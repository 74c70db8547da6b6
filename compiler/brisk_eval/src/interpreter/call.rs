//! Calls, object instantiation and native registration.

use std::rc::Rc;

use brisk_ir::{ExprRange, Span};
use brisk_mem::HeapRef;
use smallvec::SmallVec;

use super::Interpreter;
use crate::builtins::{NativeCall, NativeFn};
use crate::context::{Context, ContextRef, Owner};
use crate::errors::{arity_mismatch, call_depth_exceeded, not_callable, type_mismatch};
use crate::value::{FunctionBody, FunctionData, ObjectData};
use crate::{ControlAction, EvalError, RuntimeResult, Value};

/// Evaluated call arguments. Most calls take only a few.
pub(super) type Args = SmallVec<[Value; 4]>;

impl Interpreter {
    pub(super) fn eval_args(&mut self, args: ExprRange, ctx: &ContextRef) -> Result<Args, ControlAction> {
        let unit = Rc::clone(&self.unit);
        let mut values = Args::new();
        for &arg in unit.arena.get_expr_list(args) {
            values.push(self.visit(arg, ctx)?);
        }
        Ok(values)
    }

    /// Call `callee` with evaluated arguments.
    ///
    /// Runs the body in a fresh context whose parent is the context the
    /// function was defined in, with each parameter bound to its argument.
    #[tracing::instrument(level = "debug", skip_all, fields(args = args.len()))]
    pub(crate) fn call_value(&mut self, callee: &Value, args: &[Value], span: Span) -> RuntimeResult {
        let Value::Function(func) = callee else {
            return Err(not_callable(callee.type_name()).into());
        };
        check_arity(func.display_name(), func.params.len(), args.len())?;
        self.enter_call()?;

        let entry = self.unit.source.position(span.start);
        let parent = func.defining.clone().unwrap_or_else(|| self.global.clone());
        let ctx = Context::child(
            &self.heap,
            format!("<function {}>", func.display_name()),
            parent,
            entry,
            Some(Owner::Function(HeapRef::downgrade(func))),
        );
        for (&param, arg) in func.params.iter().zip(args) {
            ctx.set(param, arg.clone());
        }

        let result = match &func.body {
            FunctionBody::Native(native) => {
                let mut call = NativeCall {
                    args,
                    context: &ctx,
                    heap: &self.heap,
                    interner: &self.interner,
                    output: &self.print_handler,
                    span,
                };
                native(&mut call)
            }
            FunctionBody::User { body, unit } => {
                let previous = std::mem::replace(&mut self.unit, Rc::clone(unit));
                let result = self
                    .visit(*body, &ctx)
                    .map(|value| if func.auto_return { value } else { Value::Null });
                let result = self.settle(result, &ctx);
                self.unit = previous;
                Context::release_if_self_held(&ctx);
                result
            }
        };
        self.call_depth -= 1;
        result
    }

    /// `new Template(args)`: run the template body in a fresh context and
    /// wrap that context as an instance.
    pub(super) fn instantiate(&mut self, template: &Value, args: &[Value], span: Span) -> RuntimeResult {
        let template = match template {
            Value::Object(obj) if !obj.is_instance() => obj,
            Value::Object(_) => return Err(type_mismatch("object template", "instance").into()),
            other => return Err(type_mismatch("object template", other.type_name()).into()),
        };
        check_arity(&template.name, template.params.len(), args.len())?;
        self.enter_call()?;

        let entry = self.unit.source.position(span.start);
        let ctx = Context::child(
            &self.heap,
            format!("<instance {}>", template.name),
            template.defining.clone(),
            entry,
            None,
        );
        for (&param, arg) in template.params.iter().zip(args) {
            ctx.set(param, arg.clone());
        }

        let previous = std::mem::replace(&mut self.unit, Rc::clone(&template.unit));
        let result = self.visit(template.body, &ctx);
        let result = self.settle(result, &ctx);
        self.unit = previous;
        self.call_depth -= 1;
        result?;

        let instance = self.heap.alloc(ObjectData {
            name: template.name.clone(),
            params: template.params.clone(),
            body: template.body,
            unit: Rc::clone(&template.unit),
            defining: template.defining.clone(),
            instance: Some(ctx.clone()),
        });
        ctx.set_owner(Owner::Instance(HeapRef::downgrade(&instance)));
        Ok(Value::Object(instance))
    }

    /// Bind a native function in the global context.
    ///
    /// The function value is allocated statically: it stays valid for the
    /// life of the session even if the script rebinds the name.
    pub fn register_native(&mut self, name: &str, params: &[&str], func: NativeFn) -> Value {
        let data = FunctionData {
            name: Some(name.to_string()),
            params: params.iter().map(|param| self.interner.intern(param)).collect(),
            body: FunctionBody::Native(func),
            auto_return: true,
            defining: None,
        };
        let value = Value::Function(self.heap.alloc_static(data));
        self.global.set(self.interner.intern(name), value.clone());
        value
    }

    fn enter_call(&mut self) -> Result<(), EvalError> {
        if let Some(limit) = self.max_call_depth {
            if self.call_depth >= limit {
                return Err(call_depth_exceeded(limit));
            }
        }
        self.call_depth += 1;
        Ok(())
    }
}

fn check_arity(name: &str, expected: usize, got: usize) -> Result<(), EvalError> {
    if expected == got {
        Ok(())
    } else {
        Err(arity_mismatch(name, expected, got))
    }
}
