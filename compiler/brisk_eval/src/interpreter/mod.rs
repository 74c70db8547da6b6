//! Tree-walking interpreter.
//!
//! [`Interpreter::visit`] evaluates one node in a context and returns a
//! [`RuntimeResult`]. Errors pick up their span and traceback at the
//! innermost node they pass through; `return`, `break` and `continue`
//! travel on the same `Err` channel until a function body or loop
//! consumes them.
//!
//! The interpreter always evaluates against one current [`Unit`]. Calling a
//! function defined in another unit switches to that unit for the duration
//! of the call.

mod builder;
mod call;
mod control;
mod scope;

use std::rc::Rc;

use brisk_ir::{BinaryOp, ExprArena, ExprId, ExprKind, Name, SharedInterner, SourceMap, Span};
use brisk_mem::Heap;
use brisk_stack::ensure_sufficient_stack;
use tracing::debug;

pub use builder::{InterpreterBuilder, DEFAULT_MAX_CALL_DEPTH};

use crate::context::{traceback, Context, ContextRef};
use crate::errors::{control_outside_loop, undefined_variable};
use crate::literal_cache::LiteralCache;
use crate::operators::{evaluate_binary, evaluate_unary};
use crate::unit::{SharedUnit, Unit};
use crate::value::{FunctionBody, FunctionData, ObjectData};
use crate::{ControlAction, EvalError, EvalResult, RuntimeResult, SharedPrintHandler, Value};

/// One interpreter session: heap, global context and the loaded units.
pub struct Interpreter {
    heap: Heap,
    interner: SharedInterner,
    global: ContextRef,
    unit: SharedUnit,
    print_handler: SharedPrintHandler,
    literal_cache: LiteralCache,
    max_call_depth: Option<usize>,
    call_depth: usize,
    next_unit_id: u32,
}

impl Interpreter {
    pub fn new() -> Self {
        InterpreterBuilder::new().build()
    }

    pub fn builder() -> InterpreterBuilder {
        InterpreterBuilder::new()
    }

    pub fn heap(&self) -> &Heap {
        &self.heap
    }

    pub fn interner(&self) -> &SharedInterner {
        &self.interner
    }

    /// The root context. Bindings persist across [`run`](Self::run) calls.
    pub fn global(&self) -> &ContextRef {
        &self.global
    }

    pub fn print_handler(&self) -> &SharedPrintHandler {
        &self.print_handler
    }

    pub fn literal_cache(&self) -> &LiteralCache {
        &self.literal_cache
    }

    pub fn call_depth(&self) -> usize {
        self.call_depth
    }

    /// Wrap a parsed script so it can be run.
    pub fn load(&mut self, arena: ExprArena, source: SourceMap) -> SharedUnit {
        let id = self.next_unit_id;
        self.next_unit_id = self.next_unit_id.wrapping_add(1);
        Rc::new(Unit::new(id, arena, source))
    }

    /// Evaluate `root` in the global context.
    ///
    /// The result is the value of the last statement, or the value of a
    /// top-level `return`.
    pub fn run(&mut self, unit: &SharedUnit, root: ExprId) -> EvalResult {
        debug!(unit = unit.id(), file = unit.source.name(), "run");
        let previous = std::mem::replace(&mut self.unit, Rc::clone(unit));
        let global = self.global.clone();
        let result = self.visit(root, &global);
        let result = self.settle(result, &global);
        self.unit = previous;
        debug!(ok = result.is_ok(), "run finished");
        into_outcome(result)
    }

    /// Call a function value from Rust.
    pub fn call_function(&mut self, callee: &Value, args: &[Value]) -> EvalResult {
        let result = self.call_value(callee, args, Span::DUMMY);
        into_outcome(result)
    }

    /// Drop every global binding and register the builtins again.
    pub fn reset_globals(&mut self) {
        self.global.clear();
        for builtin in crate::builtins::BUILTINS {
            self.register_native(builtin.name, builtin.params, builtin.func);
        }
    }

    /// Evaluate one node.
    pub(crate) fn visit(&mut self, id: ExprId, ctx: &ContextRef) -> RuntimeResult {
        let expr = *self.unit.arena.get_expr(id);
        ensure_sufficient_stack(|| self.eval_kind(id, expr.kind, expr.span, ctx))
            .map_err(|action| self.locate(action, expr.span, ctx))
    }

    fn eval_kind(&mut self, id: ExprId, kind: ExprKind, span: Span, ctx: &ContextRef) -> RuntimeResult {
        match kind {
            ExprKind::Int(n) => Ok(Value::Int(n)),
            ExprKind::Float(bits) => Ok(Value::Float(f64::from_bits(bits))),
            ExprKind::Bool(b) => Ok(Value::Bool(b)),
            ExprKind::Null => Ok(Value::Null),
            ExprKind::Str(name) => Ok(self.string_literal(id, name)),
            ExprKind::List(items) => {
                let unit = Rc::clone(&self.unit);
                let exprs = unit.arena.get_expr_list(items);
                let mut values = Vec::with_capacity(exprs.len());
                for &item in exprs {
                    values.push(self.visit(item, ctx)?);
                }
                Ok(Value::list(&self.heap, values))
            }

            ExprKind::Unary { op, operand } => {
                let value = self.visit(operand, ctx)?;
                Ok(evaluate_unary(&value, op)?)
            }
            ExprKind::Binary { op, left, right } => {
                let lhs = self.visit(left, ctx)?;
                if op.is_short_circuit() {
                    let decided = match op {
                        BinaryOp::And => !lhs.is_truthy(),
                        _ => lhs.is_truthy(),
                    };
                    if decided {
                        return Ok(Value::Bool(lhs.is_truthy()));
                    }
                    let rhs = self.visit(right, ctx)?;
                    return Ok(Value::Bool(rhs.is_truthy()));
                }
                let rhs = self.visit(right, ctx)?;
                Ok(evaluate_binary(&lhs, &rhs, op, &self.heap)?)
            }

            ExprKind::Ident(name) => ctx
                .get(name)
                .ok_or_else(|| undefined_variable(self.interner.lookup(name)).into()),
            ExprKind::Assign { name, value } => {
                let value = self.visit(value, ctx)?;
                ctx.set(name, value.clone());
                Ok(value)
            }
            ExprKind::ScopeAccess { target, member } => self.eval_scope_access(target, member, ctx),
            ExprKind::ScopeAssign {
                target,
                member,
                value,
            } => self.eval_scope_assign(target, member, value, ctx),

            ExprKind::Call { callee, args } => {
                let callee = self.visit(callee, ctx)?;
                let args = self.eval_args(args, ctx)?;
                self.call_value(&callee, &args, span)
            }
            ExprKind::FuncDef {
                name,
                params,
                body,
                auto_return,
            } => {
                let func = FunctionData {
                    name: name.map(|n| self.interner.lookup(n).to_string()),
                    params: self.unit.arena.get_params(params).to_vec(),
                    body: FunctionBody::User {
                        body,
                        unit: Rc::clone(&self.unit),
                    },
                    auto_return,
                    defining: Some(ctx.clone()),
                };
                let value = Value::function(&self.heap, func);
                if let Some(name) = name {
                    ctx.set(name, value.clone());
                }
                Ok(value)
            }
            ExprKind::ObjectDef { name, params, body } => {
                let template = ObjectData {
                    name: self.interner.lookup(name).to_string(),
                    params: self.unit.arena.get_params(params).to_vec(),
                    body,
                    unit: Rc::clone(&self.unit),
                    defining: ctx.clone(),
                    instance: None,
                };
                let value = Value::object(&self.heap, template);
                ctx.set(name, value.clone());
                Ok(value)
            }
            ExprKind::NewObject { template, args } => {
                let template = self.visit(template, ctx)?;
                let args = self.eval_args(args, ctx)?;
                self.instantiate(&template, &args, span)
            }

            ExprKind::If {
                branches,
                else_branch,
                inline,
            } => self.eval_if(branches, else_branch, inline, ctx),
            ExprKind::While { cond, body, inline } => self.eval_while(cond, body, inline, ctx),
            ExprKind::For {
                var,
                start,
                end,
                step,
                body,
                inline,
            } => self.eval_for(var, (start, end, step), body, inline, ctx),
            ExprKind::Return(value) => {
                let value = match value {
                    Some(expr) => self.visit(expr, ctx)?,
                    None => Value::Null,
                };
                Err(ControlAction::Return(value))
            }
            ExprKind::Break => Err(ControlAction::Break(span)),
            ExprKind::Continue => Err(ControlAction::Continue(span)),

            ExprKind::Block(stmts) => {
                let unit = Rc::clone(&self.unit);
                let mut last = Value::Null;
                for &stmt in unit.arena.get_expr_list(stmts) {
                    last = self.visit(stmt, ctx)?;
                }
                Ok(last)
            }
        }
    }

    fn string_literal(&mut self, id: ExprId, name: Name) -> Value {
        let unit_id = self.unit.id();
        let heap = &self.heap;
        let interner = &self.interner;
        self.literal_cache
            .get_or_insert_with(unit_id, id, || Value::string(heap, interner.lookup(name)))
    }

    /// Attach `span` and a traceback to an error that has neither yet.
    fn locate(&self, action: ControlAction, span: Span, ctx: &Context) -> ControlAction {
        match action {
            ControlAction::Error(err) if !err.is_located() => {
                ControlAction::from(self.located(*err, span, ctx))
            }
            other => other,
        }
    }

    fn located(&self, err: EvalError, span: Span, ctx: &Context) -> EvalError {
        let position = self.unit.source.position(span.start);
        err.with_span(span).with_traceback(traceback(ctx, position))
    }

    /// Resolve control signals that reach a function or program boundary:
    /// `return` yields its value, a stray `break` or `continue` is an error.
    fn settle(&self, result: RuntimeResult, ctx: &Context) -> RuntimeResult {
        match result {
            Err(ControlAction::Return(value)) => Ok(value),
            Err(ControlAction::Break(span)) => {
                Err(self.located(control_outside_loop("break"), span, ctx).into())
            }
            Err(ControlAction::Continue(span)) => {
                Err(self.located(control_outside_loop("continue"), span, ctx).into())
            }
            other => other,
        }
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

fn into_outcome(result: RuntimeResult) -> EvalResult {
    match result {
        Ok(value) | Err(ControlAction::Return(value)) => Ok(value),
        Err(ControlAction::Error(err)) => Err(*err),
        Err(ControlAction::Break(_)) => Err(control_outside_loop("break")),
        Err(ControlAction::Continue(_)) => Err(control_outside_loop("continue")),
    }
}
