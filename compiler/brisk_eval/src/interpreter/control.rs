//! Conditionals and loops.
//!
//! Inline forms (`if c then x else y`, `while c do x`) produce a value: the
//! chosen branch, or a list of every iteration's value for loops. Block
//! forms terminated by `end` produce null.

use std::rc::Rc;

use brisk_ir::{BranchRange, ExprId, Name};

use super::Interpreter;
use crate::context::ContextRef;
use crate::errors::{type_mismatch, zero_step};
use crate::{ControlAction, EvalResult, RuntimeResult, Value};

/// What a loop does after one iteration of its body.
enum LoopAction {
    Next,
    Stop,
}

impl Interpreter {
    pub(super) fn eval_if(
        &mut self,
        branches: BranchRange,
        else_branch: Option<ExprId>,
        inline: bool,
        ctx: &ContextRef,
    ) -> RuntimeResult {
        let unit = Rc::clone(&self.unit);
        let mut chosen = else_branch;
        for branch in unit.arena.get_branches(branches) {
            if self.visit(branch.cond, ctx)?.is_truthy() {
                chosen = Some(branch.body);
                break;
            }
        }
        let Some(body) = chosen else {
            return Ok(Value::Null);
        };
        let value = self.visit(body, ctx)?;
        Ok(if inline { value } else { Value::Null })
    }

    pub(super) fn eval_while(
        &mut self,
        cond: ExprId,
        body: ExprId,
        inline: bool,
        ctx: &ContextRef,
    ) -> RuntimeResult {
        let mut collected = Vec::new();
        while self.visit(cond, ctx)?.is_truthy() {
            if let LoopAction::Stop = self.iterate(body, inline, &mut collected, ctx)? {
                break;
            }
        }
        Ok(self.loop_value(inline, collected))
    }

    /// `for var = start to end [step s]`: `end` is exclusive, the step
    /// defaults to 1 and may be negative. Int bounds count in ints; any
    /// float bound counts in floats.
    pub(super) fn eval_for(
        &mut self,
        var: Name,
        (start, end, step): (ExprId, ExprId, Option<ExprId>),
        body: ExprId,
        inline: bool,
        ctx: &ContextRef,
    ) -> RuntimeResult {
        let start = self.visit(start, ctx)?;
        let end = self.visit(end, ctx)?;
        let step = match step {
            Some(step) => self.visit(step, ctx)?,
            None => Value::Int(1),
        };

        let mut collected = Vec::new();
        if let (Value::Int(start), Value::Int(end), Value::Int(step)) = (&start, &end, &step) {
            let (mut i, end, step) = (*start, *end, *step);
            if step == 0 {
                return Err(zero_step().into());
            }
            while (step > 0 && i < end) || (step < 0 && i > end) {
                ctx.set(var, Value::Int(i));
                if let LoopAction::Stop = self.iterate(body, inline, &mut collected, ctx)? {
                    break;
                }
                match i.checked_add(step) {
                    Some(next) => i = next,
                    None => break,
                }
            }
        } else {
            let (mut i, end, step) = (number(&start)?, number(&end)?, number(&step)?);
            if step == 0.0 {
                return Err(zero_step().into());
            }
            while (step > 0.0 && i < end) || (step < 0.0 && i > end) {
                ctx.set(var, Value::Float(i));
                if let LoopAction::Stop = self.iterate(body, inline, &mut collected, ctx)? {
                    break;
                }
                i += step;
            }
        }
        Ok(self.loop_value(inline, collected))
    }

    /// Run one iteration, consuming `break` and `continue`.
    fn iterate(
        &mut self,
        body: ExprId,
        inline: bool,
        collected: &mut Vec<Value>,
        ctx: &ContextRef,
    ) -> Result<LoopAction, ControlAction> {
        match self.visit(body, ctx) {
            Ok(value) => {
                if inline {
                    collected.push(value);
                }
                Ok(LoopAction::Next)
            }
            Err(ControlAction::Continue(_)) => Ok(LoopAction::Next),
            Err(ControlAction::Break(_)) => Ok(LoopAction::Stop),
            Err(other) => Err(other),
        }
    }

    fn loop_value(&self, inline: bool, collected: Vec<Value>) -> Value {
        if inline {
            Value::list(&self.heap, collected)
        } else {
            Value::Null
        }
    }
}

fn number(value: &Value) -> EvalResult<f64> {
    value
        .as_float()
        .ok_or_else(|| type_mismatch("number", value.type_name()))
}
