//! Qualified access: `outer.x`, `global.x` and `instance.member`.

use brisk_ir::{ExprId, Name, ScopeSel};

use super::Interpreter;
use crate::context::ContextRef;
use crate::errors::{not_an_object, not_instantiated, undefined_member};
use crate::{ControlAction, RuntimeResult, Value};

impl Interpreter {
    /// Context a qualified name refers to.
    ///
    /// `outer` at the top level is the global context itself.
    fn resolve_scope(
        &mut self,
        target: ScopeSel,
        member: Name,
        ctx: &ContextRef,
    ) -> Result<ContextRef, ControlAction> {
        match target {
            ScopeSel::Outer => Ok(ctx.parent().unwrap_or(&self.global).clone()),
            ScopeSel::Global => Ok(self.global.clone()),
            ScopeSel::Value(expr) => match self.visit(expr, ctx)? {
                Value::Object(obj) => match &obj.instance {
                    Some(instance) => Ok(instance.clone()),
                    None => Err(not_instantiated(&obj.name).into()),
                },
                other => Err(not_an_object(self.interner.lookup(member), other.type_name()).into()),
            },
        }
    }

    pub(super) fn eval_scope_access(
        &mut self,
        target: ScopeSel,
        member: Name,
        ctx: &ContextRef,
    ) -> RuntimeResult {
        let scope = self.resolve_scope(target, member, ctx)?;
        // Members resolve in the selected context only, never its parents.
        scope.get_local(member).ok_or_else(|| {
            undefined_member(self.interner.lookup(member), scope.display_name()).into()
        })
    }

    pub(super) fn eval_scope_assign(
        &mut self,
        target: ScopeSel,
        member: Name,
        value: ExprId,
        ctx: &ContextRef,
    ) -> RuntimeResult {
        let scope = self.resolve_scope(target, member, ctx)?;
        let value = self.visit(value, ctx)?;
        scope.set(member, value.clone());
        Ok(value)
    }
}
