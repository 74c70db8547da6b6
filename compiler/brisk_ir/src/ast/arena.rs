//! Flat storage for expression nodes and their child lists.

use super::{BranchRange, Expr, ExprId, ExprRange, IfBranch, ParamRange};
use crate::Name;

/// Owns every node of one parsed program.
#[derive(Clone, Debug, Default)]
pub struct ExprArena {
    exprs: Vec<Expr>,
    expr_lists: Vec<ExprId>,
    params: Vec<Name>,
    branches: Vec<IfBranch>,
}

fn to_u32(n: usize, what: &str) -> u32 {
    u32::try_from(n).unwrap_or_else(|_| panic!("{what} table exceeded u32::MAX entries"))
}

impl ExprArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alloc_expr(&mut self, expr: Expr) -> ExprId {
        let id = ExprId::new(to_u32(self.exprs.len(), "expression"));
        self.exprs.push(expr);
        id
    }

    /// Panics on an id from another arena that is out of range.
    #[inline]
    pub fn get_expr(&self, id: ExprId) -> &Expr {
        &self.exprs[id.index()]
    }

    pub fn alloc_expr_list(&mut self, ids: impl IntoIterator<Item = ExprId>) -> ExprRange {
        let start = to_u32(self.expr_lists.len(), "expression list");
        self.expr_lists.extend(ids);
        let len = to_u32(self.expr_lists.len(), "expression list") - start;
        ExprRange { start, len }
    }

    pub fn get_expr_list(&self, range: ExprRange) -> &[ExprId] {
        let start = range.start as usize;
        &self.expr_lists[start..start + range.len as usize]
    }

    pub fn alloc_params(&mut self, names: impl IntoIterator<Item = Name>) -> ParamRange {
        let start = to_u32(self.params.len(), "parameter");
        self.params.extend(names);
        let len = to_u32(self.params.len(), "parameter") - start;
        ParamRange { start, len }
    }

    pub fn get_params(&self, range: ParamRange) -> &[Name] {
        let start = range.start as usize;
        &self.params[start..start + range.len as usize]
    }

    pub fn alloc_branches(&mut self, branches: impl IntoIterator<Item = IfBranch>) -> BranchRange {
        let start = to_u32(self.branches.len(), "branch");
        self.branches.extend(branches);
        let len = to_u32(self.branches.len(), "branch") - start;
        BranchRange { start, len }
    }

    pub fn get_branches(&self, range: BranchRange) -> &[IfBranch] {
        let start = range.start as usize;
        &self.branches[start..start + range.len as usize]
    }

    pub fn len(&self) -> usize {
        self.exprs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exprs.is_empty()
    }
}
