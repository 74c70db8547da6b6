//! Expression tree.
//!
//! Every node is an [`Expr`] stored flat in an [`ExprArena`] and referred to
//! by [`ExprId`]. Child lists (call arguments, list elements, statements)
//! live in side tables addressed by small `Copy` range handles, so
//! `ExprKind` itself is `Copy` and the evaluator can read a node without
//! holding a borrow on the arena.

mod arena;
mod operators;
pub mod pretty;

use std::fmt;

pub use arena::ExprArena;
pub use operators::{BinaryOp, UnaryOp};

use crate::{Name, Span};

/// Index of an expression in its arena.
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct ExprId(u32);

impl ExprId {
    #[inline]
    pub const fn new(index: u32) -> Self {
        ExprId(index)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for ExprId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ExprId({})", self.0)
    }
}

/// Range into the arena's expression-list table.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct ExprRange {
    pub start: u32,
    pub len: u32,
}

impl ExprRange {
    pub const EMPTY: ExprRange = ExprRange { start: 0, len: 0 };

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// Range into the arena's parameter-name table.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct ParamRange {
    pub start: u32,
    pub len: u32,
}

impl ParamRange {
    #[inline]
    pub const fn len(&self) -> usize {
        self.len as usize
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// Range into the arena's if-branch table.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct BranchRange {
    pub start: u32,
    pub len: u32,
}

/// One `if`/`elif` case: the body runs when `cond` is truthy.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct IfBranch {
    pub cond: ExprId,
    pub body: ExprId,
}

/// Target of a qualified access such as `obj.member` or `outer.count`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ScopeSel {
    /// The parent of the current context.
    Outer,
    /// The root context of the session.
    Global,
    /// An expression evaluating to an object instance.
    Value(ExprId),
}

/// Expression node.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

impl Expr {
    #[inline]
    pub const fn new(kind: ExprKind, span: Span) -> Self {
        Expr { kind, span }
    }
}

/// Expression kinds.
///
/// `inline` flags on control-flow nodes distinguish the single-line form
/// (which yields a value) from the block form terminated by `end` (which
/// yields null).
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ExprKind {
    Int(i64),
    /// Stored as bits so the node stays `Eq`/`Hash`.
    Float(u64),
    Str(Name),
    Bool(bool),
    Null,
    List(ExprRange),

    Unary {
        op: UnaryOp,
        operand: ExprId,
    },
    Binary {
        op: BinaryOp,
        left: ExprId,
        right: ExprId,
    },

    /// Variable read.
    Ident(Name),
    /// Variable write into the current context.
    Assign {
        name: Name,
        value: ExprId,
    },
    ScopeAccess {
        target: ScopeSel,
        member: Name,
    },
    ScopeAssign {
        target: ScopeSel,
        member: Name,
        value: ExprId,
    },

    Call {
        callee: ExprId,
        args: ExprRange,
    },
    FuncDef {
        name: Option<Name>,
        params: ParamRange,
        body: ExprId,
        auto_return: bool,
    },
    ObjectDef {
        name: Name,
        params: ParamRange,
        body: ExprId,
    },
    NewObject {
        template: ExprId,
        args: ExprRange,
    },

    If {
        branches: BranchRange,
        else_branch: Option<ExprId>,
        inline: bool,
    },
    While {
        cond: ExprId,
        body: ExprId,
        inline: bool,
    },
    For {
        var: Name,
        start: ExprId,
        end: ExprId,
        step: Option<ExprId>,
        body: ExprId,
        inline: bool,
    },
    Return(Option<ExprId>),
    Break,
    Continue,

    /// Statement sequence; evaluates to the last statement's value.
    Block(ExprRange),
}

impl ExprKind {
    /// Short label for logging.
    pub fn label(&self) -> &'static str {
        match self {
            ExprKind::Int(_) => "int",
            ExprKind::Float(_) => "float",
            ExprKind::Str(_) => "string",
            ExprKind::Bool(_) => "bool",
            ExprKind::Null => "null",
            ExprKind::List(_) => "list",
            ExprKind::Unary { .. } => "unary",
            ExprKind::Binary { .. } => "binary",
            ExprKind::Ident(_) => "ident",
            ExprKind::Assign { .. } => "assign",
            ExprKind::ScopeAccess { .. } => "scope-access",
            ExprKind::ScopeAssign { .. } => "scope-assign",
            ExprKind::Call { .. } => "call",
            ExprKind::FuncDef { .. } => "fn",
            ExprKind::ObjectDef { .. } => "object",
            ExprKind::NewObject { .. } => "new",
            ExprKind::If { .. } => "if",
            ExprKind::While { .. } => "while",
            ExprKind::For { .. } => "for",
            ExprKind::Return(_) => "return",
            ExprKind::Break => "break",
            ExprKind::Continue => "continue",
            ExprKind::Block(_) => "block",
        }
    }
}
