//! Core data structures shared by every stage of the Brisk runtime.
//!
//! - [`Span`] and [`SourceMap`]: byte ranges and their line/column resolution
//! - [`Name`] and [`StringInterner`]: interned identifiers and string literals
//! - [`Token`], [`TokenKind`], [`TokenList`]: lexer output
//! - [`ast`]: expression nodes stored flat in an [`ExprArena`]

pub mod ast;
mod interner;
mod name;
mod source_map;
mod span;
mod token;

pub use ast::{
    pretty, BinaryOp, BranchRange, Expr, ExprArena, ExprId, ExprKind, ExprRange, IfBranch, ParamRange,
    ScopeSel, UnaryOp,
};
pub use interner::{SharedInterner, StringInterner};
pub use name::Name;
pub use source_map::{Position, SourceMap};
pub use span::Span;
pub use token::{Token, TokenKind, TokenList};
