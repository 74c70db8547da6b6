//! Grammar productions, one file per family.

mod control;
mod definitions;
mod expr;
mod primary;
mod statements;
