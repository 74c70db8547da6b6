//! A parsed script kept alive for as long as any function defined in it.

use std::rc::Rc;

use brisk_ir::{ExprArena, SourceMap};

/// Expression arena plus the source it was parsed from.
///
/// Function and object values hold a [`SharedUnit`] so their bodies stay
/// valid after the script that defined them has finished running.
#[derive(Debug)]
pub struct Unit {
    id: u32,
    pub arena: ExprArena,
    pub source: SourceMap,
}

pub type SharedUnit = Rc<Unit>;

impl Unit {
    pub(crate) fn new(id: u32, arena: ExprArena, source: SourceMap) -> Self {
        Unit { id, arena, source }
    }

    /// Session-unique identifier, stable for the unit's lifetime.
    pub fn id(&self) -> u32 {
        self.id
    }
}
