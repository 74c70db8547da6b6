//! Reuse of string literal values.
//!
//! Evaluating `"abc"` inside a loop would otherwise allocate a fresh heap
//! string per iteration. With the cache enabled, each literal node
//! allocates once and later evaluations share that value. Strings are
//! immutable, so sharing is unobservable to scripts.

use brisk_ir::ExprId;
use rustc_hash::FxHashMap;

use crate::Value;

pub struct LiteralCache {
    enabled: bool,
    /// Keyed by unit id and node; a node id alone is only unique per unit.
    entries: FxHashMap<(u32, ExprId), Value>,
    hits: u64,
}

impl LiteralCache {
    pub fn new(enabled: bool) -> Self {
        LiteralCache {
            enabled,
            entries: FxHashMap::default(),
            hits: 0,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Cached value for the literal, or the result of `make` (stored when
    /// the cache is enabled).
    pub fn get_or_insert_with(
        &mut self,
        unit: u32,
        id: ExprId,
        make: impl FnOnce() -> Value,
    ) -> Value {
        if !self.enabled {
            return make();
        }
        if let Some(value) = self.entries.get(&(unit, id)) {
            self.hits += 1;
            return value.clone();
        }
        let value = make();
        self.entries.insert((unit, id), value.clone());
        value
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    /// Release every cached value.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
