//! Memory layer for the Brisk runtime.
//!
//! Two levels:
//!
//! - [`BlockPool`]: reusable byte blocks. Allocation picks the smallest
//!   inactive block that fits before growing the pool; freeing zeroes a
//!   block and marks it inactive unless it is pinned.
//! - [`Heap`]: a generational slot table over the pool. Every heap value is
//!   owned through a [`HeapRef`], whose clones share one reference count.
//!   When the last `HeapRef` drops, the slot's generation is bumped, its
//!   block goes back to the pool and the value is dropped in place.
//!   [`WeakRef`] never holds the value alive and re-validates the slot
//!   generation before every upgrade.
//!
//! A `Heap` belongs to one thread. Invariant violations (double free,
//! foreign slot ids) panic.

mod block;
mod heap;

pub use block::{Block, BlockId, BlockPool};
pub use heap::{Heap, HeapConfig, HeapRef, HeapSize, HeapStats, SlotId, WeakRef};
