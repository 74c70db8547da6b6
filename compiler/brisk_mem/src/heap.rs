//! Generational slot table and reference-counted handles.

use std::cell::RefCell;
use std::fmt;
use std::ops::Deref;
use std::rc::{Rc, Weak};

use tracing::trace;

use crate::{BlockId, BlockPool};

/// Bytes a value owns beyond its inline `size_of`.
///
/// Used only for accounting: a value's block is sized to
/// `size_of::<T>() + heap_size()` at allocation time.
pub trait HeapSize {
    fn heap_size(&self) -> usize {
        0
    }
}

impl HeapSize for String {
    fn heap_size(&self) -> usize {
        self.len()
    }
}

impl<T> HeapSize for Vec<T> {
    fn heap_size(&self) -> usize {
        self.len() * std::mem::size_of::<T>()
    }
}

/// Generational index of a heap slot.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct SlotId {
    index: u32,
    generation: u32,
}

impl SlotId {
    pub fn index(self) -> usize {
        self.index as usize
    }

    pub fn generation(self) -> u32 {
        self.generation
    }
}

/// Pool sizing.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct HeapConfig {
    pub initial_blocks: usize,
    pub block_size: usize,
}

impl Default for HeapConfig {
    fn default() -> Self {
        HeapConfig {
            initial_blocks: 256,
            block_size: 64,
        }
    }
}

/// Allocation counters.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct HeapStats {
    pub allocations: u64,
    pub releases: u64,
    pub live: usize,
    pub peak_live: usize,
}

#[derive(Debug)]
struct Slot {
    generation: u32,
    live: bool,
    pinned: bool,
    block: Option<BlockId>,
}

#[derive(Debug)]
struct HeapState {
    slots: Vec<Slot>,
    free_slots: Vec<u32>,
    pool: BlockPool,
    stats: HeapStats,
}

impl HeapState {
    fn slot(&self, id: SlotId) -> &Slot {
        match self.slots.get(id.index()) {
            Some(slot) => slot,
            None => panic!("slot index {} out of range", id.index),
        }
    }
}

/// Per-session allocator. Clones share the same state.
#[derive(Clone)]
pub struct Heap {
    state: Rc<RefCell<HeapState>>,
}

impl Heap {
    pub fn new() -> Self {
        Self::with_config(HeapConfig::default())
    }

    pub fn with_config(config: HeapConfig) -> Self {
        Heap {
            state: Rc::new(RefCell::new(HeapState {
                slots: Vec::new(),
                free_slots: Vec::new(),
                pool: BlockPool::new(config.initial_blocks, config.block_size),
                stats: HeapStats::default(),
            })),
        }
    }

    /// Move `value` onto the heap.
    pub fn alloc<T: HeapSize>(&self, value: T) -> HeapRef<T> {
        let slot = self.reserve(footprint(&value), std::any::type_name::<T>(), false);
        self.wrap(value, slot)
    }

    /// Move `value` onto the heap permanently: its block is pinned and never
    /// returned to the pool, even once every handle is gone.
    pub fn alloc_static<T: HeapSize>(&self, value: T) -> HeapRef<T> {
        let slot = self.reserve(footprint(&value), std::any::type_name::<T>(), true);
        self.wrap(value, slot)
    }

    fn wrap<T>(&self, value: T, slot: SlotId) -> HeapRef<T> {
        HeapRef {
            inner: Rc::new(Allocation {
                value,
                slot,
                heap: self.clone(),
            }),
        }
    }

    fn reserve(&self, bytes: usize, owner: &'static str, pinned: bool) -> SlotId {
        let mut state = self.state.borrow_mut();
        let block = state.pool.create_block(bytes, owner);
        if pinned {
            state.pool.pin(block);
        }

        let id = if let Some(index) = state.free_slots.pop() {
            let slot = &mut state.slots[index as usize];
            slot.live = true;
            slot.pinned = pinned;
            slot.block = Some(block);
            SlotId {
                index,
                generation: slot.generation,
            }
        } else {
            let index = u32::try_from(state.slots.len())
                .unwrap_or_else(|_| panic!("heap exceeded {} slots", u32::MAX));
            state.slots.push(Slot {
                generation: 0,
                live: true,
                pinned,
                block: Some(block),
            });
            SlotId {
                index,
                generation: 0,
            }
        };

        let stats = &mut state.stats;
        stats.allocations += 1;
        stats.live += 1;
        stats.peak_live = stats.peak_live.max(stats.live);
        trace!(slot = id.index, generation = id.generation, bytes, owner, pinned, "alloc");
        id
    }

    /// Called once, when the last strong handle to `id` drops.
    fn release(&self, id: SlotId) {
        let mut state = self.state.borrow_mut();
        let slot = match state.slots.get_mut(id.index()) {
            Some(slot) => slot,
            None => panic!("release of slot index {} out of range", id.index),
        };
        assert!(
            slot.live && slot.generation == id.generation,
            "double free of slot {}:{}",
            id.index,
            id.generation
        );
        slot.live = false;
        slot.generation = slot.generation.wrapping_add(1);
        let pinned = slot.pinned;
        let block = slot.block.take();
        if let Some(block) = block {
            // Pinned blocks stay reserved for the life of the heap.
            state.pool.free_block(block);
        }
        state.free_slots.push(id.index);
        state.stats.releases += 1;
        state.stats.live -= 1;
        trace!(slot = id.index, generation = id.generation, pinned, "release");
    }

    /// Whether `id` still names a live allocation.
    pub fn is_live(&self, id: SlotId) -> bool {
        let state = self.state.borrow();
        let slot = state.slot(id);
        slot.live && slot.generation == id.generation
    }

    /// Bytes held by active blocks, pinned ones included.
    pub fn mem_allocated(&self) -> usize {
        self.state.borrow().pool.mem_allocated()
    }

    pub fn live_allocations(&self) -> usize {
        self.state.borrow().stats.live
    }

    pub fn stats(&self) -> HeapStats {
        self.state.borrow().stats
    }

    /// Blocks in the pool, active or not.
    pub fn block_count(&self) -> usize {
        self.state.borrow().pool.block_count()
    }

    /// Allocations served from a recycled block.
    pub fn reused_blocks(&self) -> u64 {
        self.state.borrow().pool.reused_count()
    }

    pub fn ptr_eq(a: &Heap, b: &Heap) -> bool {
        Rc::ptr_eq(&a.state, &b.state)
    }
}

impl Default for Heap {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Heap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("Heap")
            .field("live", &state.stats.live)
            .field("bytes", &state.pool.mem_allocated())
            .finish()
    }
}

fn footprint<T: HeapSize>(value: &T) -> usize {
    std::mem::size_of::<T>() + value.heap_size()
}

struct Allocation<T> {
    value: T,
    slot: SlotId,
    heap: Heap,
}

impl<T> Drop for Allocation<T> {
    fn drop(&mut self) {
        // The slot is released before `value` drops, so nested handles
        // released by the value's own drop see a consistent table.
        self.heap.release(self.slot);
    }
}

/// Strong, counted handle to a heap value.
///
/// Cloning adds a reference; dropping removes one. The value is released
/// when the count reaches zero.
pub struct HeapRef<T> {
    inner: Rc<Allocation<T>>,
}

impl<T> HeapRef<T> {
    /// Number of strong handles, this one included.
    pub fn ref_count(this: &Self) -> usize {
        Rc::strong_count(&this.inner)
    }

    pub fn slot(this: &Self) -> SlotId {
        this.inner.slot
    }

    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Rc::ptr_eq(&a.inner, &b.inner)
    }

    pub fn downgrade(this: &Self) -> WeakRef<T> {
        WeakRef {
            target: Rc::downgrade(&this.inner),
            slot: this.inner.slot,
            heap: this.inner.heap.clone(),
        }
    }

    /// The heap this value lives in.
    pub fn heap(this: &Self) -> &Heap {
        &this.inner.heap
    }
}

impl<T> Clone for HeapRef<T> {
    fn clone(&self) -> Self {
        HeapRef {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T> Deref for HeapRef<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.inner.value
    }
}

impl<T: fmt::Debug> fmt::Debug for HeapRef<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.inner.value, f)
    }
}

/// Uncounted back-reference.
pub struct WeakRef<T> {
    target: Weak<Allocation<T>>,
    slot: SlotId,
    heap: Heap,
}

impl<T> WeakRef<T> {
    /// Re-validate the slot and, if still live, return a strong handle.
    pub fn upgrade(&self) -> Option<HeapRef<T>> {
        if !self.heap.is_live(self.slot) {
            return None;
        }
        self.target.upgrade().map(|inner| HeapRef { inner })
    }

    pub fn is_valid(&self) -> bool {
        self.heap.is_live(self.slot)
    }

    pub fn slot(&self) -> SlotId {
        self.slot
    }
}

impl<T> Clone for WeakRef<T> {
    fn clone(&self) -> Self {
        WeakRef {
            target: Weak::clone(&self.target),
            slot: self.slot,
            heap: self.heap.clone(),
        }
    }
}

impl<T> fmt::Debug for WeakRef<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "WeakRef({}:{}, valid={})",
            self.slot.index,
            self.slot.generation,
            self.is_valid()
        )
    }
}

#[cfg(test)]
mod tests;
