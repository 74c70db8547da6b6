use super::*;
use pretty_assertions::assert_eq;

struct Node {
    label: String,
    child: Option<HeapRef<Node>>,
}

impl HeapSize for Node {
    fn heap_size(&self) -> usize {
        self.label.len()
    }
}

fn small_heap() -> Heap {
    Heap::with_config(HeapConfig {
        initial_blocks: 4,
        block_size: 16,
    })
}

#[test]
fn test_n_handles_release_exactly_once() {
    let heap = small_heap();
    let baseline = heap.mem_allocated();

    let original = heap.alloc(String::from("shared payload"));
    let expected = std::mem::size_of::<String>() + "shared payload".len();
    assert_eq!(heap.mem_allocated(), baseline + expected);

    let clones: Vec<_> = (0..10).map(|_| original.clone()).collect();
    assert_eq!(HeapRef::ref_count(&original), 11);
    assert_eq!(heap.stats().allocations, 1);

    drop(clones);
    assert_eq!(HeapRef::ref_count(&original), 1);
    assert_eq!(heap.stats().releases, 0);

    drop(original);
    assert_eq!(heap.mem_allocated(), baseline);
    assert_eq!(heap.stats().releases, 1);
    assert_eq!(heap.live_allocations(), 0);
}

#[test]
fn test_deref_reads_value() {
    let heap = small_heap();
    let text = heap.alloc(String::from("abc"));
    assert_eq!(text.len(), 3);
    assert_eq!(&**text, "abc");
}

#[test]
fn test_weak_ref_invalidated_on_release() {
    let heap = small_heap();
    let strong = heap.alloc(String::from("owner"));
    let weak = HeapRef::downgrade(&strong);
    assert!(weak.is_valid());
    assert_eq!(weak.upgrade().map(|s| s.to_string()), Some("owner".to_string()));
    assert_eq!(HeapRef::ref_count(&strong), 1);

    drop(strong);
    assert!(!weak.is_valid());
    assert!(weak.upgrade().is_none());
}

#[test]
fn test_reused_slot_gets_new_generation() {
    let heap = small_heap();
    let first = heap.alloc(String::from("first"));
    let stale = HeapRef::downgrade(&first);
    let old_slot = HeapRef::slot(&first);
    drop(first);

    let second = heap.alloc(String::from("second"));
    let new_slot = HeapRef::slot(&second);
    assert_eq!(new_slot.index(), old_slot.index());
    assert_ne!(new_slot.generation(), old_slot.generation());
    assert!(stale.upgrade().is_none());
    assert!(heap.is_live(new_slot));
    assert!(!heap.is_live(old_slot));
}

#[test]
fn test_freed_blocks_are_recycled() {
    let heap = Heap::with_config(HeapConfig {
        initial_blocks: 4,
        block_size: 64,
    });
    let blocks_before = heap.block_count();
    for i in 0..100 {
        let value = heap.alloc(format!("{i}"));
        drop(value);
    }
    assert_eq!(heap.block_count(), blocks_before);
    assert_eq!(heap.reused_blocks(), 100);
}

#[test]
fn test_nested_values_release_transitively() {
    let heap = small_heap();
    let leaf = heap.alloc(Node {
        label: "leaf".into(),
        child: None,
    });
    let root = heap.alloc(Node {
        label: "root".into(),
        child: Some(leaf.clone()),
    });
    let weak_leaf = HeapRef::downgrade(&leaf);
    drop(leaf);
    assert!(weak_leaf.is_valid());
    assert_eq!(
        root.child.as_ref().map(|c| c.label.as_str()),
        Some("leaf")
    );

    drop(root);
    assert!(!weak_leaf.is_valid());
    assert_eq!(heap.live_allocations(), 0);
    assert_eq!(heap.mem_allocated(), 0);
}

#[test]
fn test_static_allocation_keeps_block() {
    let heap = small_heap();
    let pinned = heap.alloc_static(String::from("builtin"));
    let bytes = heap.mem_allocated();
    assert!(bytes > 0);
    drop(pinned);
    assert_eq!(heap.mem_allocated(), bytes);
    assert_eq!(heap.live_allocations(), 0);
}

#[test]
fn test_ptr_eq_and_stats() {
    let heap = small_heap();
    let a = heap.alloc(String::from("x"));
    let b = a.clone();
    let c = heap.alloc(String::from("x"));
    assert!(HeapRef::ptr_eq(&a, &b));
    assert!(!HeapRef::ptr_eq(&a, &c));
    assert!(Heap::ptr_eq(&heap, HeapRef::heap(&a)));
    assert_eq!(heap.stats().peak_live, 2);
}

#[test]
#[should_panic(expected = "out of range")]
fn test_foreign_slot_panics() {
    let big = small_heap();
    let values: Vec<_> = (0..3).map(|i| big.alloc(format!("{i}"))).collect();
    let foreign = HeapRef::slot(&values[2]);
    let other = small_heap();
    let _ = other.is_live(foreign);
}
