use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_preallocated_blocks_are_inactive() {
    let pool = BlockPool::new(4, 32);
    assert_eq!(pool.block_count(), 4);
    assert_eq!(pool.active_count(), 0);
    assert_eq!(pool.mem_allocated(), 0);
    assert_eq!(pool.capacity(), 128);
}

#[test]
fn test_create_reuses_before_growing() {
    let mut pool = BlockPool::new(2, 32);
    let a = pool.create_block(10, "a");
    let b = pool.create_block(20, "b");
    assert_eq!(pool.block_count(), 2);
    assert_eq!(pool.reused_count(), 2);
    assert_eq!(pool.mem_allocated(), 30);
    assert_eq!(pool.block(a).owner(), Some("a"));

    let c = pool.create_block(8, "c");
    assert_eq!(pool.block_count(), 3);
    assert_ne!(c, a);
    assert_ne!(c, b);
}

#[test]
fn test_oversized_request_grows_to_fit() {
    let mut pool = BlockPool::new(1, 16);
    let big = pool.create_block(100, "big");
    assert_eq!(pool.block(big).capacity(), 100);
    assert_eq!(pool.block_count(), 2);
}

#[test]
fn test_smallest_sufficient_block_is_chosen() {
    let mut pool = BlockPool::new(0, 8);
    let large = pool.create_block(64, "large");
    let medium = pool.create_block(32, "medium");
    let small = pool.create_block(8, "small");
    pool.free_block(large);
    pool.free_block(medium);
    pool.free_block(small);

    let reused = pool.create_block(20, "x");
    assert_eq!(reused, medium);
    let reused = pool.create_block(5, "y");
    assert_eq!(reused, small);
}

#[test]
fn test_free_deactivates() {
    let mut pool = BlockPool::new(1, 8);
    let id = pool.create_block(4, "bytes");
    assert_eq!(pool.block(id).owner(), Some("bytes"));
    assert!(pool.free_block(id));
    let block = pool.block(id);
    assert!(!block.is_active());
    assert_eq!(block.owner(), None);
    assert_eq!(block.used(), 0);
    assert_eq!(pool.mem_allocated(), 0);
}

#[test]
fn test_pinned_block_survives_free() {
    let mut pool = BlockPool::new(1, 8);
    let id = pool.create_block(6, "static");
    pool.pin(id);
    assert!(!pool.free_block(id));
    assert!(pool.block(id).is_active());
    assert_eq!(pool.mem_allocated(), 6);
}

#[test]
#[should_panic(expected = "double free")]
fn test_double_free_panics() {
    let mut pool = BlockPool::new(1, 8);
    let id = pool.create_block(1, "x");
    pool.free_block(id);
    pool.free_block(id);
}
