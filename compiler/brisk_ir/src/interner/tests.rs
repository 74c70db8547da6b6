use super::*;

#[test]
fn test_intern_is_idempotent() {
    let interner = StringInterner::new();
    let a = interner.intern("count");
    let b = interner.intern("count");
    assert_eq!(a, b);
    assert_eq!(interner.lookup(a), "count");
}

#[test]
fn test_distinct_strings_get_distinct_names() {
    let interner = StringInterner::new();
    let a = interner.intern("x");
    let b = interner.intern("y");
    assert_ne!(a, b);
    assert_eq!(interner.len(), 3);
}

#[test]
fn test_empty_is_preinterned() {
    let interner = StringInterner::new();
    assert_eq!(interner.intern(""), Name::EMPTY);
    assert_eq!(interner.lookup(Name::EMPTY), "");
}

#[test]
fn test_get_does_not_intern() {
    let interner = StringInterner::new();
    assert_eq!(interner.get("missing"), None);
    assert_eq!(interner.len(), 1);
    let name = interner.intern("missing");
    assert_eq!(interner.get("missing"), Some(name));
}

#[test]
fn test_shared_interner_clones_share_table() {
    let shared = SharedInterner::new();
    let other = shared.clone();
    let name = shared.intern("print");
    assert_eq!(other.lookup(name), "print");
}
