use super::*;

#[test]
fn test_span_basic() {
    let span = Span::new(4, 9);
    assert_eq!(span.len(), 5);
    assert!(!span.is_empty());
    assert!(span.contains(4));
    assert!(!span.contains(9));
}

#[test]
fn test_span_merge_is_union() {
    let left = Span::new(10, 12);
    let right = Span::new(15, 30);
    assert_eq!(left.merge(right), Span::new(10, 30));
    assert_eq!(right.merge(left), Span::new(10, 30));
}

#[test]
fn test_span_point_is_empty() {
    let span = Span::point(7);
    assert!(span.is_empty());
    assert_eq!(span.to_range(), 7..7);
}

#[test]
fn test_span_from_range_saturates() {
    let span = Span::from_range(3..usize::MAX);
    assert_eq!(span.start, 3);
    assert_eq!(span.end, u32::MAX);
}

#[test]
fn test_span_display() {
    assert_eq!(format!("{}", Span::new(1, 5)), "1..5");
    assert_eq!(format!("{:?}", Span::new(1, 5)), "1..5");
}
