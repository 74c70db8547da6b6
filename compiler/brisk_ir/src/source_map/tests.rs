use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_position_first_line() {
    let map = SourceMap::new("main.bk", "x = 1\ny = 2\n");
    let pos = map.position(4);
    assert_eq!(pos.line, 0);
    assert_eq!(pos.column, 4);
    assert_eq!(pos.line_number(), 1);
    assert_eq!(&*pos.file, "main.bk");
}

#[test]
fn test_position_after_newline() {
    let map = SourceMap::new("main.bk", "x = 1\ny = 2\n");
    let pos = map.position(6);
    assert_eq!((pos.line, pos.column), (1, 0));
    let pos = map.position(10);
    assert_eq!((pos.line, pos.column), (1, 4));
}

#[test]
fn test_line_text() {
    let map = SourceMap::new("main.bk", "first\nsecond line\nthird");
    assert_eq!(map.line_text(Span::new(8, 9)), "second line");
    assert_eq!(map.line_text(Span::new(19, 20)), "third");
}

#[test]
fn test_position_display() {
    let map = SourceMap::new("demo", "a\nbc");
    assert_eq!(map.position(3).to_string(), "File demo, Line 2, Column 2");
}

#[test]
fn test_slice() {
    let map = SourceMap::new("demo", "print(two)");
    assert_eq!(map.slice(Span::new(6, 9)), "two");
    assert_eq!(map.slice(Span::new(6, 99)), "");
}
