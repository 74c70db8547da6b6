#![expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use pretty_assertions::assert_eq;

use super::*;
use crate::EvalErrorKind;

fn bin(left: &Value, op: BinaryOp, right: &Value) -> EvalResult {
    let heap = Heap::new();
    evaluate_binary(left, right, op, &heap)
}

#[test]
fn test_int_arithmetic() {
    assert_eq!(bin(&Value::Int(7), BinaryOp::Add, &Value::Int(3)).unwrap(), Value::Int(10));
    assert_eq!(bin(&Value::Int(7), BinaryOp::Sub, &Value::Int(10)).unwrap(), Value::Int(-3));
    assert_eq!(bin(&Value::Int(7), BinaryOp::Mul, &Value::Int(3)).unwrap(), Value::Int(21));
    assert_eq!(bin(&Value::Int(7), BinaryOp::Div, &Value::Int(2)).unwrap(), Value::Int(3));
    assert_eq!(bin(&Value::Int(-7), BinaryOp::Div, &Value::Int(2)).unwrap(), Value::Int(-3));
    assert_eq!(bin(&Value::Int(-7), BinaryOp::Mod, &Value::Int(3)).unwrap(), Value::Int(-1));
    assert_eq!(bin(&Value::Int(2), BinaryOp::Pow, &Value::Int(10)).unwrap(), Value::Int(1024));
}

#[test]
fn test_mixed_arithmetic_widens() {
    assert_eq!(
        bin(&Value::Int(1), BinaryOp::Add, &Value::Float(0.5)).unwrap(),
        Value::Float(1.5)
    );
    assert_eq!(
        bin(&Value::Float(3.0), BinaryOp::Div, &Value::Int(2)).unwrap(),
        Value::Float(1.5)
    );
    assert_eq!(
        bin(&Value::Int(2), BinaryOp::Pow, &Value::Int(-1)).unwrap(),
        Value::Float(0.5)
    );
}

#[test]
fn test_division_by_zero() {
    for (left, right) in [
        (Value::Int(10), Value::Int(0)),
        (Value::Float(1.0), Value::Float(0.0)),
        (Value::Int(1), Value::Float(0.0)),
    ] {
        let err = bin(&left, BinaryOp::Div, &right).unwrap_err();
        assert_eq!(err.kind, EvalErrorKind::DivisionByZero);
    }
    let err = bin(&Value::Int(1), BinaryOp::Mod, &Value::Int(0)).unwrap_err();
    assert_eq!(err.message(), "Division by zero");
}

#[test]
fn test_overflow_is_an_error() {
    let err = bin(&Value::Int(i64::MAX), BinaryOp::Add, &Value::Int(1)).unwrap_err();
    assert_eq!(err.message(), "integer overflow in addition");
    let err = bin(&Value::Int(i64::MIN), BinaryOp::Div, &Value::Int(-1)).unwrap_err();
    assert_eq!(err.message(), "integer overflow in division");
    assert!(evaluate_unary(&Value::Int(i64::MIN), UnaryOp::Neg).is_err());
}

#[test]
fn test_huge_exponents() {
    assert_eq!(
        bin(&Value::Int(1), BinaryOp::Pow, &Value::Int(i64::MAX)).unwrap(),
        Value::Int(1)
    );
    assert_eq!(
        bin(&Value::Int(-1), BinaryOp::Pow, &Value::Int(5_000_000_000)).unwrap(),
        Value::Int(1)
    );
    assert!(bin(&Value::Int(2), BinaryOp::Pow, &Value::Int(5_000_000_000)).is_err());
}

#[test]
fn test_string_operators() {
    let heap = Heap::new();
    let ab = Value::string(&heap, "ab");
    let cd = Value::string(&heap, "cd");

    let joined = evaluate_binary(&ab, &cd, BinaryOp::Add, &heap).unwrap();
    assert_eq!(joined.as_str(), Some("abcd"));
    let repeated = evaluate_binary(&ab, &Value::Int(3), BinaryOp::Mul, &heap).unwrap();
    assert_eq!(repeated.as_str(), Some("ababab"));
    let second = evaluate_binary(&ab, &Value::Int(1), BinaryOp::Div, &heap).unwrap();
    assert_eq!(second.as_str(), Some("b"));

    let err = evaluate_binary(&ab, &Value::Int(5), BinaryOp::Div, &heap).unwrap_err();
    assert_eq!(err.message(), "index out of bounds: 5 (length 2)");
}

#[test]
fn test_list_operators_do_not_mutate() {
    let heap = Heap::new();
    let list = Value::list(&heap, vec![Value::Int(1), Value::Int(2)]);

    let appended = evaluate_binary(&list, &Value::Int(3), BinaryOp::Add, &heap).unwrap();
    assert_eq!(appended.to_string(), "[1, 2, 3]");
    let removed = evaluate_binary(&list, &Value::Int(0), BinaryOp::Sub, &heap).unwrap();
    assert_eq!(removed.to_string(), "[2]");
    let doubled = evaluate_binary(&list, &list, BinaryOp::Mul, &heap).unwrap();
    assert_eq!(doubled.to_string(), "[1, 2, 1, 2]");
    assert_eq!(list.to_string(), "[1, 2]");

    let item = evaluate_binary(&list, &Value::Int(1), BinaryOp::Div, &heap).unwrap();
    assert_eq!(item, Value::Int(2));
    let err = evaluate_binary(&list, &Value::Int(10), BinaryOp::Div, &heap).unwrap_err();
    assert_eq!(err.kind, EvalErrorKind::IndexOutOfBounds { index: 10, len: 2 });
    assert!(evaluate_binary(&list, &Value::Int(-1), BinaryOp::Sub, &heap).is_err());
}

#[test]
fn test_mismatched_kinds_are_illegal() {
    let heap = Heap::new();
    let s = Value::string(&heap, "a");
    let err = evaluate_binary(&Value::Int(1), &s, BinaryOp::Add, &heap).unwrap_err();
    assert_eq!(err.message(), "Illegal operation: int + string");
    let err = evaluate_binary(&Value::Null, &Value::Int(1), BinaryOp::Lt, &heap).unwrap_err();
    assert_eq!(err.message(), "Illegal operation: null < int");
    let err = evaluate_unary(&s, UnaryOp::Neg).unwrap_err();
    assert_eq!(err.message(), "Illegal operation: -string");
}

#[test]
fn test_equality() {
    let heap = Heap::new();
    assert!(values_equal(&Value::Int(1), &Value::Float(1.0)));
    assert!(!values_equal(&Value::Int(1), &Value::string(&heap, "1")));
    assert!(values_equal(&Value::Null, &Value::Null));
    assert!(values_equal(
        &Value::list(&heap, vec![Value::Int(1)]),
        &Value::list(&heap, vec![Value::Float(1.0)])
    ));
    assert_eq!(
        bin(&Value::Null, BinaryOp::NotEq, &Value::Bool(false)).unwrap(),
        Value::Bool(true)
    );
}

#[test]
fn test_comparisons() {
    let heap = Heap::new();
    assert_eq!(bin(&Value::Int(1), BinaryOp::Lt, &Value::Int(2)).unwrap(), Value::Bool(true));
    assert_eq!(
        bin(&Value::Float(2.0), BinaryOp::GtEq, &Value::Int(2)).unwrap(),
        Value::Bool(true)
    );
    let a = Value::string(&heap, "apple");
    let b = Value::string(&heap, "banana");
    assert_eq!(
        evaluate_binary(&a, &b, BinaryOp::Gt, &heap).unwrap(),
        Value::Bool(false)
    );
}

#[test]
fn test_unary() {
    assert_eq!(evaluate_unary(&Value::Int(3), UnaryOp::Neg).unwrap(), Value::Int(-3));
    assert_eq!(evaluate_unary(&Value::Float(1.5), UnaryOp::Pos).unwrap(), Value::Float(1.5));
    assert_eq!(evaluate_unary(&Value::Null, UnaryOp::Not).unwrap(), Value::Bool(true));
    assert_eq!(evaluate_unary(&Value::Int(2), UnaryOp::Not).unwrap(), Value::Bool(false));
}

#[test]
fn test_string_repetition_overflow() {
    let heap = Heap::new();
    let ab = Value::string(&heap, "ab");
    let err = evaluate_binary(&ab, &Value::Int(i64::MAX), BinaryOp::Mul, &heap).unwrap_err();
    assert_eq!(err.kind, EvalErrorKind::IntegerOverflow { op: "repetition" });
    assert_eq!(err.message(), "integer overflow in repetition");

    let empty = Value::string(&heap, "");
    let repeated = evaluate_binary(&empty, &Value::Int(i64::MAX), BinaryOp::Mul, &heap).unwrap();
    assert_eq!(repeated.as_str(), Some(""));
}

#[test]
fn test_self_containing_lists_compare() {
    let heap = Heap::new();
    let list = Value::list(&heap, vec![Value::Int(1)]);
    if let Some(items) = list.as_list() {
        items.borrow_mut().push(list.clone());
    }
    assert_eq!(
        bin(&list, BinaryOp::Eq, &list).unwrap(),
        Value::Bool(true)
    );
    let other = Value::list(&heap, vec![Value::Float(1.0), list.clone()]);
    assert!(values_equal(&list, &other));
    assert_eq!(list.to_string(), "[1, [...]]");

    if let Some(items) = list.as_list() {
        let detached = std::mem::take(&mut *items.borrow_mut());
        drop(detached);
    }
}
