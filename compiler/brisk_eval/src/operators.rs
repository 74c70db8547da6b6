//! Operator semantics.
//!
//! Each operator is a direct match over operand kinds. Per-kind helpers
//! return `Ok(None)` when the operator is not defined for the pair; the
//! dispatcher turns that into an "Illegal operation" error naming both
//! kinds. Genuine failures (division by zero, overflow, bad index) are
//! reported by the helpers themselves.
//!
//! Integer arithmetic is checked; integer division truncates toward zero.
//! Mixing an int with a float widens to float.

use std::cmp::Ordering;

use brisk_ir::{BinaryOp, UnaryOp};
use brisk_mem::{Heap, HeapRef};

use crate::errors::{
    division_by_zero, illegal_binary_op, illegal_unary_op, index_out_of_bounds, integer_overflow,
};
use crate::{EvalResult, Value};

type OpResult = EvalResult<Option<Value>>;

/// Apply a binary operator to two evaluated operands.
///
/// `&&` and `||` are accepted here for completeness; the interpreter
/// short-circuits them before both operands exist.
pub fn evaluate_binary(left: &Value, right: &Value, op: BinaryOp, heap: &Heap) -> EvalResult {
    let result = match op {
        BinaryOp::Add => add(left, right, heap)?,
        BinaryOp::Sub => sub(left, right, heap)?,
        BinaryOp::Mul => mul(left, right, heap)?,
        BinaryOp::Div => div(left, right, heap)?,
        BinaryOp::Mod => rem(left, right)?,
        BinaryOp::Pow => pow(left, right)?,
        BinaryOp::Eq => Some(Value::Bool(values_equal(left, right))),
        BinaryOp::NotEq => Some(Value::Bool(!values_equal(left, right))),
        BinaryOp::Lt | BinaryOp::Gt | BinaryOp::LtEq | BinaryOp::GtEq => {
            compare(left, right).map(|ord| Value::Bool(ordering_matches(op, ord)))
        }
        BinaryOp::And => Some(Value::Bool(left.is_truthy() && right.is_truthy())),
        BinaryOp::Or => Some(Value::Bool(left.is_truthy() || right.is_truthy())),
    };
    result.ok_or_else(|| illegal_binary_op(op.as_symbol(), left.type_name(), right.type_name()))
}

/// Apply a unary operator.
pub fn evaluate_unary(operand: &Value, op: UnaryOp) -> EvalResult {
    match (op, operand) {
        (UnaryOp::Neg, Value::Int(n)) => n
            .checked_neg()
            .map(Value::Int)
            .ok_or_else(|| integer_overflow("negation")),
        (UnaryOp::Neg, Value::Float(x)) => Ok(Value::Float(-x)),
        (UnaryOp::Pos, Value::Int(_) | Value::Float(_)) => Ok(operand.clone()),
        (UnaryOp::Not, _) => Ok(Value::Bool(!operand.is_truthy())),
        _ => Err(illegal_unary_op(op.as_symbol(), operand.type_name())),
    }
}

/// Equality as seen by `==`.
///
/// Ints and floats compare numerically. Strings and lists compare by
/// content. Functions, objects and exceptions compare by identity. Values
/// of unrelated kinds are never equal.
pub fn values_equal(left: &Value, right: &Value) -> bool {
    left.equals(right, true)
}

fn compare(left: &Value, right: &Value) -> Option<Ordering> {
    match (left, right) {
        (Value::Int(a), Value::Int(b)) => Some(a.cmp(b)),
        (Value::Int(_) | Value::Float(_), Value::Int(_) | Value::Float(_)) => {
            left.as_float()?.partial_cmp(&right.as_float()?)
        }
        (Value::Str(a), Value::Str(b)) => Some(a.as_str().cmp(b.as_str())),
        _ => None,
    }
}

fn ordering_matches(op: BinaryOp, ord: Ordering) -> bool {
    match op {
        BinaryOp::Lt => ord == Ordering::Less,
        BinaryOp::Gt => ord == Ordering::Greater,
        BinaryOp::LtEq => ord != Ordering::Greater,
        BinaryOp::GtEq => ord != Ordering::Less,
        _ => false,
    }
}

/// Both operands as floats when at least one is a float.
fn float_pair(left: &Value, right: &Value) -> Option<(f64, f64)> {
    match (left, right) {
        (Value::Int(_), Value::Int(_)) => None,
        _ => Some((left.as_float()?, right.as_float()?)),
    }
}

#[inline]
fn checked_int(result: Option<i64>, op_name: &'static str) -> OpResult {
    result
        .map(|n| Some(Value::Int(n)))
        .ok_or_else(|| integer_overflow(op_name))
}

/// Convert a script index into a position in a sequence of `len` items.
fn element_index(index: i64, len: usize) -> EvalResult<usize> {
    usize::try_from(index)
        .ok()
        .filter(|&i| i < len)
        .ok_or_else(|| index_out_of_bounds(index, len))
}

fn add(left: &Value, right: &Value, heap: &Heap) -> OpResult {
    match (left, right) {
        (Value::Int(a), Value::Int(b)) => checked_int(a.checked_add(*b), "addition"),
        (Value::Str(a), Value::Str(b)) => {
            let mut joined = String::with_capacity(a.len() + b.len());
            joined.push_str(a);
            joined.push_str(b);
            Ok(Some(Value::string(heap, joined)))
        }
        // `list + x` is a new list with `x` appended.
        (Value::List(list), item) => {
            let mut items = list.snapshot();
            items.push(item.clone());
            Ok(Some(Value::list(heap, items)))
        }
        _ => Ok(float_pair(left, right).map(|(a, b)| Value::Float(a + b))),
    }
}

fn sub(left: &Value, right: &Value, heap: &Heap) -> OpResult {
    match (left, right) {
        (Value::Int(a), Value::Int(b)) => checked_int(a.checked_sub(*b), "subtraction"),
        // `list - i` is a new list without element `i`.
        (Value::List(list), Value::Int(index)) => {
            let mut items = list.snapshot();
            let at = element_index(*index, items.len())?;
            items.remove(at);
            Ok(Some(Value::list(heap, items)))
        }
        _ => Ok(float_pair(left, right).map(|(a, b)| Value::Float(a - b))),
    }
}

fn mul(left: &Value, right: &Value, heap: &Heap) -> OpResult {
    match (left, right) {
        (Value::Int(a), Value::Int(b)) => checked_int(a.checked_mul(*b), "multiplication"),
        (Value::Str(s), Value::Int(times)) => {
            let times = usize::try_from(*times).unwrap_or(0);
            // A `String` cannot hold more than `isize::MAX` bytes.
            let fits = s
                .len()
                .checked_mul(times)
                .is_some_and(|total| isize::try_from(total).is_ok());
            if !fits {
                return Err(integer_overflow("repetition"));
            }
            Ok(Some(Value::string(heap, s.repeat(times))))
        }
        // `a * b` on lists concatenates.
        (Value::List(a), Value::List(b)) => {
            let mut items = a.snapshot();
            items.extend(b.snapshot());
            Ok(Some(Value::list(heap, items)))
        }
        _ => Ok(float_pair(left, right).map(|(a, b)| Value::Float(a * b))),
    }
}

fn div(left: &Value, right: &Value, heap: &Heap) -> OpResult {
    match (left, right) {
        (Value::Int(_), Value::Int(0)) => Err(division_by_zero()),
        (Value::Int(a), Value::Int(b)) => checked_int(a.checked_div(*b), "division"),
        // `/` on a list or string reads one element.
        (Value::List(list), Value::Int(index)) => {
            let items = list.borrow();
            let at = element_index(*index, items.len())?;
            Ok(Some(items[at].clone()))
        }
        (Value::Str(s), Value::Int(index)) => {
            let len = s.chars().count();
            let at = element_index(*index, len)?;
            let ch = s.chars().nth(at).map(String::from).unwrap_or_default();
            Ok(Some(Value::string(heap, ch)))
        }
        _ => match float_pair(left, right) {
            Some((_, b)) if b == 0.0 => Err(division_by_zero()),
            pair => Ok(pair.map(|(a, b)| Value::Float(a / b))),
        },
    }
}

fn rem(left: &Value, right: &Value) -> OpResult {
    match (left, right) {
        (Value::Int(_), Value::Int(0)) => Err(division_by_zero()),
        (Value::Int(a), Value::Int(b)) => checked_int(a.checked_rem(*b), "modulo"),
        _ => match float_pair(left, right) {
            Some((_, b)) if b == 0.0 => Err(division_by_zero()),
            pair => Ok(pair.map(|(a, b)| Value::Float(a % b))),
        },
    }
}

fn pow(left: &Value, right: &Value) -> OpResult {
    match (left, right) {
        (Value::Int(base), Value::Int(exp)) if *exp >= 0 => match u32::try_from(*exp) {
            Ok(exp) => checked_int(base.checked_pow(exp), "exponentiation"),
            Err(_) if matches!(base, -1..=1) => {
                // Huge exponents only stay representable for these bases.
                let odd = exp % 2 == 1;
                Ok(Some(Value::Int(if *base == -1 && !odd { 1 } else { *base })))
            }
            Err(_) => Err(integer_overflow("exponentiation")),
        },
        _ => {
            let (Some(a), Some(b)) = (left.as_float(), right.as_float()) else {
                return Ok(None);
            };
            Ok(Some(Value::Float(a.powf(b))))
        }
    }
}

#[cfg(test)]
mod tests;
