//! Native functions available to every script.
//!
//! Builtins are ordinary function values bound in the global context.
//! They go through the same call path as script functions (arity check,
//! fresh context with parameters bound), then receive their arguments as a
//! [`NativeCall`].

use brisk_ir::{Span, StringInterner};
use brisk_mem::{Heap, HeapRef};

use crate::context::ContextRef;
use crate::errors::{custom, index_out_of_bounds, type_mismatch};
use crate::print_handler::PrintHandlerImpl;
use crate::value::ListData;
use crate::{EvalResult, RuntimeResult, Value};

/// Signature of a native function.
pub type NativeFn = fn(&mut NativeCall<'_>) -> RuntimeResult;

/// Everything a native function can see.
pub struct NativeCall<'a> {
    pub args: &'a [Value],
    /// The context created for this call; parameters are bound in it.
    pub context: &'a ContextRef,
    pub heap: &'a Heap,
    pub interner: &'a StringInterner,
    pub output: &'a PrintHandlerImpl,
    pub span: Span,
}

impl NativeCall<'_> {
    /// Argument `index`, or null past the end.
    pub fn arg(&self, index: usize) -> Value {
        self.args.get(index).cloned().unwrap_or(Value::Null)
    }

    pub fn list_arg(&self, index: usize) -> EvalResult<HeapRef<ListData>> {
        match self.args.get(index) {
            Some(Value::List(list)) => Ok(list.clone()),
            other => Err(type_mismatch("list", other.map_or("null", Value::type_name))),
        }
    }

    pub fn int_arg(&self, index: usize) -> EvalResult<i64> {
        match self.args.get(index) {
            Some(Value::Int(n)) => Ok(*n),
            other => Err(type_mismatch("int", other.map_or("null", Value::type_name))),
        }
    }

    pub fn string(&self, s: impl Into<String>) -> Value {
        Value::string(self.heap, s)
    }
}

/// A native function with its parameter names.
#[derive(Clone, Copy)]
pub struct Builtin {
    pub name: &'static str,
    pub params: &'static [&'static str],
    pub func: NativeFn,
}

/// Builtins registered in every session.
pub const BUILTINS: &[Builtin] = &[
    Builtin {
        name: "print",
        params: &["value"],
        func: print,
    },
    Builtin {
        name: "print_ret",
        params: &["value"],
        func: print_ret,
    },
    Builtin {
        name: "len",
        params: &["value"],
        func: len,
    },
    Builtin {
        name: "type_of",
        params: &["value"],
        func: type_of,
    },
    Builtin {
        name: "is_null",
        params: &["value"],
        func: |call| Ok(Value::Bool(call.arg(0).is_null())),
    },
    Builtin {
        name: "is_number",
        params: &["value"],
        func: |call| Ok(Value::Bool(call.arg(0).is_number())),
    },
    Builtin {
        name: "is_int",
        params: &["value"],
        func: |call| Ok(Value::Bool(matches!(call.arg(0), Value::Int(_)))),
    },
    Builtin {
        name: "is_float",
        params: &["value"],
        func: |call| Ok(Value::Bool(matches!(call.arg(0), Value::Float(_)))),
    },
    Builtin {
        name: "is_string",
        params: &["value"],
        func: |call| Ok(Value::Bool(matches!(call.arg(0), Value::Str(_)))),
    },
    Builtin {
        name: "is_list",
        params: &["value"],
        func: |call| Ok(Value::Bool(matches!(call.arg(0), Value::List(_)))),
    },
    Builtin {
        name: "is_function",
        params: &["value"],
        func: |call| Ok(Value::Bool(matches!(call.arg(0), Value::Function(_)))),
    },
    Builtin {
        name: "is_object",
        params: &["value"],
        func: |call| Ok(Value::Bool(matches!(call.arg(0), Value::Object(_)))),
    },
    Builtin {
        name: "is_exception",
        params: &["value"],
        func: |call| Ok(Value::Bool(matches!(call.arg(0), Value::Exception(_)))),
    },
    Builtin {
        name: "str",
        params: &["value"],
        func: |call| Ok(call.string(call.arg(0).to_string())),
    },
    Builtin {
        name: "int",
        params: &["value"],
        func: to_int,
    },
    Builtin {
        name: "float",
        params: &["value"],
        func: to_float,
    },
    Builtin {
        name: "append",
        params: &["list", "value"],
        func: append,
    },
    Builtin {
        name: "pop",
        params: &["list", "index"],
        func: pop,
    },
    Builtin {
        name: "extend",
        params: &["list", "other"],
        func: extend,
    },
    Builtin {
        name: "error",
        params: &["message"],
        func: error,
    },
];

fn print(call: &mut NativeCall<'_>) -> RuntimeResult {
    call.output.println(&call.arg(0).to_string());
    Ok(Value::Null)
}

/// Like `print`, but returns the text instead of writing it.
fn print_ret(call: &mut NativeCall<'_>) -> RuntimeResult {
    Ok(call.string(call.arg(0).to_string()))
}

fn len(call: &mut NativeCall<'_>) -> RuntimeResult {
    let n = match call.arg(0) {
        Value::List(list) => list.len(),
        Value::Str(s) => s.chars().count(),
        other => return Err(type_mismatch("list or string", other.type_name()).into()),
    };
    let n = i64::try_from(n).map_err(|_| custom("length does not fit in an int"))?;
    Ok(Value::Int(n))
}

fn type_of(call: &mut NativeCall<'_>) -> RuntimeResult {
    Ok(call.string(call.arg(0).type_name()))
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "float to int conversion truncates toward zero"
)]
fn to_int(call: &mut NativeCall<'_>) -> RuntimeResult {
    match call.arg(0) {
        value @ Value::Int(_) => Ok(value),
        Value::Float(x) if x.is_finite() => Ok(Value::Int(x.trunc() as i64)),
        Value::Bool(b) => Ok(Value::Int(i64::from(b))),
        Value::Str(s) => s
            .trim()
            .parse::<i64>()
            .map(Value::Int)
            .map_err(|_| custom(format!("cannot convert '{}' to int", s.as_str())).into()),
        other => Err(type_mismatch("number or string", other.type_name()).into()),
    }
}

fn to_float(call: &mut NativeCall<'_>) -> RuntimeResult {
    match call.arg(0) {
        value @ (Value::Int(_) | Value::Float(_)) => Ok(value.as_float().map_or(value, Value::Float)),
        Value::Bool(b) => Ok(Value::Float(f64::from(u8::from(b)))),
        Value::Str(s) => s
            .trim()
            .parse::<f64>()
            .map(Value::Float)
            .map_err(|_| custom(format!("cannot convert '{}' to float", s.as_str())).into()),
        other => Err(type_mismatch("number or string", other.type_name()).into()),
    }
}

fn append(call: &mut NativeCall<'_>) -> RuntimeResult {
    let list = call.list_arg(0)?;
    list.borrow_mut().push(call.arg(1));
    Ok(Value::Null)
}

/// Remove and return the element at `index`.
fn pop(call: &mut NativeCall<'_>) -> RuntimeResult {
    let list = call.list_arg(0)?;
    let index = call.int_arg(1)?;
    let mut items = list.borrow_mut();
    let len = items.len();
    match usize::try_from(index).ok().filter(|&i| i < len) {
        Some(at) => Ok(items.remove(at)),
        None => Err(index_out_of_bounds(index, len).into()),
    }
}

fn extend(call: &mut NativeCall<'_>) -> RuntimeResult {
    let list = call.list_arg(0)?;
    // Snapshot first: `extend(xs, xs)` reads and writes the same storage.
    let extra = call.list_arg(1)?.snapshot();
    list.borrow_mut().extend(extra);
    Ok(Value::Null)
}

/// Build an exception value without raising it.
fn error(call: &mut NativeCall<'_>) -> RuntimeResult {
    let err = custom(call.arg(0).to_string()).with_span(call.span);
    Ok(Value::exception(call.heap, err))
}
