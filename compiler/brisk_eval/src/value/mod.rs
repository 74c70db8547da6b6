//! Runtime values.
//!
//! Scalars (`null`, booleans, numbers) are stored inline. Everything else
//! lives in the session [`Heap`] and is reached through a counted
//! [`HeapRef`]; cloning a [`Value`] produces a new handle to the same
//! payload. Strings are immutable, so sharing them is invisible to
//! scripts. Lists are shared on purpose: `append(xs, 1)` is visible
//! through every name bound to `xs`.

use std::cell::{Ref, RefCell, RefMut};
use std::fmt;
use std::mem::size_of;

use brisk_ir::{pretty, ExprId, Name};
use brisk_mem::{Heap, HeapRef, HeapSize, SlotId};
use smallvec::SmallVec;

use crate::builtins::NativeFn;
use crate::context::{Context, ContextRef};
use crate::unit::SharedUnit;
use crate::EvalError;

/// A runtime value.
#[derive(Clone)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(HeapRef<String>),
    List(HeapRef<ListData>),
    Function(HeapRef<FunctionData>),
    /// An object template, or an instance when `instance` is set.
    Object(HeapRef<ObjectData>),
    /// An error captured as a value by the `error` builtin.
    Exception(HeapRef<EvalError>),
}

impl Value {
    pub fn string(heap: &Heap, s: impl Into<String>) -> Value {
        Value::Str(heap.alloc(s.into()))
    }

    pub fn list(heap: &Heap, items: Vec<Value>) -> Value {
        Value::List(heap.alloc(ListData::new(items)))
    }

    pub fn function(heap: &Heap, func: FunctionData) -> Value {
        Value::Function(heap.alloc(func))
    }

    pub fn object(heap: &Heap, object: ObjectData) -> Value {
        Value::Object(heap.alloc(object))
    }

    pub fn exception(heap: &Heap, err: EvalError) -> Value {
        Value::Exception(heap.alloc(err))
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "string",
            Value::List(_) => "list",
            Value::Function(_) => "function",
            Value::Object(obj) if obj.is_instance() => "instance",
            Value::Object(_) => "object",
            Value::Exception(_) => "exception",
        }
    }

    /// Truthiness used by conditions and the logical operators.
    ///
    /// `null`, `false`, zero, the empty string and the empty list are
    /// false; everything else is true.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Int(n) => *n != 0,
            Value::Float(f) => *f != 0.0,
            Value::Str(s) => !s.is_empty(),
            Value::List(list) => !list.is_empty(),
            Value::Function(_) | Value::Object(_) | Value::Exception(_) => true,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_number(&self) -> bool {
        matches!(self, Value::Int(_) | Value::Float(_))
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Numeric value widened to `f64`.
    #[expect(
        clippy::cast_precision_loss,
        reason = "mixed int/float arithmetic widens to f64"
    )]
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Int(n) => Some(*n as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&HeapRef<ListData>> {
        match self {
            Value::List(list) => Some(list),
            _ => None,
        }
    }

    /// Source-like rendering: strings are quoted, everything else matches
    /// [`Display`](fmt::Display).
    pub fn repr(&self) -> String {
        match self {
            Value::Str(s) => pretty::quote_string(s),
            other => other.to_string(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(x) => f.write_str(&pretty::float_literal(*x)),
            Value::Str(s) => f.write_str(s),
            Value::List(list) => write_list(f, list, &mut SmallVec::new()),
            Value::Function(func) => write!(f, "<function {}>", func.display_name()),
            Value::Object(obj) if obj.is_instance() => write!(f, "<instance {}>", obj.name),
            Value::Object(obj) => write!(f, "<object {}>", obj.name),
            Value::Exception(err) => write!(f, "{}", &**err),
        }
    }
}

/// Render `list`, printing a list that contains itself as `[...]`.
fn write_list(
    f: &mut fmt::Formatter<'_>,
    list: &HeapRef<ListData>,
    path: &mut SmallVec<[SlotId; 8]>,
) -> fmt::Result {
    let slot = HeapRef::slot(list);
    if path.contains(&slot) {
        return f.write_str("[...]");
    }
    path.push(slot);
    f.write_str("[")?;
    for (i, item) in list.borrow().iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        match item {
            Value::Str(s) => f.write_str(&pretty::quote_string(s))?,
            Value::List(inner) => write_list(f, inner, path)?,
            other => write!(f, "{other}")?,
        }
    }
    path.pop();
    f.write_str("]")
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("Null"),
            Value::Bool(b) => write!(f, "Bool({b})"),
            Value::Int(n) => write!(f, "Int({n})"),
            Value::Float(x) => write!(f, "Float({x:?})"),
            Value::Str(s) => write!(f, "Str({:?})", s.as_str()),
            Value::List(_) => write!(f, "List({self})"),
            Value::Function(func) => write!(f, "Function({})", func.display_name()),
            Value::Object(obj) => write!(f, "Object({})", obj.name),
            Value::Exception(err) => write!(f, "Exception({:?})", err.message()),
        }
    }
}

/// Strict structural equality: kinds must match exactly, so `Int(1)` is
/// not equal to `Float(1.0)`. The `==` operator uses
/// [`values_equal`](crate::operators::values_equal) instead.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other, false)
    }
}

impl Value {
    /// Structural equality. With `numeric`, ints and floats compare by
    /// value; otherwise kinds must match exactly.
    pub(crate) fn equals(&self, other: &Value, numeric: bool) -> bool {
        equal_on_path(self, other, numeric, &mut SmallVec::new())
    }
}

/// `path` holds the list pairs being compared further up; meeting one
/// again means the lists repeat the same structure from here on.
fn equal_on_path(
    left: &Value,
    right: &Value,
    numeric: bool,
    path: &mut SmallVec<[(SlotId, SlotId); 8]>,
) -> bool {
    match (left, right) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(a), Value::Bool(b)) => a == b,
        (Value::Int(a), Value::Int(b)) => a == b,
        (Value::Int(_) | Value::Float(_), Value::Int(_) | Value::Float(_)) if numeric => {
            left.as_float() == right.as_float()
        }
        (Value::Float(a), Value::Float(b)) => a == b,
        (Value::Str(a), Value::Str(b)) => a.as_str() == b.as_str(),
        (Value::List(a), Value::List(b)) => {
            if HeapRef::ptr_eq(a, b) {
                return true;
            }
            let pair = (HeapRef::slot(a), HeapRef::slot(b));
            if path.contains(&pair) {
                return true;
            }
            let (xs, ys) = (a.borrow(), b.borrow());
            if xs.len() != ys.len() {
                return false;
            }
            path.push(pair);
            let equal = xs
                .iter()
                .zip(ys.iter())
                .all(|(x, y)| equal_on_path(x, y, numeric, path));
            path.pop();
            equal
        }
        (Value::Function(a), Value::Function(b)) => HeapRef::ptr_eq(a, b),
        (Value::Object(a), Value::Object(b)) => HeapRef::ptr_eq(a, b),
        (Value::Exception(a), Value::Exception(b)) => HeapRef::ptr_eq(a, b),
        _ => false,
    }
}

/// Mutable list storage.
pub struct ListData {
    items: RefCell<Vec<Value>>,
}

impl ListData {
    pub fn new(items: Vec<Value>) -> Self {
        ListData {
            items: RefCell::new(items),
        }
    }

    pub fn borrow(&self) -> Ref<'_, Vec<Value>> {
        self.items.borrow()
    }

    pub fn borrow_mut(&self) -> RefMut<'_, Vec<Value>> {
        self.items.borrow_mut()
    }

    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Value> {
        self.items.borrow().get(index).cloned()
    }

    /// Copy of the current elements.
    pub fn snapshot(&self) -> Vec<Value> {
        self.items.borrow().clone()
    }
}

impl HeapSize for ListData {
    fn heap_size(&self) -> usize {
        self.items.borrow().len() * size_of::<Value>()
    }
}

/// What runs when a function value is called.
#[derive(Clone)]
pub enum FunctionBody {
    User { body: ExprId, unit: SharedUnit },
    Native(NativeFn),
}

/// A function value.
pub struct FunctionData {
    /// `None` for anonymous functions.
    pub name: Option<String>,
    pub params: Vec<Name>,
    pub body: FunctionBody,
    /// Whether the body's value is the result (`fn f() -> expr` and
    /// natives), as opposed to a block that only returns via `return`.
    pub auto_return: bool,
    /// Context the function was defined in. Natives have none and run
    /// directly under the global context.
    pub defining: Option<ContextRef>,
}

impl FunctionData {
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("<anonymous>")
    }

    pub fn is_native(&self) -> bool {
        matches!(self.body, FunctionBody::Native(_))
    }
}

impl HeapSize for FunctionData {
    fn heap_size(&self) -> usize {
        self.params.len() * size_of::<Name>() + self.name.as_ref().map_or(0, String::len)
    }
}

/// An object template (`object Point(x, y) ... end`) or an instance of one.
///
/// Templates hold the body and the context they were defined in.
/// Instantiating runs the body in a fresh context whose bindings become
/// the instance's members.
pub struct ObjectData {
    pub name: String,
    pub params: Vec<Name>,
    pub body: ExprId,
    pub unit: SharedUnit,
    pub defining: ContextRef,
    pub instance: Option<ContextRef>,
}

impl ObjectData {
    pub fn is_instance(&self) -> bool {
        self.instance.is_some()
    }
}

impl Drop for ObjectData {
    fn drop(&mut self) {
        // Methods bound in the instance context point back at it.
        if let Some(ctx) = self.instance.take() {
            Context::release_if_self_held(&ctx);
        }
    }
}

impl HeapSize for ObjectData {
    fn heap_size(&self) -> usize {
        self.params.len() * size_of::<Name>() + self.name.len()
    }
}
