//! Execution contexts.
//!
//! A context is one frame of the lexical chain: the program itself, a
//! function invocation, or an object instance. Lookups walk from a context
//! to its parents; writes always land in the context they are made in.
//! Contexts live on the heap so closures and instances can keep the
//! context that defined them alive.

use std::cell::RefCell;
use std::fmt;

use brisk_ir::{Name, Position};
use brisk_mem::{Heap, HeapRef, HeapSize, WeakRef};
use rustc_hash::FxHashMap;
use tracing::trace;

use crate::errors::{TraceFrame, Traceback};
use crate::value::{FunctionData, ObjectData};
use crate::Value;

pub type ContextRef = HeapRef<Context>;

/// Variable bindings of a single context.
#[derive(Default)]
pub struct Scope {
    bindings: FxHashMap<Name, Value>,
}

impl Scope {
    pub fn get(&self, name: Name) -> Option<&Value> {
        self.bindings.get(&name)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = Name> + '_ {
        self.bindings.keys().copied()
    }
}

/// The value whose execution a context belongs to.
///
/// Held weakly: a context must not keep the function or instance that
/// created it alive.
#[derive(Clone, Debug)]
pub enum Owner {
    Function(WeakRef<FunctionData>),
    Instance(WeakRef<ObjectData>),
}

impl Owner {
    pub fn is_live(&self) -> bool {
        match self {
            Owner::Function(weak) => weak.is_valid(),
            Owner::Instance(weak) => weak.is_valid(),
        }
    }
}

/// One frame of the context chain.
pub struct Context {
    display_name: String,
    parent: Option<ContextRef>,
    /// Where execution was when this context was entered.
    parent_entry: Option<Position>,
    owner: RefCell<Option<Owner>>,
    scope: RefCell<Scope>,
}

impl Context {
    /// The session root. Pinned: its block never returns to the pool.
    pub fn root(heap: &Heap, display_name: &str) -> ContextRef {
        heap.alloc_static(Context {
            display_name: display_name.to_string(),
            parent: None,
            parent_entry: None,
            owner: RefCell::new(None),
            scope: RefCell::new(Scope::default()),
        })
    }

    pub fn child(
        heap: &Heap,
        display_name: String,
        parent: ContextRef,
        entry: Position,
        owner: Option<Owner>,
    ) -> ContextRef {
        heap.alloc(Context {
            display_name,
            parent: Some(parent),
            parent_entry: Some(entry),
            owner: RefCell::new(owner),
            scope: RefCell::new(Scope::default()),
        })
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn parent(&self) -> Option<&ContextRef> {
        self.parent.as_ref()
    }

    pub fn parent_entry(&self) -> Option<&Position> {
        self.parent_entry.as_ref()
    }

    pub fn owner(&self) -> Option<Owner> {
        self.owner.borrow().clone()
    }

    pub fn set_owner(&self, owner: Owner) {
        *self.owner.borrow_mut() = Some(owner);
    }

    /// Resolve `name` here or in the nearest ancestor that binds it.
    pub fn get(&self, name: Name) -> Option<Value> {
        let mut current = Some(self);
        while let Some(ctx) = current {
            if let Some(value) = ctx.scope.borrow().get(name) {
                return Some(value.clone());
            }
            current = ctx.parent.as_deref();
        }
        None
    }

    /// Resolve `name` in this context only.
    pub fn get_local(&self, name: Name) -> Option<Value> {
        self.scope.borrow().get(name).cloned()
    }

    /// Bind `name` in this context, shadowing any ancestor binding.
    pub fn set(&self, name: Name, value: Value) {
        // The replaced value drops after the borrow ends; its destructor may
        // release other contexts.
        let _previous = self.scope.borrow_mut().bindings.insert(name, value);
    }

    pub fn remove(&self, name: Name) -> Option<Value> {
        self.scope.borrow_mut().bindings.remove(&name)
    }

    pub fn contains_local(&self, name: Name) -> bool {
        self.scope.borrow().bindings.contains_key(&name)
    }

    pub fn binding_count(&self) -> usize {
        self.scope.borrow().len()
    }

    /// Names bound directly in this context.
    pub fn local_names(&self) -> Vec<Name> {
        self.scope.borrow().names().collect()
    }

    /// Drop every binding.
    ///
    /// Breaks reference cycles through this context, such as a function
    /// stored in the context it was defined in.
    pub fn clear(&self) {
        let bindings = std::mem::take(&mut self.scope.borrow_mut().bindings);
        drop(bindings);
    }

    /// Clear `this` when every reference to it besides the caller's comes
    /// from a function or template bound in it and held nowhere else.
    ///
    /// Those definitions and the context keep each other alive, so nothing
    /// else would ever release them.
    pub fn release_if_self_held(this: &ContextRef) {
        let own = this
            .scope
            .borrow()
            .bindings
            .values()
            .filter(|value| defined_in(value, this))
            .count();
        if HeapRef::ref_count(this) == own + 1 {
            trace!(
                context = %this.display_name,
                owner = ?this.owner(),
                definitions = own,
                "releasing self-held context"
            );
            this.clear();
        }
    }

    /// Number of ancestors.
    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut current = self.parent.as_deref();
        while let Some(ctx) = current {
            depth += 1;
            current = ctx.parent.as_deref();
        }
        depth
    }
}

impl HeapSize for Context {}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("display_name", &self.display_name)
            .field("bindings", &self.binding_count())
            .field("depth", &self.depth())
            .field("owner", &self.owner())
            .finish_non_exhaustive()
    }
}

/// Whether `value` is a definition made in `ctx` that only the binding
/// holds.
fn defined_in(value: &Value, ctx: &ContextRef) -> bool {
    match value {
        Value::Function(func) => {
            HeapRef::ref_count(func) == 1
                && func
                    .defining
                    .as_ref()
                    .is_some_and(|defining| HeapRef::ptr_eq(defining, ctx))
        }
        Value::Object(obj) => {
            !obj.is_instance()
                && HeapRef::ref_count(obj) == 1
                && HeapRef::ptr_eq(&obj.defining, ctx)
        }
        _ => false,
    }
}

/// Build the traceback for an error raised at `raised_at` while executing
/// in `ctx`.
///
/// The innermost frame reports `raised_at`; every enclosing frame reports
/// the position where its child context was entered.
pub fn traceback(ctx: &Context, raised_at: Position) -> Traceback {
    let mut frames = Vec::with_capacity(ctx.depth() + 1);
    let mut position = Some(raised_at);
    let mut current = Some(ctx);
    while let Some(frame) = current {
        if let Some(pos) = position {
            frames.push(TraceFrame {
                line: pos.line_number(),
                file: pos.file,
                context: frame.display_name.clone(),
            });
        }
        position = frame.parent_entry.clone();
        current = frame.parent.as_deref();
    }
    frames.reverse();
    Traceback { frames }
}
