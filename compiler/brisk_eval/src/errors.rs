//! Runtime errors and the control signals that travel with them.
//!
//! Every evaluation step returns a [`RuntimeResult`]. The `Err` side carries
//! a [`ControlAction`]: either a genuine error or a non-local exit
//! (`return`, `break`, `continue`) that unwinds until something handles it.
//!
//! Error constructors live here so message wording stays in one place.

use std::fmt;
use std::sync::Arc;

use brisk_ir::Span;
use brisk_mem::HeapSize;

use crate::Value;

/// Result of evaluating a node.
pub type RuntimeResult = Result<Value, ControlAction>;

/// Result of a value-level operation that can only fail with an error.
pub type EvalResult<T = Value> = Result<T, EvalError>;

/// What went wrong, independent of where.
#[derive(Clone, Debug, PartialEq)]
pub enum EvalErrorKind {
    DivisionByZero,
    UndefinedVariable {
        name: String,
    },
    ArityMismatch {
        name: String,
        expected: usize,
        got: usize,
    },
    IndexOutOfBounds {
        index: i64,
        len: usize,
    },
    /// An operator applied to kinds it is not defined for.
    /// `right` is `None` for unary operators.
    IllegalOperation {
        op: &'static str,
        left: &'static str,
        right: Option<&'static str>,
    },
    IntegerOverflow {
        op: &'static str,
    },
    NotCallable {
        type_name: &'static str,
    },
    NotAnObject {
        member: String,
        type_name: &'static str,
    },
    UndefinedMember {
        member: String,
        scope: String,
    },
    NotInstantiated {
        name: String,
    },
    ControlOutsideLoop {
        keyword: &'static str,
    },
    ZeroStep,
    CallDepthExceeded {
        limit: usize,
    },
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },
    Custom {
        message: String,
    },
}

impl fmt::Display for EvalErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvalErrorKind::DivisionByZero => write!(f, "Division by zero"),
            EvalErrorKind::UndefinedVariable { name } => write!(f, "'{name}' is not defined"),
            EvalErrorKind::ArityMismatch {
                name,
                expected,
                got,
            } => {
                if got > expected {
                    write!(f, "{} too many args passed into '{name}'", got - expected)
                } else {
                    write!(f, "{} too few args passed into '{name}'", expected - got)
                }
            }
            EvalErrorKind::IndexOutOfBounds { index, len } => {
                write!(f, "index out of bounds: {index} (length {len})")
            }
            EvalErrorKind::IllegalOperation {
                op,
                left,
                right: Some(right),
            } => write!(f, "Illegal operation: {left} {op} {right}"),
            EvalErrorKind::IllegalOperation {
                op,
                left,
                right: None,
            } => write!(f, "Illegal operation: {op}{left}"),
            EvalErrorKind::IntegerOverflow { op } => write!(f, "integer overflow in {op}"),
            EvalErrorKind::NotCallable { type_name } => write!(f, "{type_name} is not callable"),
            EvalErrorKind::NotAnObject { member, type_name } => {
                write!(f, "cannot access member '{member}' on {type_name}")
            }
            EvalErrorKind::UndefinedMember { member, scope } => {
                write!(f, "'{member}' is not defined in {scope}")
            }
            EvalErrorKind::NotInstantiated { name } => {
                write!(f, "object '{name}' must be instantiated with new")
            }
            EvalErrorKind::ControlOutsideLoop { keyword } => {
                write!(f, "'{keyword}' outside of a loop")
            }
            EvalErrorKind::ZeroStep => write!(f, "for loop step cannot be zero"),
            EvalErrorKind::CallDepthExceeded { limit } => {
                write!(f, "maximum call depth of {limit} exceeded")
            }
            EvalErrorKind::TypeMismatch { expected, found } => {
                write!(f, "expected {expected}, found {found}")
            }
            EvalErrorKind::Custom { message } => f.write_str(message),
        }
    }
}

/// One line of a traceback.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TraceFrame {
    pub file: Arc<str>,
    /// One-based.
    pub line: u32,
    pub context: String,
}

/// Context chain at the point an error was raised, outermost first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Traceback {
    pub frames: Vec<TraceFrame>,
}

impl Traceback {
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// The frame where the error was raised.
    pub fn innermost(&self) -> Option<&TraceFrame> {
        self.frames.last()
    }
}

impl fmt::Display for Traceback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Parser Traceback:")?;
        for frame in &self.frames {
            writeln!(
                f,
                "  File {}, Line {}, in {}",
                frame.file, frame.line, frame.context
            )?;
        }
        Ok(())
    }
}

/// A runtime error.
///
/// `span` and `traceback` start out empty and are filled in by the
/// innermost node that sees the error, so value-level code can build
/// errors without knowing where it runs.
#[derive(Clone, Debug, PartialEq)]
pub struct EvalError {
    pub kind: EvalErrorKind,
    pub span: Option<Span>,
    pub traceback: Option<Traceback>,
}

impl EvalError {
    pub fn new(kind: EvalErrorKind) -> Self {
        EvalError {
            kind,
            span: None,
            traceback: None,
        }
    }

    /// The message without the `Runtime Error:` prefix or traceback.
    pub fn message(&self) -> String {
        self.kind.to_string()
    }

    /// Whether a location has already been attached.
    pub fn is_located(&self) -> bool {
        self.span.is_some()
    }

    #[must_use]
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    #[must_use]
    pub fn with_traceback(mut self, traceback: Traceback) -> Self {
        self.traceback = Some(traceback);
        self
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(traceback) = &self.traceback {
            write!(f, "{traceback}")?;
        }
        write!(f, "Runtime Error: {}", self.kind)
    }
}

impl std::error::Error for EvalError {}

impl HeapSize for EvalError {
    fn heap_size(&self) -> usize {
        self.traceback
            .as_ref()
            .map_or(0, |tb| tb.frames.len() * std::mem::size_of::<TraceFrame>())
    }
}

/// Non-value outcome of evaluating a node.
///
/// `Break` and `Continue` carry the span of the keyword so a stray one can
/// be reported where it was written.
#[derive(Clone, Debug)]
pub enum ControlAction {
    Error(Box<EvalError>),
    Return(Value),
    Break(Span),
    Continue(Span),
}

impl ControlAction {
    pub fn is_error(&self) -> bool {
        matches!(self, ControlAction::Error(_))
    }
}

impl From<EvalError> for ControlAction {
    #[cold]
    fn from(err: EvalError) -> Self {
        ControlAction::Error(Box::new(err))
    }
}

// Constructors

#[cold]
pub fn division_by_zero() -> EvalError {
    EvalError::new(EvalErrorKind::DivisionByZero)
}

#[cold]
pub fn undefined_variable(name: &str) -> EvalError {
    EvalError::new(EvalErrorKind::UndefinedVariable {
        name: name.to_string(),
    })
}

#[cold]
pub fn arity_mismatch(name: &str, expected: usize, got: usize) -> EvalError {
    EvalError::new(EvalErrorKind::ArityMismatch {
        name: name.to_string(),
        expected,
        got,
    })
}

#[cold]
pub fn index_out_of_bounds(index: i64, len: usize) -> EvalError {
    EvalError::new(EvalErrorKind::IndexOutOfBounds { index, len })
}

#[cold]
pub fn illegal_binary_op(op: &'static str, left: &'static str, right: &'static str) -> EvalError {
    EvalError::new(EvalErrorKind::IllegalOperation {
        op,
        left,
        right: Some(right),
    })
}

#[cold]
pub fn illegal_unary_op(op: &'static str, operand: &'static str) -> EvalError {
    EvalError::new(EvalErrorKind::IllegalOperation {
        op,
        left: operand,
        right: None,
    })
}

#[cold]
pub fn integer_overflow(op: &'static str) -> EvalError {
    EvalError::new(EvalErrorKind::IntegerOverflow { op })
}

#[cold]
pub fn not_callable(type_name: &'static str) -> EvalError {
    EvalError::new(EvalErrorKind::NotCallable { type_name })
}

#[cold]
pub fn not_an_object(member: &str, type_name: &'static str) -> EvalError {
    EvalError::new(EvalErrorKind::NotAnObject {
        member: member.to_string(),
        type_name,
    })
}

#[cold]
pub fn undefined_member(member: &str, scope: &str) -> EvalError {
    EvalError::new(EvalErrorKind::UndefinedMember {
        member: member.to_string(),
        scope: scope.to_string(),
    })
}

#[cold]
pub fn not_instantiated(name: &str) -> EvalError {
    EvalError::new(EvalErrorKind::NotInstantiated {
        name: name.to_string(),
    })
}

#[cold]
pub fn control_outside_loop(keyword: &'static str) -> EvalError {
    EvalError::new(EvalErrorKind::ControlOutsideLoop { keyword })
}

#[cold]
pub fn zero_step() -> EvalError {
    EvalError::new(EvalErrorKind::ZeroStep)
}

#[cold]
pub fn call_depth_exceeded(limit: usize) -> EvalError {
    EvalError::new(EvalErrorKind::CallDepthExceeded { limit })
}

#[cold]
pub fn type_mismatch(expected: &'static str, found: &'static str) -> EvalError {
    EvalError::new(EvalErrorKind::TypeMismatch { expected, found })
}

#[cold]
pub fn custom(message: impl Into<String>) -> EvalError {
    EvalError::new(EvalErrorKind::Custom {
        message: message.into(),
    })
}
