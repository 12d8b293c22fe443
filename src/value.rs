//! The tagged value variants that live on the heap, plus the small
//! aggregate structs (`Cell`, `Closure`, `ScopeData`) some variants carry.

use ahash::AHashMap;

use crate::builtins::BuiltinId;
use crate::heap::{Heap, HeapId};

/// A reference to a value, where `None` stands for the empty list `()`.
/// The empty list is not a heap object (see [`Value::Empty`] for the
/// unrelated "no useful result" value `define`/`set!` produce).
pub type Datum = Option<HeapId>;

/// A mutable cons cell. `None` in either field represents the empty list.
#[derive(Debug, Clone)]
pub struct Cell {
    pub car: Datum,
    pub cdr: Datum,
}

/// A user-defined procedure: parameter names, a body of expressions to run
/// in sequence, and the scope it closed over at creation time.
#[derive(Debug, Clone)]
pub struct Closure {
    pub params: Vec<String>,
    pub body: Vec<Datum>,
    pub captured_scope: HeapId,
    pub name: Option<String>,
}

/// A lexical environment: a bindings map plus a link to its parent, and a
/// table of named child scopes kept reachable while a call into them is in
/// progress (see `Evaluator::apply_closure`).
#[derive(Debug, Clone, Default)]
pub struct ScopeData {
    pub parent: Option<HeapId>,
    pub bindings: AHashMap<String, Datum>,
    pub children: AHashMap<String, HeapId>,
}

/// One heap-allocated value. `None`/the absence of a handle elsewhere in the
/// crate always means the empty list, never this `Empty` variant: `Empty`
/// is the result value of side-effecting forms like `define` and `set!`.
#[derive(Debug, Clone)]
pub enum Value {
    Empty,
    Integer(i64),
    Symbol(String),
    Pair(Cell),
    Builtin(BuiltinId),
    Closure(Closure),
    Scope(ScopeData),
}

impl Value {
    #[must_use]
    pub fn as_symbol(&self) -> Option<&str> {
        match self {
            Self::Symbol(s) => Some(s.as_str()),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(n) => Some(*n),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_pair(&self) -> Option<&Cell> {
        match self {
            Self::Pair(cell) => Some(cell),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_scope(&self) -> Option<&ScopeData> {
        match self {
            Self::Scope(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_scope_mut(&mut self) -> Option<&mut ScopeData> {
        match self {
            Self::Scope(s) => Some(s),
            _ => None,
        }
    }

    /// Every value is truthy except the symbol `#f`.
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Self::Symbol(s) if s == "#f")
    }
}

/// Truthiness of a [`Datum`]: the empty list is truthy, like every value
/// except the symbol `#f`.
#[must_use]
pub fn datum_is_truthy(heap: &Heap, datum: Datum) -> bool {
    match datum {
        None => true,
        Some(id) => heap.get(id).is_truthy(),
    }
}
