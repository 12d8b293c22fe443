//! The evaluator: dispatches values, applies closures, and runs the
//! built-in dispatch pipeline.

use crate::builtins::{self, predicates::flatten_list, BuiltinId};
use crate::error::{EvalResult, InterpreterError};
use crate::heap::{Heap, HeapId};
use crate::printer::print_result;
use crate::reader;
use crate::scope;
use crate::token::Tokenizer;
use crate::value::{Cell, Closure, Datum, ScopeData, Value};

/// Owns the heap and the two pieces of per-session evaluator state: the
/// fixed global scope and the scope currently in effect (which changes for
/// the duration of a closure call and is restored on return).
pub struct Evaluator {
    heap: Heap,
    global: HeapId,
    current: HeapId,
    next_call_frame_id: u64,
}

impl Evaluator {
    #[must_use]
    pub fn new() -> Self {
        let mut heap = Heap::new();
        let global = heap.root();
        let mut evaluator = Self { heap, global, current: global, next_call_frame_id: 0 };
        evaluator.install_builtins();
        evaluator.install_booleans();
        evaluator
    }

    fn install_builtins(&mut self) {
        for &id in BuiltinId::all() {
            let value = self.heap.alloc(Value::Builtin(id));
            scope::define(&mut self.heap, self.global, id.name(), Some(value));
        }
    }

    fn install_booleans(&mut self) {
        for name in ["#t", "#f"] {
            let value = self.heap.alloc(Value::Symbol(name.to_string()));
            scope::define(&mut self.heap, self.global, name, Some(value));
        }
    }

    #[must_use]
    pub fn heap(&self) -> &Heap {
        &self.heap
    }

    pub(crate) fn heap_mut(&mut self) -> &mut Heap {
        &mut self.heap
    }

    pub(crate) fn current_scope(&self) -> HeapId {
        self.current
    }

    pub(crate) fn global_scope(&self) -> HeapId {
        self.global
    }

    /// Allocates a fresh `Empty` value, the result `define`/`set!` return.
    pub(crate) fn empty(&mut self) -> Datum {
        Some(self.heap.alloc(Value::Empty))
    }

    /// Tokenizes, reads, and evaluates one top-level input against the
    /// global scope, collecting garbage before and after.
    pub fn run(&mut self, input: &str) -> EvalResult<String> {
        self.heap.collect_garbage();

        let mut tokenizer = Tokenizer::new(input)?;
        let datum = reader::read(&mut self.heap, &mut tokenizer)?;
        if !tokenizer.at_end() {
            return Err(InterpreterError::syntax("expected end of line"));
        }

        self.current = self.global;
        let result = self.eval(datum)?;
        let text = print_result(&self.heap, result);
        self.heap.collect_garbage();
        Ok(text)
    }

    /// Evaluates one datum: self-evaluating atoms return as-is, symbols
    /// resolve through the scope chain, and pairs dispatch on their head.
    pub(crate) fn eval(&mut self, datum: Datum) -> EvalResult<Datum> {
        let Some(id) = datum else {
            return Err(InterpreterError::runtime("can't execute nullptr"));
        };

        match self.heap.get(id).clone() {
            Value::Integer(_) | Value::Builtin(_) | Value::Closure(_) => Ok(Some(id)),
            Value::Symbol(name) => scope::lookup(&self.heap, self.current, &name),
            Value::Pair(cell) => {
                let head = self.eval(cell.car)?;
                if let Value::Pair(current_cell) = self.heap.get_mut(id) {
                    current_cell.car = head;
                }
                match head.map(|h| self.heap.get(h).clone()) {
                    Some(Value::Builtin(builtin)) => self.call_builtin(builtin, cell.cdr),
                    Some(Value::Closure(closure)) => self.apply_closure(&closure, cell.cdr),
                    _ => Err(InterpreterError::runtime("can't call non-function")),
                }
            }
            Value::Empty | Value::Scope(_) => {
                Err(InterpreterError::runtime("can't execute this value"))
            }
        }
    }

    /// Runs a built-in's generic arity/type checks and, for non-raw
    /// built-ins, evaluates its arguments before handing off to dispatch.
    fn call_builtin(&mut self, id: BuiltinId, raw_tail: Datum) -> EvalResult<Datum> {
        let descriptor = id.descriptor();

        if descriptor.raw {
            return builtins::dispatch_raw(self, id, raw_tail);
        }

        let flattened = flatten_list(&self.heap, raw_tail);
        if !flattened.proper && !descriptor.allow_improper {
            return Err(InterpreterError::runtime(format!(
                "{}: arguments must be a proper list",
                descriptor.name
            )));
        }

        let count = flattened.elements.len();
        if count < descriptor.min_arity || descriptor.max_arity.is_some_and(|max| count > max) {
            let expected = match descriptor.max_arity {
                Some(max) if max == descriptor.min_arity => format!("{max}"),
                Some(max) => format!("{}..{max}", descriptor.min_arity),
                None => format!("at least {}", descriptor.min_arity),
            };
            let message = format!(
                "{}: expected {expected} arguments, got {count}",
                descriptor.name
            );
            return Err(if descriptor.arity_error_is_syntax {
                InterpreterError::syntax(message)
            } else {
                InterpreterError::runtime(message)
            });
        }

        let mut args = flattened.elements;

        // `if` and `set!` are not raw, but they control which of their own
        // arguments get evaluated, so they run before the blanket
        // pre-evaluation step below.
        if id == BuiltinId::If {
            return builtins::if_form(self, &args);
        }
        if id == BuiltinId::Set {
            return builtins::set_form(self, &args);
        }

        for slot in &mut args {
            *slot = self.eval(*slot)?;
        }

        if descriptor.requires_integers {
            for &arg in &args {
                let is_integer = arg.is_some_and(|id| self.heap.get(id).as_integer().is_some());
                if !is_integer {
                    return Err(InterpreterError::runtime(format!(
                        "{}: expected an integer argument",
                        descriptor.name
                    )));
                }
            }
        }

        builtins::dispatch_evaluated(self, id, &args)
    }

    /// Evaluates a closure's arguments, binds them in a fresh call frame
    /// scoped under the closure's capture, runs the body, and restores the
    /// caller's scope before returning.
    fn apply_closure(&mut self, closure: &Closure, raw_tail: Datum) -> EvalResult<Datum> {
        let flattened = flatten_list(&self.heap, raw_tail);
        if !flattened.proper {
            return Err(InterpreterError::runtime("call arguments must be a proper list"));
        }
        if flattened.elements.len() != closure.params.len() {
            return Err(InterpreterError::runtime(format!(
                "{}: expected {} arguments, got {}",
                closure.name.as_deref().unwrap_or("lambda"),
                closure.params.len(),
                flattened.elements.len()
            )));
        }

        let mut evaluated_args = Vec::with_capacity(flattened.elements.len());
        for raw_arg in flattened.elements {
            evaluated_args.push(self.eval(raw_arg)?);
        }

        let mut frame_bindings = ahash::AHashMap::new();
        for (param, value) in closure.params.iter().zip(evaluated_args) {
            frame_bindings.insert(param.clone(), value);
        }
        let frame = self.heap.alloc(Value::Scope(ScopeData {
            parent: Some(closure.captured_scope),
            bindings: frame_bindings,
            children: ahash::AHashMap::new(),
        }));

        let frame_name = format!("call_{}", self.next_call_frame_id);
        self.next_call_frame_id += 1;
        scope::define_child_scope(&mut self.heap, closure.captured_scope, &frame_name, frame);

        let caller_scope = self.current;
        self.current = frame;

        let body: Vec<Datum> = closure.body.iter().map(|&expr| self.deep_copy(expr)).collect();
        let mut result = None;
        for expr in body {
            result = Some(self.eval(expr)?);
        }

        self.current = caller_scope;
        scope::remove_child_scope(&mut self.heap, closure.captured_scope, &frame_name);

        result.unwrap_or(Ok(None))
    }

    /// Deep-copies a value before it is stored by `define`/`set!`, a
    /// deliberate divergence from reference-sharing semantics. Builtins, closures,
    /// and scopes are stored as-is — they are never duplicated.
    pub(crate) fn deep_copy(&mut self, datum: Datum) -> Datum {
        let Some(id) = datum else { return None };
        match self.heap.get(id).clone() {
            Value::Integer(n) => Some(self.heap.alloc(Value::Integer(n))),
            Value::Symbol(s) => Some(self.heap.alloc(Value::Symbol(s))),
            Value::Pair(cell) => {
                let car = self.deep_copy(cell.car);
                let cdr = self.deep_copy(cell.cdr);
                Some(self.heap.alloc(Value::Pair(Cell { car, cdr })))
            }
            Value::Empty | Value::Builtin(_) | Value::Closure(_) | Value::Scope(_) => Some(id),
        }
    }
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new()
    }
}
