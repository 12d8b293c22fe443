//! Lexical environment operations over scope values living in the heap.
//!
//! A scope is just another heap value (see [`crate::value::ScopeData`]), so
//! these are free functions threading `&mut Heap` rather than methods on a
//! dedicated type — the same shape the evaluator uses for every other
//! heap-backed operation.

use crate::error::{EvalResult, InterpreterError};
use crate::heap::{Heap, HeapId};
use crate::value::Datum;

/// Walks the scope chain starting at `scope`, returning the bound value.
pub fn lookup(heap: &Heap, scope: HeapId, name: &str) -> EvalResult<Datum> {
    let mut current = scope;
    loop {
        let data = heap
            .get(current)
            .as_scope()
            .expect("lookup called on a non-scope handle");
        if let Some(&value) = data.bindings.get(name) {
            return Ok(value);
        }
        match data.parent {
            Some(parent) => current = parent,
            None => return Err(InterpreterError::name(format!("Unknown symbol '{name}'"))),
        }
    }
}

/// Like [`lookup`], but returns the scope that owns the binding (used by
/// `set!`, which must mutate the owning scope rather than shadow it).
pub fn find_scope(heap: &Heap, scope: HeapId, name: &str) -> EvalResult<HeapId> {
    let mut current = scope;
    loop {
        let data = heap
            .get(current)
            .as_scope()
            .expect("find_scope called on a non-scope handle");
        if data.bindings.contains_key(name) {
            return Ok(current);
        }
        match data.parent {
            Some(parent) => current = parent,
            None => return Err(InterpreterError::name(format!("Unknown symbol '{name}'"))),
        }
    }
}

/// Installs `value` under `name` in `scope` itself (not a parent).
pub fn define(heap: &mut Heap, scope: HeapId, name: &str, value: Datum) {
    heap.get_mut(scope)
        .as_scope_mut()
        .expect("define called on a non-scope handle")
        .bindings
        .insert(name.to_string(), value);
}

/// Registers a child scope under `name`, keeping it reachable from its
/// parent for as long as a closure call into it is in progress.
pub fn define_child_scope(heap: &mut Heap, parent: HeapId, name: &str, child: HeapId) {
    heap.get_mut(parent)
        .as_scope_mut()
        .expect("define_child_scope called on a non-scope handle")
        .children
        .insert(name.to_string(), child);
}

/// Drops a previously-registered child scope. The collector would reclaim
/// it regardless once truly unreachable; this just shortens its lifetime.
pub fn remove_child_scope(heap: &mut Heap, parent: HeapId, name: &str) {
    heap.get_mut(parent)
        .as_scope_mut()
        .expect("remove_child_scope called on a non-scope handle")
        .children
        .remove(name);
}
