//! The arena that owns every [`Value`] and the mark-and-sweep collector that
//! reclaims them.
//!
//! Unlike a refcount-plus-cycle-collector hybrid, nothing here is freed
//! early: every value, including atoms like integers and symbols, is
//! reclaimed only by a full mark-and-sweep pass. The language has no
//! destructors to run promptly, and a single reclamation mechanism is far
//! simpler to reason about than a hybrid scheme once pairs and scopes can
//! form cycles through `set-car!`/`set-cdr!` and closure capture.

use crate::value::{Cell, ScopeData, Value};

/// A handle to a heap-allocated value. Stable for the value's lifetime;
/// never reused for a different value while any live handle could still
/// reference it, since handles only ever escape into reachable structure
/// (pairs, scope bindings, closures) that the collector itself walks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HeapId {
    index: u32,
    generation: u32,
}

struct Slot {
    value: Option<Value>,
    generation: u32,
    marked: bool,
}

/// Snapshot of heap occupancy, exposed for tests and the REPL binary's
/// optional debug mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeapStats {
    pub live: usize,
    pub free: usize,
    pub total_slots: usize,
}

/// The value arena. Owns every [`Value`] ever allocated and the mechanics
/// to free the ones that become unreachable.
pub struct Heap {
    slots: Vec<Slot>,
    free_list: Vec<u32>,
    /// The root scope; every GC pass starts its mark phase here.
    root: HeapId,
}

impl Heap {
    /// Builds a fresh heap with an empty root scope already allocated.
    #[must_use]
    pub fn new() -> Self {
        let mut heap = Self {
            slots: Vec::new(),
            free_list: Vec::new(),
            // Placeholder overwritten immediately below; `alloc` needs a
            // heap to allocate into, so we bootstrap by hand.
            root: HeapId { index: 0, generation: 0 },
        };
        let root = heap.alloc(Value::Scope(ScopeData::default()));
        heap.root = root;
        heap
    }

    #[must_use]
    pub fn root(&self) -> HeapId {
        self.root
    }

    /// Allocates `value`, returning a fresh handle.
    pub fn alloc(&mut self, value: Value) -> HeapId {
        if let Some(index) = self.free_list.pop() {
            let slot = &mut self.slots[index as usize];
            slot.value = Some(value);
            slot.marked = false;
            return HeapId { index, generation: slot.generation };
        }
        let index = u32::try_from(self.slots.len()).expect("heap grew beyond u32::MAX slots");
        self.slots.push(Slot { value: Some(value), generation: 0, marked: false });
        HeapId { index, generation: 0 }
    }

    /// Looks up a value by handle.
    ///
    /// # Panics
    /// Panics if `id` does not refer to a currently-live value. A live
    /// handle referring to a freed slot would mean the collector missed a
    /// root or a child reference, which is an interpreter bug, not a user
    /// error.
    #[must_use]
    pub fn get(&self, id: HeapId) -> &Value {
        let slot = &self.slots[id.index as usize];
        assert!(
            slot.generation == id.generation && slot.value.is_some(),
            "dangling heap handle {id:?}: value was collected while still referenced"
        );
        slot.value.as_ref().unwrap()
    }

    /// Mutable lookup by handle; see [`Heap::get`] for panic conditions.
    pub fn get_mut(&mut self, id: HeapId) -> &mut Value {
        let slot = &mut self.slots[id.index as usize];
        assert!(
            slot.generation == id.generation && slot.value.is_some(),
            "dangling heap handle {id:?}: value was collected while still referenced"
        );
        slot.value.as_mut().unwrap()
    }

    #[must_use]
    pub fn stats(&self) -> HeapStats {
        let total_slots = self.slots.len();
        let free = self.free_list.len();
        HeapStats { live: total_slots - free, free, total_slots }
    }

    /// Runs one mark-and-sweep cycle, rooted at the global scope.
    ///
    /// Clears all marks, DFS from the root following each variant's
    /// outgoing references, then sweeps anything left unmarked.
    pub fn collect_garbage(&mut self) {
        for slot in &mut self.slots {
            slot.marked = false;
        }

        let mut work_list = vec![self.root];
        while let Some(id) = work_list.pop() {
            let slot = &mut self.slots[id.index as usize];
            if slot.generation != id.generation || slot.marked {
                continue;
            }
            slot.marked = true;
            if let Some(value) = &slot.value {
                collect_child_ids(value, &mut work_list);
            }
        }

        for (index, slot) in self.slots.iter_mut().enumerate() {
            if slot.value.is_some() && !slot.marked {
                slot.value = None;
                slot.generation = slot.generation.wrapping_add(1);
                self.free_list.push(u32::try_from(index).unwrap());
            }
        }
    }
}

impl Default for Heap {
    fn default() -> Self {
        Self::new()
    }
}

fn collect_child_ids(value: &Value, work_list: &mut Vec<HeapId>) {
    match value {
        Value::Empty | Value::Integer(_) | Value::Symbol(_) | Value::Builtin(_) => {}
        Value::Pair(Cell { car, cdr }) => {
            work_list.extend(car.iter().copied());
            work_list.extend(cdr.iter().copied());
        }
        Value::Closure(closure) => {
            work_list.push(closure.captured_scope);
            work_list.extend(closure.body.iter().copied().flatten());
        }
        Value::Scope(scope) => {
            work_list.extend(scope.parent.iter().copied());
            work_list.extend(scope.bindings.values().copied().flatten());
            work_list.extend(scope.children.values().copied());
        }
    }
}
