//! Pair and list-structure built-ins: `cons`, `list`, `list-ref`,
//! `list-tail`, `set-car!`, `set-cdr!`.

use crate::builtins::predicates::flatten_list;
use crate::error::{EvalResult, InterpreterError};
use crate::heap::Heap;
use crate::value::{Cell, Datum, Value};

pub fn cons(heap: &mut Heap, args: &[Datum]) -> EvalResult<Datum> {
    Ok(Some(heap.alloc(Value::Pair(Cell { car: args[0], cdr: args[1] }))))
}

pub fn list_proc(heap: &mut Heap, args: &[Datum]) -> EvalResult<Datum> {
    let mut result = None;
    for &element in args.iter().rev() {
        result = Some(heap.alloc(Value::Pair(Cell { car: element, cdr: result })));
    }
    Ok(result)
}

pub fn list_ref(heap: &mut Heap, args: &[Datum]) -> EvalResult<Datum> {
    let index = index_argument(heap, args[1])?;
    let flattened = flatten_list(heap, args[0]);
    flattened
        .elements
        .get(index)
        .copied()
        .ok_or_else(|| InterpreterError::runtime(format!("list-ref index {index} out of range")))
}

pub fn list_tail(heap: &mut Heap, args: &[Datum]) -> EvalResult<Datum> {
    let count = index_argument(heap, args[1])?;
    let mut current = args[0];
    for _ in 0..count {
        match current {
            Some(id) => match heap.get(id) {
                Value::Pair(cell) => current = cell.cdr,
                _ => return Err(InterpreterError::runtime("list-tail index out of range")),
            },
            None => return Err(InterpreterError::runtime("list-tail index out of range")),
        }
    }
    Ok(current)
}

fn index_argument(heap: &Heap, datum: Datum) -> EvalResult<usize> {
    let n = datum
        .and_then(|id| heap.get(id).as_integer())
        .ok_or_else(|| InterpreterError::runtime("expected an integer index"))?;
    usize::try_from(n).map_err(|_| InterpreterError::runtime("index must be non-negative"))
}

pub fn set_car(heap: &mut Heap, args: &[Datum]) -> EvalResult<Datum> {
    let id = args[0].ok_or_else(|| InterpreterError::runtime("set-car! on the empty list"))?;
    match heap.get_mut(id) {
        Value::Pair(cell) => {
            cell.car = args[1];
            Ok(Some(id))
        }
        _ => Err(InterpreterError::runtime("set-car! on a non-pair")),
    }
}

pub fn set_cdr(heap: &mut Heap, args: &[Datum]) -> EvalResult<Datum> {
    let id = args[0].ok_or_else(|| InterpreterError::runtime("set-cdr! on the empty list"))?;
    match heap.get_mut(id) {
        Value::Pair(cell) => {
            cell.cdr = args[1];
            Ok(Some(id))
        }
        _ => Err(InterpreterError::runtime("set-cdr! on a non-pair")),
    }
}
