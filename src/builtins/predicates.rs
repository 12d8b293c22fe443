//! Type and list-shape predicates, plus the shared `ToVector`-style list
//! flattening helper the arity checker and several predicates both need.

use smallvec::SmallVec;

use crate::error::EvalResult;
use crate::heap::Heap;
use crate::value::{Datum, Value};

/// Most calls pass a handful of arguments; inlining up to four avoids a
/// heap allocation for the common case.
pub type ElementVec = SmallVec<[Datum; 4]>;

/// Whether a datum flattens into a proper list, and the flattened form.
///
/// Walks `cdr` links until it hits null (proper) or something that is not
/// a pair (improper — the walk stops there and `elements` holds everything
/// seen so far).
pub struct Flattened {
    pub elements: ElementVec,
    pub proper: bool,
}

#[must_use]
pub fn flatten_list(heap: &Heap, mut list: Datum) -> Flattened {
    let mut elements = ElementVec::new();
    loop {
        match list {
            None => return Flattened { elements, proper: true },
            Some(id) => match heap.get(id) {
                Value::Pair(cell) => {
                    elements.push(cell.car);
                    list = cell.cdr;
                }
                _ => return Flattened { elements, proper: false },
            },
        }
    }
}

pub(crate) fn bool_datum(heap: &mut Heap, value: bool) -> Datum {
    Some(heap.alloc(Value::Symbol(if value { "#t" } else { "#f" }.to_string())))
}

pub fn number_pred(heap: &mut Heap, args: &[Datum]) -> EvalResult<Datum> {
    let is_number = args[0].is_some_and(|id| matches!(heap.get(id), Value::Integer(_)));
    Ok(bool_datum(heap, is_number))
}

pub fn boolean_pred(heap: &mut Heap, args: &[Datum]) -> EvalResult<Datum> {
    let is_boolean = args[0].is_some_and(|id| matches!(heap.get(id).as_symbol(), Some("#t" | "#f")));
    Ok(bool_datum(heap, is_boolean))
}

pub fn symbol_pred(heap: &mut Heap, args: &[Datum]) -> EvalResult<Datum> {
    let is_symbol = args[0].is_some_and(|id| matches!(heap.get(id), Value::Symbol(_)));
    Ok(bool_datum(heap, is_symbol))
}

/// `pair?` diverges from standard Scheme: an argument counts as a pair iff
/// it vectorizes (car-by-car, with a dangling improper tail pushed on too)
/// to exactly two elements — true for a dotted two-atom cell `(a . b)` and
/// equally true for a proper two-element list `(a b)`, false for anything
/// shorter, longer, or null.
pub fn pair_pred(heap: &mut Heap, args: &[Datum]) -> EvalResult<Datum> {
    let (elements, _proper) = vectorize_with_dangling_tail(heap, args[0]);
    Ok(bool_datum(heap, elements.len() == 2))
}

/// Like [`flatten_list`], but an improper chain's final non-pair, non-null
/// cdr is pushed onto `elements` as a trailing atom instead of being
/// dropped. This is the vectorization `pair?` needs: both a dotted
/// two-atom cell and a proper two-element list flatten to two elements.
fn vectorize_with_dangling_tail(heap: &Heap, mut list: Datum) -> (Vec<Datum>, bool) {
    let mut elements = Vec::new();
    loop {
        match list {
            None => return (elements, true),
            Some(id) => match heap.get(id) {
                Value::Pair(cell) => {
                    elements.push(cell.car);
                    list = cell.cdr;
                }
                _ => {
                    elements.push(list);
                    return (elements, false);
                }
            },
        }
    }
}

pub fn null_pred(heap: &mut Heap, args: &[Datum]) -> EvalResult<Datum> {
    Ok(bool_datum(heap, args[0].is_none()))
}

pub fn list_pred(heap: &mut Heap, args: &[Datum]) -> EvalResult<Datum> {
    let flattened = flatten_list(heap, args[0]);
    Ok(bool_datum(heap, flattened.proper))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Cell;

    fn is_true(heap: &Heap, datum: Datum) -> bool {
        heap.get(datum.unwrap()).as_symbol() == Some("#t")
    }

    #[test]
    fn number_pred_distinguishes_integers() {
        let mut heap = Heap::new();
        let n = Some(heap.alloc(Value::Integer(1)));
        let s = Some(heap.alloc(Value::Symbol("x".into())));
        let result_n = number_pred(&mut heap, &[n]).unwrap();
        assert!(is_true(&heap, result_n));
        let result_s = number_pred(&mut heap, &[s]).unwrap();
        assert!(!is_true(&heap, result_s));
    }

    #[test]
    fn pair_pred_requires_exactly_two_flattened_elements() {
        let mut heap = Heap::new();
        let a = Some(heap.alloc(Value::Integer(1)));
        let b = Some(heap.alloc(Value::Integer(2)));
        let c = Some(heap.alloc(Value::Integer(3)));
        let dotted_two = Some(heap.alloc(Value::Pair(Cell { car: a, cdr: b })));
        let tail_one = Some(heap.alloc(Value::Pair(Cell { car: b, cdr: None })));
        let proper_two = Some(heap.alloc(Value::Pair(Cell { car: a, cdr: tail_one })));
        let tail_two = Some(heap.alloc(Value::Pair(Cell { car: c, cdr: None })));
        let tail_one_of_three = Some(heap.alloc(Value::Pair(Cell { car: b, cdr: tail_two })));
        let proper_three = Some(heap.alloc(Value::Pair(Cell { car: a, cdr: tail_one_of_three })));

        let result_dotted_two = pair_pred(&mut heap, &[dotted_two]).unwrap();
        assert!(is_true(&heap, result_dotted_two));
        let result_proper_two = pair_pred(&mut heap, &[proper_two]).unwrap();
        assert!(is_true(&heap, result_proper_two));
        let result_three = pair_pred(&mut heap, &[proper_three]).unwrap();
        assert!(!is_true(&heap, result_three));
        let result_null = pair_pred(&mut heap, &[None]).unwrap();
        assert!(!is_true(&heap, result_null));
    }

    #[test]
    fn null_pred_only_true_for_empty_list() {
        let mut heap = Heap::new();
        let n = Some(heap.alloc(Value::Integer(1)));
        let result_none = null_pred(&mut heap, &[None]).unwrap();
        assert!(is_true(&heap, result_none));
        let result_n = null_pred(&mut heap, &[n]).unwrap();
        assert!(!is_true(&heap, result_n));
    }
}
