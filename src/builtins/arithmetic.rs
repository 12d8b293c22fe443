//! Integer arithmetic and ordering built-ins. The dispatch pipeline has
//! already checked that every argument is an [`Value::Integer`] before any
//! of these run (the `requires_integers` flag on their descriptors).

use crate::builtins::predicates::bool_datum;
use crate::error::{EvalResult, InterpreterError};
use crate::heap::Heap;
use crate::value::{Datum, Value};

fn ints(heap: &Heap, args: &[Datum]) -> Vec<i64> {
    args.iter()
        .map(|d| heap.get(d.expect("integer argument cannot be the empty list")).as_integer().expect("type-checked by the dispatch pipeline"))
        .collect()
}

pub fn add(heap: &mut Heap, args: &[Datum]) -> EvalResult<Datum> {
    let sum = ints(heap, args).into_iter().sum::<i64>();
    Ok(Some(heap.alloc(Value::Integer(sum))))
}

pub fn mul(heap: &mut Heap, args: &[Datum]) -> EvalResult<Datum> {
    let product = ints(heap, args).into_iter().product::<i64>();
    Ok(Some(heap.alloc(Value::Integer(product))))
}

pub fn sub(heap: &mut Heap, args: &[Datum]) -> EvalResult<Datum> {
    let values = ints(heap, args);
    let result = if values.len() == 1 {
        values[0]
    } else {
        values[1..].iter().fold(values[0], |acc, n| acc - n)
    };
    Ok(Some(heap.alloc(Value::Integer(result))))
}

pub fn div(heap: &mut Heap, args: &[Datum]) -> EvalResult<Datum> {
    let values = ints(heap, args);
    if values.len() == 1 {
        return Ok(Some(heap.alloc(Value::Integer(values[0]))));
    }
    let mut acc = values[0];
    for n in &values[1..] {
        if *n == 0 {
            return Err(InterpreterError::runtime("division by zero"));
        }
        acc /= n;
    }
    Ok(Some(heap.alloc(Value::Integer(acc))))
}

pub fn min_(heap: &mut Heap, args: &[Datum]) -> EvalResult<Datum> {
    let result = ints(heap, args).into_iter().min().expect("min_arity is 1");
    Ok(Some(heap.alloc(Value::Integer(result))))
}

pub fn max_(heap: &mut Heap, args: &[Datum]) -> EvalResult<Datum> {
    let result = ints(heap, args).into_iter().max().expect("min_arity is 1");
    Ok(Some(heap.alloc(Value::Integer(result))))
}

pub fn abs_(heap: &mut Heap, args: &[Datum]) -> EvalResult<Datum> {
    let n = ints(heap, args)[0];
    Ok(Some(heap.alloc(Value::Integer(n.abs()))))
}

fn monotonic(heap: &mut Heap, args: &[Datum], cmp: impl Fn(i64, i64) -> bool) -> EvalResult<Datum> {
    let values = ints(heap, args);
    let ok = values.windows(2).all(|w| cmp(w[0], w[1]));
    Ok(bool_datum(heap, ok))
}

pub fn num_eq(heap: &mut Heap, args: &[Datum]) -> EvalResult<Datum> {
    monotonic(heap, args, |a, b| a == b)
}

pub fn lt(heap: &mut Heap, args: &[Datum]) -> EvalResult<Datum> {
    monotonic(heap, args, |a, b| a < b)
}

pub fn gt(heap: &mut Heap, args: &[Datum]) -> EvalResult<Datum> {
    monotonic(heap, args, |a, b| a > b)
}

pub fn le(heap: &mut Heap, args: &[Datum]) -> EvalResult<Datum> {
    monotonic(heap, args, |a, b| a <= b)
}

pub fn ge(heap: &mut Heap, args: &[Datum]) -> EvalResult<Datum> {
    monotonic(heap, args, |a, b| a >= b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn int_args(heap: &mut Heap, values: &[i64]) -> Vec<Datum> {
        values.iter().map(|&n| Some(heap.alloc(Value::Integer(n)))).collect()
    }

    #[test]
    fn add_empty_is_zero() {
        let mut heap = Heap::new();
        let result = add(&mut heap, &[]).unwrap();
        assert_eq!(heap.get(result.unwrap()).as_integer(), Some(0));
    }

    #[test]
    fn sub_single_arg_is_identity() {
        let mut heap = Heap::new();
        let args = int_args(&mut heap, &[5]);
        let result = sub(&mut heap, &args).unwrap();
        assert_eq!(heap.get(result.unwrap()).as_integer(), Some(5));
    }

    #[test]
    fn sub_folds_left_to_right() {
        let mut heap = Heap::new();
        let args = int_args(&mut heap, &[10, 1, 2]);
        let result = sub(&mut heap, &args).unwrap();
        assert_eq!(heap.get(result.unwrap()).as_integer(), Some(7));
    }

    #[test]
    fn div_by_zero_is_runtime_error() {
        let mut heap = Heap::new();
        let args = int_args(&mut heap, &[1, 0]);
        let err = div(&mut heap, &args).unwrap_err();
        assert_eq!(err.category(), "Runtime error");
    }

    #[test]
    fn comparisons_with_zero_or_one_args_are_true() {
        let mut heap = Heap::new();
        let none: Vec<Datum> = Vec::new();
        let result = lt(&mut heap, &none).unwrap();
        assert_eq!(heap.get(result.unwrap()).as_symbol(), Some("#t"));
    }
}
