//! Special forms: builtins whose arguments are not blanket pre-evaluated.
//! Each of these needs the evaluator itself (to recurse into `eval`, touch
//! scopes, or build closures), unlike the plain procedures in the sibling
//! submodules.

use crate::builtins::predicates::{bool_datum, flatten_list};
use crate::error::{EvalResult, InterpreterError};
use crate::evaluator::Evaluator;
use crate::heap::Heap;
use crate::scope;
use crate::value::{datum_is_truthy, Closure, Datum, Value};

/// `(quote x)` returns its single argument exactly as read, unevaluated.
pub fn quote(heap: &Heap, raw_tail: Datum) -> EvalResult<Datum> {
    Ok(flatten_list(heap, raw_tail).elements.first().copied().flatten())
}

/// `(and e...)` evaluates left to right, short-circuiting on the first
/// falsy value and otherwise returning the last value evaluated.
pub fn and_form(ev: &mut Evaluator, raw_tail: Datum) -> EvalResult<Datum> {
    let elements = flatten_list(ev.heap(), raw_tail).elements;
    if elements.is_empty() {
        return Ok(bool_datum(ev.heap_mut(), true));
    }
    let mut result = None;
    for expr in elements {
        result = Some(ev.eval(expr)?);
        if !datum_is_truthy(ev.heap(), result.unwrap()) {
            return Ok(result.unwrap());
        }
    }
    Ok(result.unwrap())
}

/// `(or e...)` evaluates left to right, short-circuiting on the first
/// truthy value and otherwise returning the last value evaluated.
pub fn or_form(ev: &mut Evaluator, raw_tail: Datum) -> EvalResult<Datum> {
    let elements = flatten_list(ev.heap(), raw_tail).elements;
    if elements.is_empty() {
        return Ok(bool_datum(ev.heap_mut(), false));
    }
    let mut result = None;
    for expr in elements {
        result = Some(ev.eval(expr)?);
        if datum_is_truthy(ev.heap(), result.unwrap()) {
            return Ok(result.unwrap());
        }
    }
    Ok(result.unwrap())
}

/// `(if cond then [else])`. The branch not taken is never evaluated.
pub fn if_form(ev: &mut Evaluator, args: &[Datum]) -> EvalResult<Datum> {
    let condition = ev.eval(args[0])?;
    if datum_is_truthy(ev.heap(), condition) {
        ev.eval(args[1])
    } else if args.len() == 3 {
        ev.eval(args[2])
    } else {
        Ok(None)
    }
}

/// `car`/`cdr` are raw: the single logical argument is evaluated exactly
/// once, then projected. No arity or type checks beyond that projection —
/// raw builtins skip the generic pipeline entirely.
pub fn car(ev: &mut Evaluator, raw_tail: Datum) -> EvalResult<Datum> {
    let expr = flatten_list(ev.heap(), raw_tail).elements.first().copied().flatten();
    let value = ev.eval(expr)?;
    match value.map(|id| ev.heap().get(id).clone()) {
        Some(Value::Pair(cell)) => Ok(cell.car),
        _ => Err(InterpreterError::runtime("car: argument is not a pair")),
    }
}

pub fn cdr(ev: &mut Evaluator, raw_tail: Datum) -> EvalResult<Datum> {
    let expr = flatten_list(ev.heap(), raw_tail).elements.first().copied().flatten();
    let value = ev.eval(expr)?;
    match value.map(|id| ev.heap().get(id).clone()) {
        Some(Value::Pair(cell)) => Ok(cell.cdr),
        _ => Err(InterpreterError::runtime("cdr: argument is not a pair")),
    }
}

/// `(set! name expr)`. Requires `name` already bound somewhere in
/// the scope chain; overwrites the binding in the scope that owns it.
pub fn set_form(ev: &mut Evaluator, args: &[Datum]) -> EvalResult<Datum> {
    let name = symbol_name(ev.heap(), args[0], "set!: target must be a symbol")?;
    let current = ev.current_scope();
    let owner = scope::find_scope(ev.heap(), current, &name)?;
    let value = ev.eval(args[1])?;
    let value = ev.deep_copy(value);
    scope::define(ev.heap_mut(), owner, &name, value);
    Ok(ev.empty())
}

/// `(define name expr)` or `(define (f params...) body...)`.
pub fn define_form(ev: &mut Evaluator, raw_tail: Datum) -> EvalResult<Datum> {
    let elements = flatten_list(ev.heap(), raw_tail).elements;
    let Some(&target) = elements.first() else {
        return Err(InterpreterError::syntax("define: missing target"));
    };

    match target.map(|id| ev.heap().get(id).clone()) {
        Some(Value::Symbol(name)) => {
            if elements.len() != 2 {
                return Err(InterpreterError::syntax("define: expected (define name expr)"));
            }
            let value = ev.eval(elements[1])?;
            let value = ev.deep_copy(value);
            let scope = ev.current_scope();
            scope::define(ev.heap_mut(), scope, &name, value);
            Ok(ev.empty())
        }
        Some(Value::Pair(signature)) => {
            let name = symbol_name(ev.heap(), signature.car, "define: function name must be a symbol")?;
            let params = collect_param_names(ev.heap(), signature.cdr)?;
            let body = elements[1..].to_vec();
            if body.is_empty() {
                return Err(InterpreterError::syntax(
                    "define: function body must have at least one expression",
                ));
            }
            let closure = make_closure(ev, params, body, Some(name.clone()));
            let scope = ev.current_scope();
            scope::define(ev.heap_mut(), scope, &name, closure);
            Ok(ev.empty())
        }
        _ => Err(InterpreterError::runtime("define: invalid target")),
    }
}

/// `(lambda (params...) body...)`. Captures the current scope.
pub fn lambda_form(ev: &mut Evaluator, raw_tail: Datum) -> EvalResult<Datum> {
    let elements = flatten_list(ev.heap(), raw_tail).elements;
    let Some(&param_list) = elements.first() else {
        return Err(InterpreterError::syntax("lambda: missing parameter list"));
    };
    let params = collect_param_names(ev.heap(), param_list)?;
    let body = elements[1..].to_vec();
    if body.is_empty() {
        return Err(InterpreterError::syntax("lambda: body must have at least one expression"));
    }
    Ok(make_closure(ev, params, body, None))
}

fn symbol_name(heap: &Heap, datum: Datum, message: &str) -> EvalResult<String> {
    match datum.map(|id| heap.get(id).clone()) {
        Some(Value::Symbol(name)) => Ok(name),
        _ => Err(InterpreterError::runtime(message.to_string())),
    }
}

fn collect_param_names(heap: &Heap, list: Datum) -> EvalResult<Vec<String>> {
    let flattened = flatten_list(heap, list);
    if !flattened.proper {
        return Err(InterpreterError::runtime("parameter list must be a proper list"));
    }
    flattened
        .elements
        .into_iter()
        .map(|d| symbol_name(heap, d, "parameter names must be symbols"))
        .collect()
}

fn make_closure(ev: &mut Evaluator, params: Vec<String>, body: Vec<Datum>, name: Option<String>) -> Datum {
    let captured_scope = ev.current_scope();
    Some(ev.heap_mut().alloc(crate::value::Value::Closure(Closure {
        params,
        body,
        captured_scope,
        name,
    })))
}
