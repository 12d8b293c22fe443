//! The single plain (non-special-form) boolean built-in, `not`. `and`/`or`
//! are special forms and live in [`super::special_forms`] since they must
//! short-circuit evaluation rather than operate on already-evaluated
//! arguments.

use crate::builtins::predicates::bool_datum;
use crate::error::EvalResult;
use crate::heap::Heap;
use crate::value::{datum_is_truthy, Datum};

pub fn not(heap: &mut Heap, args: &[Datum]) -> EvalResult<Datum> {
    let truthy = datum_is_truthy(heap, args[0]);
    Ok(bool_datum(heap, !truthy))
}
