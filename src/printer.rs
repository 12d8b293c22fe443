//! Renders a datum into the canonical textual form the REPL prints.

use crate::heap::Heap;
use crate::value::{Datum, Value};

/// Prints a top-level result value. `Value::Empty` (the result of
/// side-effecting forms) prints as the empty string, matching the REPL's
/// "no output line for this input" behavior.
#[must_use]
pub fn print_result(heap: &Heap, datum: Datum) -> String {
    match datum {
        Some(id) if matches!(heap.get(id), Value::Empty) => String::new(),
        _ => print_datum(heap, datum),
    }
}

/// Prints any datum in its full, non-empty form (null prints as `()`).
#[must_use]
pub fn print_datum(heap: &Heap, datum: Datum) -> String {
    let mut out = String::new();
    write_datum(heap, datum, &mut out);
    out
}

fn write_datum(heap: &Heap, datum: Datum, out: &mut String) {
    let Some(id) = datum else {
        out.push_str("()");
        return;
    };

    match heap.get(id) {
        Value::Empty => {}
        Value::Integer(n) => out.push_str(&n.to_string()),
        Value::Symbol(s) => out.push_str(s),
        Value::Pair(cell) => {
            out.push('(');
            write_datum(heap, cell.car, out);
            write_pair_tail(heap, cell.cdr, out);
            out.push(')');
        }
        Value::Builtin(b) => {
            out.push_str("<function '");
            out.push_str(b.name());
            out.push_str("'>");
        }
        Value::Closure(closure) => {
            out.push_str("<lambda '");
            out.push_str(closure.name.as_deref().unwrap_or("anonymous"));
            out.push_str("' with args:");
            for param in &closure.params {
                out.push_str(" '");
                out.push_str(param);
                out.push('\'');
            }
            out.push('>');
        }
        Value::Scope(_) => out.push_str("<scope>"),
    }
}

/// Writes the remainder of a list after its first element: `cdr` chains
/// continue space-separated, a dotted tail gets ` . tail`, and null simply
/// closes (the caller appends the final `)`).
fn write_pair_tail(heap: &Heap, cdr: Datum, out: &mut String) {
    match cdr {
        None => {}
        Some(id) => match heap.get(id) {
            Value::Pair(cell) => {
                out.push(' ');
                write_datum(heap, cell.car, out);
                write_pair_tail(heap, cell.cdr, out);
            }
            _ => {
                out.push_str(" . ");
                write_datum(heap, cdr, out);
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::read;
    use crate::token::Tokenizer;
    use pretty_assertions::assert_eq;

    fn print_source(source: &str) -> String {
        let mut heap = Heap::new();
        let mut tokenizer = Tokenizer::new(source).unwrap();
        let datum = read(&mut heap, &mut tokenizer).unwrap();
        print_datum(&heap, datum)
    }

    #[test]
    fn integers_and_symbols() {
        assert_eq!(print_source("42"), "42");
        assert_eq!(print_source("-7"), "-7");
        assert_eq!(print_source("foo"), "foo");
    }

    #[test]
    fn null_prints_as_empty_parens() {
        assert_eq!(print_source("()"), "()");
    }

    #[test]
    fn proper_list_prints_space_separated() {
        assert_eq!(print_source("(1 2 3)"), "(1 2 3)");
    }

    #[test]
    fn dotted_pair_prints_with_dot() {
        assert_eq!(print_source("(1 . 2)"), "(1 . 2)");
    }

    #[test]
    fn improper_tail_prints_with_dot() {
        assert_eq!(print_source("(1 2 . 3)"), "(1 2 . 3)");
    }

    #[test]
    fn nested_list_as_car_prints_correctly() {
        assert_eq!(print_source("((1 2) 3)"), "((1 2) 3)");
    }

    #[test]
    fn empty_value_prints_as_empty_string() {
        let mut heap = Heap::new();
        let id = heap.alloc(Value::Empty);
        assert_eq!(print_result(&heap, Some(id)), "");
    }
}
