//! The reader: consumes tokens and builds exactly one datum per call,
//! matching the recursive-descent grammar of the interpreter's surface
//! syntax.

use crate::error::{EvalResult, InterpreterError};
use crate::heap::Heap;
use crate::token::{Token, Tokenizer};
use crate::value::{Cell, Datum, Value};

/// Reads one datum from the head of `tokenizer`, advancing past the tokens
/// it consumes and leaving any remainder untouched.
pub fn read(heap: &mut Heap, tokenizer: &mut Tokenizer<'_>) -> EvalResult<Datum> {
    let token = tokenizer
        .current()
        .cloned()
        .ok_or_else(|| InterpreterError::syntax("unexpected end of line"))?;

    match token {
        Token::Integer(n) => {
            tokenizer.advance()?;
            Ok(Some(heap.alloc(Value::Integer(n))))
        }
        Token::Symbol(s) => {
            tokenizer.advance()?;
            Ok(Some(heap.alloc(Value::Symbol(s))))
        }
        Token::Quote => {
            tokenizer.advance()?;
            let datum = read(heap, tokenizer)?;
            let quote_sym = Some(heap.alloc(Value::Symbol("quote".to_string())));
            let inner = Some(heap.alloc(Value::Pair(Cell { car: datum, cdr: None })));
            Ok(Some(heap.alloc(Value::Pair(Cell { car: quote_sym, cdr: inner }))))
        }
        Token::Open => {
            tokenizer.advance()?;
            read_list(heap, tokenizer)
        }
        Token::Dot => Err(InterpreterError::syntax("unexpected dot")),
        Token::Close => Err(InterpreterError::syntax("unexpected close bracket")),
    }
}

/// Reads the contents of a list after the opening paren has been consumed.
fn read_list(heap: &mut Heap, tokenizer: &mut Tokenizer<'_>) -> EvalResult<Datum> {
    match tokenizer.current() {
        None => Err(InterpreterError::syntax("unexpected end of line")),
        Some(Token::Close) => {
            tokenizer.advance()?;
            Ok(None)
        }
        Some(Token::Dot) => Err(InterpreterError::syntax("unexpected dot token")),
        _ => {
            let first = read(heap, tokenizer)?;
            match tokenizer.current() {
                None => Err(InterpreterError::syntax("unexpected end of line")),
                Some(Token::Dot) => {
                    tokenizer.advance()?;
                    let rest = read(heap, tokenizer)?;
                    match tokenizer.current() {
                        Some(Token::Close) => tokenizer.advance()?,
                        _ => return Err(InterpreterError::syntax("expected close bracket after dotted tail")),
                    }
                    Ok(Some(heap.alloc(Value::Pair(Cell { car: first, cdr: rest }))))
                }
                _ => {
                    let rest = read_list(heap, tokenizer)?;
                    Ok(Some(heap.alloc(Value::Pair(Cell { car: first, cdr: rest }))))
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::printer::print_datum;
    use pretty_assertions::assert_eq;

    fn read_one(heap: &mut Heap, input: &str) -> Datum {
        let mut tokenizer = Tokenizer::new(input).expect("tokenize");
        let datum = read(heap, &mut tokenizer).expect("read");
        assert!(tokenizer.at_end(), "leftover tokens after reading one datum");
        datum
    }

    #[test]
    fn reads_an_integer() {
        let mut heap = Heap::new();
        let d = read_one(&mut heap, "42");
        assert_eq!(heap.get(d.unwrap()).as_integer(), Some(42));
    }

    #[test]
    fn reads_a_proper_list() {
        let mut heap = Heap::new();
        let d = read_one(&mut heap, "(1 2 3)");
        assert_eq!(print_datum(&heap, d), "(1 2 3)");
    }

    #[test]
    fn reads_nested_lists() {
        let mut heap = Heap::new();
        let d = read_one(&mut heap, "(+ 1 (* 2 3))");
        assert_eq!(print_datum(&heap, d), "(+ 1 (* 2 3))");
    }

    #[test]
    fn reads_a_dotted_pair() {
        let mut heap = Heap::new();
        let d = read_one(&mut heap, "(1 . 2)");
        assert_eq!(print_datum(&heap, d), "(1 . 2)");
    }

    #[test]
    fn reads_improper_tail_list() {
        let mut heap = Heap::new();
        let d = read_one(&mut heap, "(1 2 . 3)");
        assert_eq!(print_datum(&heap, d), "(1 2 . 3)");
    }

    #[test]
    fn quote_desugars_to_quote_symbol_call() {
        let mut heap = Heap::new();
        let d = read_one(&mut heap, "'(1 2)");
        assert_eq!(print_datum(&heap, d), "(quote (1 2))");
    }

    #[test]
    fn empty_list_reads_as_null() {
        let mut heap = Heap::new();
        let d = read_one(&mut heap, "()");
        assert_eq!(d, None);
    }

    #[test]
    fn unclosed_list_is_a_syntax_error() {
        let mut heap = Heap::new();
        let mut tokenizer = Tokenizer::new("(1 2").unwrap();
        let err = read(&mut heap, &mut tokenizer).unwrap_err();
        assert_eq!(err.category(), "Syntax error");
    }

    #[test]
    fn leading_close_paren_is_a_syntax_error() {
        let mut heap = Heap::new();
        let mut tokenizer = Tokenizer::new(")").unwrap();
        let err = read(&mut heap, &mut tokenizer).unwrap_err();
        assert_eq!(err.category(), "Syntax error");
    }

    #[test]
    fn leading_dot_is_a_syntax_error() {
        let mut heap = Heap::new();
        let mut tokenizer = Tokenizer::new(".").unwrap();
        let err = read(&mut heap, &mut tokenizer).unwrap_err();
        assert_eq!(err.category(), "Syntax error");
    }
}
