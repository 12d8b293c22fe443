//! `wisp` is a small, persistent-session interpreter for a Scheme subset.
//!
//! A [`ReplSession`] owns one evaluator (which in turn owns the heap) and
//! exposes a single entry point, [`ReplSession::run`], that tokenizes,
//! reads, and evaluates one line of input against the session's global
//! scope and renders the result to its canonical textual form. Definitions,
//! mutations, and closures created by one call remain visible to later
//! calls on the same session.

mod builtins;
mod error;
mod evaluator;
mod heap;
mod printer;
mod reader;
mod repl;
mod scope;
mod token;
mod value;

pub use error::{EvalResult, InterpreterError};
pub use heap::HeapStats;
pub use repl::ReplSession;
