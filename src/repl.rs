//! Persistent REPL session support for `wisp`.
//!
//! `ReplSession` keeps interpreter state — the heap and the global scope —
//! across `run()` calls so interactive snippets can share definitions,
//! mutations, and closures the way the standalone evaluator tests already
//! exercise one call at a time.

use crate::error::EvalResult;
use crate::evaluator::Evaluator;
use crate::heap::HeapStats;

/// Owns one heap and one evaluator for the lifetime of an interactive
/// session. `run` implements the top-level entry point end to end:
/// tokenize, read one datum, evaluate it against the persistent global
/// scope, print the result, collecting garbage at both boundaries.
pub struct ReplSession {
    evaluator: Evaluator,
}

impl ReplSession {
    /// Builds a fresh session: a new heap, seeded with every built-in
    /// procedure/special form and the `#t`/`#f` booleans, and an empty
    /// user-level global scope.
    #[must_use]
    pub fn new() -> Self {
        Self { evaluator: Evaluator::new() }
    }

    /// Runs one line of input against the session's persistent state.
    ///
    /// On success, returns the canonical printed form of the result (the
    /// empty string for side-effecting forms like `define`). On failure,
    /// the session is left exactly as it was before the failing input:
    /// errors abort evaluation of the current line only, they never roll
    /// back `define`s or mutations that already completed within it, and
    /// they never poison the session for the next call.
    pub fn run(&mut self, line: &str) -> EvalResult<String> {
        self.evaluator.run(line)
    }

    /// Live/free/total heap slot counts, for tests and the REPL binary's
    /// optional debug mode.
    #[must_use]
    pub fn heap_stats(&self) -> HeapStats {
        self.evaluator.heap().stats()
    }
}

impl Default for ReplSession {
    fn default() -> Self {
        Self::new()
    }
}
