//! The three error kinds an interpreter run can fail with, and the
//! `EvalResult` alias used throughout the crate.

use std::fmt;

/// An error raised while tokenizing, reading, or evaluating one line of input.
///
/// The three variants mirror the three points at which an input can go
/// wrong: lexical/grammatical malformation, an unbound identifier, or a
/// type/arity/arithmetic problem discovered while evaluating.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InterpreterError {
    /// Malformed input: bad tokens, unbalanced parens, wrong arity for a
    /// special form.
    Syntax(String),
    /// An identifier with no binding in the current scope chain.
    Name(String),
    /// A type mismatch, arity mismatch, division by zero, out-of-range
    /// index, or other problem discovered while evaluating.
    Runtime(String),
}

impl InterpreterError {
    pub fn syntax(msg: impl Into<String>) -> Self {
        Self::Syntax(msg.into())
    }

    pub fn name(msg: impl Into<String>) -> Self {
        Self::Name(msg.into())
    }

    pub fn runtime(msg: impl Into<String>) -> Self {
        Self::Runtime(msg.into())
    }

    /// The message text, without the category prefix a REPL front-end adds.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Syntax(m) | Self::Name(m) | Self::Runtime(m) => m,
        }
    }

    /// The category label a REPL front-end prefixes onto the message, e.g.
    /// `"Syntax error: "`.
    #[must_use]
    pub fn category(&self) -> &'static str {
        match self {
            Self::Syntax(_) => "Syntax error",
            Self::Name(_) => "Name error",
            Self::Runtime(_) => "Runtime error",
        }
    }
}

impl fmt::Display for InterpreterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for InterpreterError {}

/// Shorthand for a result that may fail with an [`InterpreterError`].
pub type EvalResult<T> = Result<T, InterpreterError>;
