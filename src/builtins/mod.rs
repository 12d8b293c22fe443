//! The built-in procedure and special-form registry.
//!
//! Every built-in — whether a procedure like `cons` or a special form like
//! `if` — is described by one [`BuiltinDescriptor`] naming its arity and how
//! the evaluator's dispatch pipeline should treat its arguments.
//! This single flag table replaces a second special-forms-only dispatch
//! path: special forms are just builtins with `eval_args: false`.

mod arithmetic;
mod logic;
mod pairs;
pub(crate) mod predicates;
pub(crate) mod special_forms;

use strum::{Display, IntoStaticStr};

pub(crate) use arithmetic::*;
pub(crate) use logic::*;
pub(crate) use pairs::*;
pub(crate) use predicates::*;
pub(crate) use special_forms::{and_form, car, cdr, define_form, if_form, lambda_form, or_form, quote, set_form};

use crate::error::EvalResult;
use crate::evaluator::Evaluator;
use crate::value::Datum;

/// Upper bound on a built-in's argument count; `None` means unbounded.
pub type MaxArity = Option<usize>;

/// One row of the built-in dispatch contract.
#[derive(Debug, Clone, Copy)]
pub struct BuiltinDescriptor {
    pub name: &'static str,
    pub min_arity: usize,
    pub max_arity: MaxArity,
    /// The raw, unevaluated argument list is handed to the body as-is; all
    /// other steps of the dispatch pipeline (arity/type checks, argument
    /// evaluation) are skipped.
    pub raw: bool,
    /// Whether the pipeline evaluates each argument before dispatch.
    pub eval_args: bool,
    /// Whether an improper argument list is accepted rather than rejected.
    pub allow_improper: bool,
    /// Whether every argument must be an integer.
    pub requires_integers: bool,
    /// Arity violations raise a syntax error instead of a runtime error.
    pub arity_error_is_syntax: bool,
}

/// Identifies every built-in procedure and special form the global scope is
/// seeded with. `strum`'s `Display`/`IntoStaticStr` give each variant its
/// source-level name for free, matching how the reader/printer need to
/// stringify them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, IntoStaticStr)]
#[strum(serialize_all = "kebab-case")]
pub enum BuiltinId {
    Quote,
    #[strum(serialize = "number?")]
    NumberPred,
    #[strum(serialize = "boolean?")]
    BooleanPred,
    #[strum(serialize = "symbol?")]
    SymbolPred,
    #[strum(serialize = "pair?")]
    PairPred,
    #[strum(serialize = "null?")]
    NullPred,
    #[strum(serialize = "list?")]
    ListPred,
    #[strum(serialize = "=")]
    NumEq,
    #[strum(serialize = "<")]
    Lt,
    #[strum(serialize = ">")]
    Gt,
    #[strum(serialize = "<=")]
    Le,
    #[strum(serialize = ">=")]
    Ge,
    #[strum(serialize = "+")]
    Add,
    #[strum(serialize = "-")]
    Sub,
    #[strum(serialize = "*")]
    Mul,
    #[strum(serialize = "/")]
    Div,
    Max,
    Min,
    Abs,
    Not,
    And,
    Or,
    Cons,
    Car,
    Cdr,
    List,
    #[strum(serialize = "list-ref")]
    ListRef,
    #[strum(serialize = "list-tail")]
    ListTail,
    If,
    Define,
    #[strum(serialize = "set!")]
    Set,
    #[strum(serialize = "set-car!")]
    SetCar,
    #[strum(serialize = "set-cdr!")]
    SetCdr,
    Lambda,
}

impl BuiltinId {
    #[must_use]
    pub fn name(self) -> &'static str {
        self.descriptor().name
    }

    /// Every built-in's identifier and its entry in the global scope at
    /// interpreter start.
    #[must_use]
    pub fn all() -> &'static [BuiltinId] {
        use BuiltinId::{
            Abs, Add, And, BooleanPred, Car, Cdr, Cons, Define, Div, Ge, Gt, If, Lambda, Le,
            List, ListPred, ListRef, ListTail, Lt, Max, Min, Mul, NullPred, NumEq, NumberPred,
            Not, Or, PairPred, Quote, Set, SetCar, SetCdr, Sub, SymbolPred,
        };
        &[
            Quote, NumberPred, BooleanPred, SymbolPred, PairPred, NullPred, ListPred, NumEq, Lt,
            Gt, Le, Ge, Add, Sub, Mul, Div, Max, Min, Abs, Not, And, Or, Cons, Car, Cdr, List,
            ListRef, ListTail, If, Define, Set, SetCar, SetCdr, Lambda,
        ]
    }

    #[must_use]
    pub fn descriptor(self) -> BuiltinDescriptor {
        use BuiltinId::{
            Abs, Add, And, BooleanPred, Car, Cdr, Cons, Define, Div, Ge, Gt, If, Lambda, Le,
            List, ListPred, ListRef, ListTail, Lt, Max, Min, Mul, NullPred, NumEq, NumberPred,
            Not, Or, PairPred, Quote, Set, SetCar, SetCdr, Sub, SymbolPred,
        };

        let predicate = |name, arity| BuiltinDescriptor {
            name,
            min_arity: arity,
            max_arity: Some(arity),
            raw: false,
            eval_args: true,
            allow_improper: false,
            requires_integers: false,
            arity_error_is_syntax: false,
        };
        let fold = |name| BuiltinDescriptor {
            name,
            min_arity: 0,
            max_arity: None,
            raw: false,
            eval_args: true,
            allow_improper: false,
            requires_integers: true,
            arity_error_is_syntax: false,
        };
        let special_form = |name, min, max| BuiltinDescriptor {
            name,
            min_arity: min,
            max_arity: max,
            raw: false,
            eval_args: false,
            allow_improper: false,
            requires_integers: false,
            arity_error_is_syntax: true,
        };

        match self {
            Quote => BuiltinDescriptor {
                name: "quote",
                min_arity: 1,
                max_arity: Some(1),
                raw: true,
                eval_args: false,
                allow_improper: false,
                requires_integers: false,
                arity_error_is_syntax: false,
            },
            NumberPred => predicate("number?", 1),
            BooleanPred => predicate("boolean?", 1),
            SymbolPred => predicate("symbol?", 1),
            PairPred => predicate("pair?", 1),
            NullPred => predicate("null?", 1),
            ListPred => predicate("list?", 1),
            NumEq => fold("="),
            Lt => fold("<"),
            Gt => fold(">"),
            Le => fold("<="),
            Ge => fold(">="),
            Add => BuiltinDescriptor { name: "+", min_arity: 0, max_arity: None, raw: false, eval_args: true, allow_improper: false, requires_integers: true, arity_error_is_syntax: false },
            Mul => BuiltinDescriptor { name: "*", min_arity: 0, max_arity: None, raw: false, eval_args: true, allow_improper: false, requires_integers: true, arity_error_is_syntax: false },
            Sub => BuiltinDescriptor { name: "-", min_arity: 1, max_arity: None, raw: false, eval_args: true, allow_improper: false, requires_integers: true, arity_error_is_syntax: false },
            Div => BuiltinDescriptor { name: "/", min_arity: 1, max_arity: None, raw: false, eval_args: true, allow_improper: false, requires_integers: true, arity_error_is_syntax: false },
            Max => BuiltinDescriptor { name: "max", min_arity: 1, max_arity: None, raw: false, eval_args: true, allow_improper: false, requires_integers: true, arity_error_is_syntax: false },
            Min => BuiltinDescriptor { name: "min", min_arity: 1, max_arity: None, raw: false, eval_args: true, allow_improper: false, requires_integers: true, arity_error_is_syntax: false },
            Abs => BuiltinDescriptor { name: "abs", min_arity: 1, max_arity: Some(1), raw: false, eval_args: true, allow_improper: false, requires_integers: true, arity_error_is_syntax: false },
            Not => predicate("not", 1),
            And => BuiltinDescriptor { name: "and", min_arity: 0, max_arity: None, raw: true, eval_args: false, allow_improper: false, requires_integers: false, arity_error_is_syntax: false },
            Or => BuiltinDescriptor { name: "or", min_arity: 0, max_arity: None, raw: true, eval_args: false, allow_improper: false, requires_integers: false, arity_error_is_syntax: false },
            Cons => BuiltinDescriptor { name: "cons", min_arity: 2, max_arity: Some(2), raw: false, eval_args: true, allow_improper: false, requires_integers: false, arity_error_is_syntax: false },
            Car => BuiltinDescriptor { name: "car", min_arity: 1, max_arity: Some(1), raw: true, eval_args: false, allow_improper: false, requires_integers: false, arity_error_is_syntax: false },
            Cdr => BuiltinDescriptor { name: "cdr", min_arity: 1, max_arity: Some(1), raw: true, eval_args: false, allow_improper: false, requires_integers: false, arity_error_is_syntax: false },
            List => BuiltinDescriptor { name: "list", min_arity: 0, max_arity: None, raw: false, eval_args: true, allow_improper: false, requires_integers: false, arity_error_is_syntax: false },
            ListRef => BuiltinDescriptor { name: "list-ref", min_arity: 2, max_arity: Some(2), raw: false, eval_args: true, allow_improper: false, requires_integers: false, arity_error_is_syntax: false },
            ListTail => BuiltinDescriptor { name: "list-tail", min_arity: 2, max_arity: Some(2), raw: false, eval_args: true, allow_improper: false, requires_integers: false, arity_error_is_syntax: false },
            If => special_form("if", 2, Some(3)),
            Define => BuiltinDescriptor { name: "define", min_arity: 1, max_arity: None, raw: true, eval_args: false, allow_improper: false, requires_integers: false, arity_error_is_syntax: true },
            Set => special_form("set!", 2, Some(2)),
            SetCar => BuiltinDescriptor { name: "set-car!", min_arity: 2, max_arity: Some(2), raw: false, eval_args: true, allow_improper: false, requires_integers: false, arity_error_is_syntax: false },
            SetCdr => BuiltinDescriptor { name: "set-cdr!", min_arity: 2, max_arity: Some(2), raw: false, eval_args: true, allow_improper: false, requires_integers: false, arity_error_is_syntax: false },
            Lambda => BuiltinDescriptor { name: "lambda", min_arity: 1, max_arity: None, raw: true, eval_args: false, allow_improper: false, requires_integers: false, arity_error_is_syntax: true },
        }
    }
}

/// Dispatches a "raw" built-in: the unevaluated argument list is handed
/// straight to the body, which is responsible for any evaluation it needs.
/// `if` and `set!` are not raw (they still need the generic arity check
/// before they run) and are dispatched directly by the evaluator instead.
pub(crate) fn dispatch_raw(ev: &mut Evaluator, id: BuiltinId, raw_tail: Datum) -> EvalResult<Datum> {
    match id {
        BuiltinId::Quote => quote(ev.heap(), raw_tail),
        BuiltinId::And => and_form(ev, raw_tail),
        BuiltinId::Or => or_form(ev, raw_tail),
        BuiltinId::Car => car(ev, raw_tail),
        BuiltinId::Cdr => cdr(ev, raw_tail),
        BuiltinId::Define => define_form(ev, raw_tail),
        BuiltinId::Lambda => lambda_form(ev, raw_tail),
        other => unreachable!("{other} is not registered as a raw built-in"),
    }
}

/// Dispatches a plain procedure once its arguments have already been
/// evaluated and type-checked by the pipeline in `Evaluator::call_builtin`.
pub(crate) fn dispatch_evaluated(ev: &mut Evaluator, id: BuiltinId, args: &[Datum]) -> EvalResult<Datum> {
    let heap = ev.heap_mut();
    match id {
        BuiltinId::NumberPred => number_pred(heap, args),
        BuiltinId::BooleanPred => boolean_pred(heap, args),
        BuiltinId::SymbolPred => symbol_pred(heap, args),
        BuiltinId::PairPred => pair_pred(heap, args),
        BuiltinId::NullPred => null_pred(heap, args),
        BuiltinId::ListPred => list_pred(heap, args),
        BuiltinId::NumEq => num_eq(heap, args),
        BuiltinId::Lt => lt(heap, args),
        BuiltinId::Gt => gt(heap, args),
        BuiltinId::Le => le(heap, args),
        BuiltinId::Ge => ge(heap, args),
        BuiltinId::Add => add(heap, args),
        BuiltinId::Sub => sub(heap, args),
        BuiltinId::Mul => mul(heap, args),
        BuiltinId::Div => div(heap, args),
        BuiltinId::Max => max_(heap, args),
        BuiltinId::Min => min_(heap, args),
        BuiltinId::Abs => abs_(heap, args),
        BuiltinId::Not => not(heap, args),
        BuiltinId::Cons => cons(heap, args),
        BuiltinId::List => list_proc(heap, args),
        BuiltinId::ListRef => list_ref(heap, args),
        BuiltinId::ListTail => list_tail(heap, args),
        BuiltinId::SetCar => set_car(heap, args),
        BuiltinId::SetCdr => set_cdr(heap, args),
        other => unreachable!("{other} is dispatched outside the evaluated-args path"),
    }
}
