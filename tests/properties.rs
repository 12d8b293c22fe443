//! Black-box checks of a handful of algebraic identities:
//! list/pair duality, proper-list discrimination, and truthiness.

use wisp::ReplSession;

fn run(session: &mut ReplSession, line: &str) -> String {
    session.run(line).unwrap_or_else(|e| panic!("{line} failed: {e}"))
}

#[test]
fn list_and_nested_cons_are_structurally_identical() {
    let mut session = ReplSession::new();
    run(&mut session, "(define a 1)");
    run(&mut session, "(define b 2)");
    run(&mut session, "(define c 3)");
    assert_eq!(run(&mut session, "(list a b c)"), run(&mut session, "(cons a (cons b (cons c '())))"));
}

#[test]
fn exactly_one_of_null_pair_or_atom_holds() {
    let mut session = ReplSession::new();
    let cases = ["'()", "'(1 . 2)", "5", "'sym", "#f"];
    for case in cases {
        let is_null = run(&mut session, &format!("(null? {case})")) == "#t";
        let is_pair = run(&mut session, &format!("(pair? {case})")) == "#t";
        assert_eq!(
            u8::from(is_null) + u8::from(is_pair) + u8::from(!is_null && !is_pair),
            1,
            "case {case} should be exactly one of null/pair/atom"
        );
    }
}

#[test]
fn list_pred_implies_null_or_a_pair_cdr_that_is_itself_a_list() {
    // `pair?` deliberately diverges from standard Scheme here: it is true
    // only for a value that flattens to exactly two elements (a dotted
    // two-atom cell *or* a proper two-element list), not for every cons,
    // so the textbook `(list? v) ⇒ (null? v) ∨ (pair? v)` reading doesn't
    // hold verbatim. What must still hold is the recursive structure: a
    // proper list is null or a cons whose cdr is again a proper list.
    let mut session = ReplSession::new();
    for case in ["'()", "'(1 2 3)", "'(1 . 2)", "5"] {
        let is_list = run(&mut session, &format!("(list? {case})")) == "#t";
        if !is_list {
            continue;
        }
        let is_null = run(&mut session, &format!("(null? {case})")) == "#t";
        if !is_null {
            assert_eq!(run(&mut session, &format!("(list? (cdr {case}))")), "#t");
        }
    }
}

#[test]
fn pair_pred_is_true_for_any_two_element_flattening() {
    // Documents the divergent `pair?`: true whenever the argument
    // flattens to exactly two elements, whether that's a dotted cell
    // `(a . b)` or a proper two-element list `(a b)` — but false for a
    // one-element or three-element list and false for the empty list.
    let mut session = ReplSession::new();
    assert_eq!(run(&mut session, "(pair? '(1 . 2))"), "#t");
    assert_eq!(run(&mut session, "(pair? '(1 2))"), "#t");
    assert_eq!(run(&mut session, "(pair? '(1))"), "#f");
    assert_eq!(run(&mut session, "(pair? '(1 2 3))"), "#f");
    assert_eq!(run(&mut session, "(pair? '())"), "#f");
    assert_eq!(run(&mut session, "(pair? 5)"), "#f");
}

#[test]
fn only_the_symbol_f_is_false() {
    let mut session = ReplSession::new();
    assert_eq!(run(&mut session, "(if 0 'true 'false)"), "true");
    assert_eq!(run(&mut session, "(if '() 'true 'false)"), "true");
    assert_eq!(run(&mut session, "(if 'anything 'true 'false)"), "true");
    assert_eq!(run(&mut session, "(if #f 'true 'false)"), "false");
    assert_eq!(run(&mut session, "(not #f)"), "#t");
    assert_eq!(run(&mut session, "(not 0)"), "#f");
}

#[test]
fn quote_is_idempotent_over_arbitrary_data() {
    let mut session = ReplSession::new();
    for datum in ["42", "-7", "sym", "(1 2 3)", "(1 . 2)", "()"] {
        let quoted = run(&mut session, &format!("(quote {datum})"));
        let requoted = run(&mut session, &format!("(quote {quoted})"));
        assert_eq!(quoted, requoted);
    }
}
