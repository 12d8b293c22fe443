//! GC soundness as observed through the public `heap_stats()` surface: a
//! session's live count never exceeds its total, and garbage collected at
//! the end of one `run` is not resurrected by a later one.

use wisp::ReplSession;

#[test]
fn fresh_session_has_a_small_live_count() {
    let session = ReplSession::new();
    let stats = session.heap_stats();
    assert!(stats.live > 0, "the root scope and seeded builtins must be live");
    assert_eq!(stats.free, 0, "a fresh heap has never freed anything");
    assert_eq!(stats.total_slots, stats.live + stats.free);
}

#[test]
fn unreachable_intermediate_values_are_reclaimed_between_calls() {
    let mut session = ReplSession::new();
    session.run("(+ 1 2 3)").unwrap();
    let after_one_throwaway_call = session.heap_stats().live;

    for _ in 0..50 {
        session.run("(+ 1 2 3)").unwrap();
    }
    let after_many_throwaway_calls = session.heap_stats().live;

    assert_eq!(
        after_one_throwaway_call, after_many_throwaway_calls,
        "throwaway arithmetic should not accumulate live objects across calls"
    );
}

#[test]
fn defined_values_increase_live_count_and_stay_live() {
    let mut session = ReplSession::new();
    let before = session.heap_stats().live;
    session.run("(define x (list 1 2 3 4 5))").unwrap();
    let after = session.heap_stats().live;
    assert!(after > before, "a retained list should keep its cells live");

    // A later GC (triggered by the next `run`) must not collect `x`.
    session.run("1").unwrap();
    let still_after = session.heap_stats().live;
    assert_eq!(after, still_after);
}
