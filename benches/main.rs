//! Benchmarks representative `ReplSession::run` workloads: recursive
//! arithmetic, list-building, and closure-heavy counter loops.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use wisp::ReplSession;

fn run_lines(session: &mut ReplSession, lines: &[&str]) -> String {
    let mut last = String::new();
    for line in lines {
        last = session.run(line).unwrap_or_else(|e| panic!("{line} failed: {e}"));
    }
    last
}

fn recursive_factorial(c: &mut Criterion) {
    let mut session = ReplSession::new();
    run_lines(&mut session, &["(define (fact n) (if (= n 0) 1 (* n (fact (- n 1)))))"]);

    c.bench_function("recursive_factorial_20", |b| {
        b.iter(|| black_box(session.run("(fact 20)").unwrap()));
    });
}

fn list_building(c: &mut Criterion) {
    let mut session = ReplSession::new();
    run_lines(
        &mut session,
        &["(define (build n) (if (= n 0) '() (cons n (build (- n 1)))))"],
    );

    c.bench_function("list_building_200", |b| {
        b.iter(|| black_box(session.run("(build 200)").unwrap()));
    });
}

fn closure_counter_loop(c: &mut Criterion) {
    let mut session = ReplSession::new();
    run_lines(
        &mut session,
        &[
            "(define (counter start) (lambda () (set! start (+ start 1)) start))",
            "(define c (counter 0))",
        ],
    );

    c.bench_function("closure_counter_call", |b| {
        b.iter(|| black_box(session.run("(c)").unwrap()));
    });
}

criterion_group!(benches, recursive_factorial, list_building, closure_counter_loop);
criterion_main!(benches);
