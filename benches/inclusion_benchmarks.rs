//! Benchmarks for the inclusion engines.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use libinclusion::prelude::*;

/// Acceptor of `a^i b` for all `i <= n`.
fn counting_automaton(table: &mut SymbolTable, name: &str, n: usize) -> ExplicitAutomaton {
    let a = table.intern("a");
    let b = table.intern("b");
    let mut automaton = ExplicitAutomaton::new(name);
    let accept = automaton.add_state("acc");
    automaton.mark_final(accept);
    let mut previous = automaton.add_state("c0");
    automaton.mark_initial(previous);
    automaton.add_transition(previous, b, accept);
    for i in 1..=n {
        let next = automaton.add_state(&format!("c{i}"));
        automaton.add_transition(previous, a, next);
        automaton.add_transition(next, b, accept);
        previous = next;
    }
    automaton
}

/// Acceptor of exactly `a^n b^n` with every `a` independent of every `b`.
fn block_word(table: &mut SymbolTable, name: &str, first: &str, second: &str, n: usize) -> ExplicitAutomaton {
    let x = table.intern(first);
    let y = table.intern(second);
    let mut automaton = ExplicitAutomaton::new(name);
    let mut previous = automaton.add_state("s0");
    automaton.mark_initial(previous);
    for i in 1..=n {
        let next = automaton.add_state(&format!("x{i}"));
        automaton.add_transition(previous, x, next);
        previous = next;
    }
    for i in 1..=n {
        let next = automaton.add_state(&format!("y{i}"));
        automaton.add_transition(previous, y, next);
        previous = next;
    }
    automaton.mark_final(previous);
    automaton
}

fn bench_classical(c: &mut Criterion) {
    let mut table = SymbolTable::new();
    let lhs = counting_automaton(&mut table, "lhs", 64);
    let rhs = counting_automaton(&mut table, "rhs", 64);

    c.bench_function("classical_included_64", |bencher| {
        bencher.iter(|| {
            let mut engine = ClassicalInclusion::new(&lhs, &rhs).unwrap();
            black_box(engine.run().included)
        })
    });

    let shorter = counting_automaton(&mut table, "short", 32);
    c.bench_function("classical_counter_example_64_vs_32", |bencher| {
        bencher.iter(|| {
            let mut engine = ClassicalInclusion::new(&lhs, &shorter).unwrap();
            black_box(engine.run().counter_example.len())
        })
    });
}

fn bench_bounded(c: &mut Criterion) {
    let mut table = SymbolTable::new();
    let lhs = block_word(&mut table, "lhs", "a", "b", 6);
    let rhs = block_word(&mut table, "rhs", "b", "a", 6);
    let a = table.find("a").unwrap();
    let b = table.find("b").unwrap();
    let mut relation = IndependentPairs::new();
    relation.insert(a, b);

    c.bench_function("bounded_commutation_depth_6", |bencher| {
        bencher.iter(|| {
            let mut engine =
                BoundedInclusion::with_bound(&lhs, &rhs, 6, relation.clone()).unwrap();
            black_box(engine.run().included)
        })
    });
}

criterion_group!(benches, bench_classical, bench_bounded);
criterion_main!(benches);
