//! Graphviz rendering of automata.

use crate::automaton::Automaton;
use rustc_hash::{FxHashMap, FxHashSet};
use std::collections::VecDeque;
use std::io::{self, Write};

/// Write the reachable part of an automaton in DOT format.
///
/// States are numbered in discovery order; final states are drawn as double
/// circles and every initial state gets an unlabeled entry arrow. Labels are
/// produced by the caller-supplied closures, since states and symbols carry
/// no printable structure of their own.
///
/// Only sensible for small automata.
pub fn write_dot<A: Automaton>(
    automaton: &A,
    out: &mut impl Write,
    state_label: impl Fn(&A::State) -> String,
    symbol_label: impl Fn(&A::Symbol) -> String,
) -> io::Result<()> {
    let mut ids: FxHashMap<A::State, usize> = FxHashMap::default();
    let mut counter = 0usize;
    let mut frontier = VecDeque::new();

    writeln!(out, "digraph automaton {{")?;
    for state in automaton.initial_states() {
        counter += 1;
        ids.insert(state.clone(), counter);
        writeln!(out, "  begin{counter} [shape=none,label=\"\"]")?;
        writeln!(out, "  begin{counter} -> {counter}")?;
        frontier.push_back(state);
    }

    let mut seen = FxHashSet::default();
    while let Some(next) = frontier.pop_front() {
        if !seen.insert(next.clone()) {
            continue;
        }
        let next_id = ids[&next];
        let shape = if automaton.is_final(&next) {
            ",shape=doublecircle"
        } else {
            ""
        };
        writeln!(
            out,
            "  {next_id} [label=\"{}\"{shape}]",
            escape(&state_label(&next))
        )?;
        for symbol in automaton.next_symbols(&next) {
            for succ in automaton.successors(&next, &symbol) {
                let succ_id = *ids.entry(succ.clone()).or_insert_with(|| {
                    counter += 1;
                    counter
                });
                writeln!(
                    out,
                    "  {next_id} -> {succ_id} [label=\"{}\"]",
                    escape(&symbol_label(&symbol))
                )?;
                frontier.push_back(succ);
            }
        }
    }

    writeln!(out, "}}")
}

fn escape(label: &str) -> String {
    label.replace('\\', "\\\\").replace('"', "\\\"")
}
