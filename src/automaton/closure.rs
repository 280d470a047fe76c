//! Epsilon-collapsed view of an automaton.

use super::Automaton;
use rustc_hash::{FxHashMap, FxHashSet};
use std::cell::RefCell;
use std::collections::VecDeque;

/// Wrapper presenting the epsilon-closed view of an automaton.
///
/// Every successor set is expanded by the transitive closure under epsilon
/// edges, and epsilon symbols are filtered out of
/// [`next_symbols`](Automaton::next_symbols). A state survives the closure iff
/// it has at least one outgoing non-epsilon edge or is final; pure
/// intermediate nodes are elided.
///
/// Per-state closures are memoized, so the underlying automaton is asked for
/// the epsilon structure of each state at most once. The wrapper reports
/// [`collapse_epsilon`](Automaton::collapse_epsilon) and
/// [`no_epsilon_produced`](Automaton::no_epsilon_produced) as `true`, which
/// satisfies the engine precondition for the right-hand side of an inclusion
/// query.
pub struct EpsilonClosed<A: Automaton> {
    inner: A,
    cache: RefCell<FxHashMap<A::State, Vec<A::State>>>,
}

impl<A: Automaton> EpsilonClosed<A> {
    /// Wrap `inner` in a collapsed view.
    pub fn new(inner: A) -> Self {
        Self {
            inner,
            cache: RefCell::new(FxHashMap::default()),
        }
    }

    /// Access the wrapped automaton.
    pub fn inner(&self) -> &A {
        &self.inner
    }

    /// Unwrap, discarding the memoized closures.
    pub fn into_inner(self) -> A {
        self.inner
    }

    /// Closure of a single state under epsilon edges, with the emit rule
    /// applied. Memoized.
    fn closure_of(&self, seed: &A::State) -> Vec<A::State> {
        if let Some(cached) = self.cache.borrow().get(seed) {
            return cached.clone();
        }

        let mut emitted = Vec::new();
        let mut seen = FxHashSet::default();
        let mut frontier = VecDeque::new();
        seen.insert(seed.clone());
        frontier.push_back(seed.clone());

        while let Some(state) = frontier.pop_front() {
            let mut emit = self.inner.is_final(&state);
            for symbol in self.inner.next_symbols(&state) {
                if self.inner.is_epsilon(&symbol) {
                    for succ in self.inner.successors(&state, &symbol) {
                        if seen.insert(succ.clone()) {
                            frontier.push_back(succ);
                        }
                    }
                } else {
                    emit = true;
                }
            }
            if emit {
                emitted.push(state);
            }
        }

        self.cache
            .borrow_mut()
            .insert(seed.clone(), emitted.clone());
        emitted
    }

    fn close_set(&self, seeds: Vec<A::State>) -> Vec<A::State> {
        let mut out = Vec::new();
        let mut unique = FxHashSet::default();
        for seed in seeds {
            for state in self.closure_of(&seed) {
                if unique.insert(state.clone()) {
                    out.push(state);
                }
            }
        }
        out
    }
}

impl<A: Automaton> Automaton for EpsilonClosed<A> {
    type State = A::State;
    type Symbol = A::Symbol;

    fn initial_states(&self) -> Vec<Self::State> {
        self.close_set(self.inner.initial_states())
    }

    fn successors(&self, state: &Self::State, symbol: &Self::Symbol) -> Vec<Self::State> {
        self.close_set(self.inner.successors(state, symbol))
    }

    fn next_symbols(&self, state: &Self::State) -> Vec<Self::Symbol> {
        self.inner
            .next_symbols(state)
            .into_iter()
            .filter(|symbol| !self.inner.is_epsilon(symbol))
            .collect()
    }

    fn is_final(&self, state: &Self::State) -> bool {
        self.inner.is_final(state)
    }

    fn is_epsilon(&self, symbol: &Self::Symbol) -> bool {
        self.inner.is_epsilon(symbol)
    }

    fn collapse_epsilon(&self) -> bool {
        true
    }

    fn no_epsilon_produced(&self) -> bool {
        true
    }
}
