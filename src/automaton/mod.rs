//! Automaton abstractions consumed by the inclusion engines.
//!
//! The [`Automaton`] trait is the contract every input automaton satisfies.
//! The engines are generic over it and monomorphize, so per-transition cost
//! stays at the level of a direct call. Concrete implementations provided
//! here: [`ExplicitAutomaton`] (dense, name-interned, built by the front-end
//! parser) and [`WordAutomaton`] (accepts exactly one word). The
//! [`EpsilonClosed`] wrapper derives an epsilon-free view of any automaton.

mod closure;
mod explicit;
mod word;

pub use closure::EpsilonClosed;
pub use explicit::{ExplicitAutomaton, StateId, SymbolId, SymbolTable};
pub use word::WordAutomaton;

use rustc_hash::FxHashSet;
use std::collections::VecDeque;
use std::hash::Hash;

/// Contract between an automaton and the inclusion engines.
///
/// States and symbols are opaque to the engines: they only need equality and
/// a stable hash. Successor queries may allocate; implementations with
/// expensive transitions should memoize internally (see [`EpsilonClosed`] for
/// an example).
///
/// # Epsilon contract
///
/// An automaton used as the right-hand side (B) of an inclusion query must
/// either never produce epsilon symbols ([`no_epsilon_produced`] returns
/// `true`) or present an already-collapsed view ([`collapse_epsilon`] returns
/// `true`, as [`EpsilonClosed`] does). Engine constructors reject a B that
/// satisfies neither.
///
/// [`no_epsilon_produced`]: Automaton::no_epsilon_produced
/// [`collapse_epsilon`]: Automaton::collapse_epsilon
pub trait Automaton {
    /// State type. Cheap to clone; engines copy states into pairs freely.
    type State: Clone + Eq + Hash;
    /// Symbol type shared by both automata of a query.
    type Symbol: Clone + Eq + Hash;

    /// All initial states.
    fn initial_states(&self) -> Vec<Self::State>;

    /// Successors of `state` on `symbol`. May be empty.
    fn successors(&self, state: &Self::State, symbol: &Self::Symbol) -> Vec<Self::State>;

    /// A finite superset of the symbols on which `state` has successors.
    ///
    /// False positives are tolerated (the engines skip symbols whose
    /// successor set turns out empty); false negatives are not.
    fn next_symbols(&self, state: &Self::State) -> Vec<Self::Symbol>;

    /// Whether `state` is accepting.
    fn is_final(&self, state: &Self::State) -> bool;

    /// Whether `symbol` is a silent move.
    ///
    /// An epsilon symbol produced by A still appears in counter-example
    /// traces (use [`InclusionResult::filter_trace`] to drop it) but never
    /// advances B.
    ///
    /// [`InclusionResult::filter_trace`]: crate::inclusion::InclusionResult::filter_trace
    fn is_epsilon(&self, symbol: &Self::Symbol) -> bool;

    /// Whether this automaton presents an epsilon-collapsed view of itself.
    fn collapse_epsilon(&self) -> bool {
        false
    }

    /// Whether this automaton is known never to produce epsilon symbols.
    fn no_epsilon_produced(&self) -> bool {
        false
    }
}

impl<A: Automaton + ?Sized> Automaton for &A {
    type State = A::State;
    type Symbol = A::Symbol;

    fn initial_states(&self) -> Vec<Self::State> {
        (**self).initial_states()
    }

    fn successors(&self, state: &Self::State, symbol: &Self::Symbol) -> Vec<Self::State> {
        (**self).successors(state, symbol)
    }

    fn next_symbols(&self, state: &Self::State) -> Vec<Self::Symbol> {
        (**self).next_symbols(state)
    }

    fn is_final(&self, state: &Self::State) -> bool {
        (**self).is_final(state)
    }

    fn is_epsilon(&self, symbol: &Self::Symbol) -> bool {
        (**self).is_epsilon(symbol)
    }

    fn collapse_epsilon(&self) -> bool {
        (**self).collapse_epsilon()
    }

    fn no_epsilon_produced(&self) -> bool {
        (**self).no_epsilon_produced()
    }
}

/// Fully explores an automaton and returns the set of reachable states.
///
/// Breadth-first from the initial states. Useful for diagnostics and for
/// rendering; the inclusion engines never need the full state space.
pub fn reachable_states<A: Automaton>(automaton: &A) -> FxHashSet<A::State> {
    let mut seen = FxHashSet::default();
    let mut frontier: VecDeque<A::State> = automaton.initial_states().into();
    while let Some(next) = frontier.pop_front() {
        if !seen.insert(next.clone()) {
            continue;
        }
        for symbol in automaton.next_symbols(&next) {
            for succ in automaton.successors(&next, &symbol) {
                frontier.push_back(succ);
            }
        }
    }
    seen
}
