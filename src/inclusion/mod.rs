//! Language inclusion engines and their supporting data structures.
//!
//! Both engines explore the product of A with the subset construction of B on
//! the fly, driven by a LIFO frontier and pruned by an [`Antichain`] of
//! subsumed state pairs. [`ClassicalInclusion`] is exact and guaranteed to
//! terminate; [`BoundedInclusion`] checks inclusion modulo an independence
//! relation, bounded by a stack depth `k` that can be raised incrementally.

mod antichain;
mod bounded;
mod chain;
mod classical;
mod meta;

pub use antichain::Antichain;
pub use bounded::{BoundedInclusion, DEFAULT_BOUND};
pub use chain::TraceChain;
pub use classical::ClassicalInclusion;
pub use meta::{MetaAutomaton, MetaState};

use rustc_hash::FxHashSet;
use std::sync::Arc;
use thiserror::Error;

/// A set of B-states reached simultaneously on one A-path, shared between
/// frontier pairs and antichain entries. Immutable once published.
pub(crate) type SharedStateSet<S> = Arc<FxHashSet<S>>;

/// Errors raised by engine construction and reconfiguration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InclusionError {
    /// The right-hand automaton neither collapses epsilon transitions nor
    /// guarantees that it produces none.
    #[error(
        "automaton B must either collapse epsilon transitions or be known not to produce any"
    )]
    InvalidConfig,

    /// `increase_bound` was called with a bound below the current one.
    #[error("new bound {requested} is smaller than the current bound {current}")]
    BoundDecrease {
        /// The bound the engine currently runs with.
        current: usize,
        /// The rejected smaller bound.
        requested: usize,
    },
}

/// Verdict of one `run()` of an inclusion engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InclusionResult<Y> {
    /// True if every word of A is accepted by B.
    ///
    /// A positive verdict can always be trusted. A negative one can be
    /// spurious if [`bound_hit`](Self::bound_hit) is also set.
    pub included: bool,

    /// Whether bounded pruning influenced this verdict.
    ///
    /// Always false for the classical engine. When the bounded engine returns
    /// `included == false` with `bound_hit == true`, the counter-example may
    /// be spurious: verify it with a [`WordAutomaton`](crate::automaton::WordAutomaton)
    /// run or raise the bound and re-run.
    pub bound_hit: bool,

    /// A word accepted by A and rejected by B. Meaningful iff
    /// [`included`](Self::included) is false.
    pub counter_example: Vec<Y>,

    /// The bound in force when the run ended; 0 for the classical engine.
    pub max_bound: usize,
}

impl<Y> InclusionResult<Y> {
    pub(crate) fn included(max_bound: usize) -> Self {
        Self {
            included: true,
            bound_hit: false,
            counter_example: Vec::new(),
            max_bound,
        }
    }

    /// Remove symbols from the counter-example trace in place.
    ///
    /// `to_remove` returns true for symbols to drop. Used to strip silent
    /// moves that A's view of the alphabet injected into the trace. Does
    /// nothing on a positive verdict (the trace is already empty).
    pub fn filter_trace(&mut self, mut to_remove: impl FnMut(&Y) -> bool) {
        self.counter_example.retain(|symbol| !to_remove(symbol));
    }
}
