//! The inclusion engine modulo an independence relation.

use super::chain::{chain_word, TraceChain};
use super::meta::{MetaAutomaton, MetaState};
use super::{Antichain, InclusionError, InclusionResult, SharedStateSet};
use crate::automaton::Automaton;
use crate::independence::Independence;
use rustc_hash::FxHashSet;
use std::collections::VecDeque;
use std::sync::Arc;
use tracing::{debug, trace};

/// Starting bound when none is given; low bounds explore fast and can be
/// raised incrementally when a counter-example turns out spurious.
pub const DEFAULT_BOUND: usize = 2;

type Meta<B> = Arc<MetaState<<B as Automaton>::State, <B as Automaton>::Symbol>>;

struct Pair<SA, SB, Y> {
    a: SA,
    b: SharedStateSet<SB>,
    chain: Option<Arc<TraceChain<Y>>>,
    dirty: bool,
}

/// Language inclusion modulo an independence relation, bounded by `k`.
///
/// Words of A and B are identified when they differ only by swapping adjacent
/// independent symbols. The exact problem is undecidable, so B is lifted to a
/// [`MetaAutomaton`] whose states carry two stacks of pending symbols, and
/// meta-states deeper than the bound `k` are pruned. Pruning makes a negative
/// verdict tentative: when a counter-example's ancestry was pruned the result
/// carries `bound_hit = true` and the word may be spurious.
///
/// The engine is incremental. Each pruned expansion is remembered, and
/// [`increase_bound`](Self::increase_bound) re-seeds the frontier with
/// exactly the work the old bound cut off, so raising the bound never redoes
/// exploration that was already exact.
///
/// A caller that needs a definitive answer follows the protocol of the CLI
/// driver: re-check a `bound_hit` counter-example against B with the word
/// itself as A and the bound at the word's length; if B accepts it, raise the
/// bound by one and re-run.
pub struct BoundedInclusion<A, B, I>
where
    A: Automaton,
    B: Automaton<Symbol = A::Symbol>,
    A::Symbol: Ord,
    I: Independence<A::Symbol>,
{
    a: A,
    b: MetaAutomaton<B, I>,
    antichain: Antichain<A::State, Meta<B>>,
    frontier: VecDeque<Pair<A::State, Meta<B>, A::Symbol>>,
    /// Unpruned twins of expansions the bound cut off, replayed when the
    /// bound is raised.
    before_dirty: Vec<Pair<A::State, Meta<B>, A::Symbol>>,
    bound: usize,
}

impl<A, B, I> BoundedInclusion<A, B, I>
where
    A: Automaton,
    B: Automaton<Symbol = A::Symbol>,
    A::Symbol: Ord,
    I: Independence<A::Symbol>,
{
    /// Set up the query `L(a) ⊆ L(b)` modulo `independence`, with the
    /// default initial bound of [`DEFAULT_BOUND`].
    pub fn new(a: A, b: B, independence: I) -> Result<Self, InclusionError> {
        Self::with_bound(a, b, DEFAULT_BOUND, independence)
    }

    /// Set up the query with an explicit initial bound.
    ///
    /// Fails with [`InclusionError::InvalidConfig`] unless `b` collapses
    /// epsilon transitions or produces none.
    pub fn with_bound(
        a: A,
        b: B,
        initial_bound: usize,
        independence: I,
    ) -> Result<Self, InclusionError> {
        let b = MetaAutomaton::new(b, independence)?;

        let mut antichain = Antichain::new();
        let mut frontier = VecDeque::new();
        let b_initial: SharedStateSet<Meta<B>> =
            Arc::new(b.initial_states().into_iter().collect());
        for state_a in a.initial_states() {
            antichain.add_unchecked(state_a.clone(), b_initial.clone(), false);
            frontier.push_back(Pair {
                a: state_a,
                b: b_initial.clone(),
                chain: None,
                dirty: false,
            });
        }

        Ok(Self {
            a,
            b,
            antichain,
            frontier,
            before_dirty: Vec::new(),
            bound: initial_bound,
        })
    }

    /// The bound currently in force.
    pub fn bound(&self) -> usize {
        self.bound
    }

    /// Raise the bound to `new_bound` and re-seed the frontier.
    ///
    /// Entries and frontier pairs that existed only because pruning hid a
    /// larger B-set are discarded; the saved unpruned twins take their place,
    /// so the next [`run`](Self::run) continues exactly where the old bound
    /// cut the exploration off. It may rediscover the same counter-example.
    ///
    /// Fails with [`InclusionError::BoundDecrease`] if `new_bound` is below
    /// the current bound; a call with the current bound is a no-op.
    pub fn increase_bound(&mut self, new_bound: usize) -> Result<(), InclusionError> {
        if new_bound < self.bound {
            return Err(InclusionError::BoundDecrease {
                current: self.bound,
                requested: new_bound,
            });
        }
        if new_bound == self.bound {
            return Ok(());
        }
        self.bound = new_bound;

        self.antichain.clean_dirty();
        self.frontier.retain(|pair| !pair.dirty);
        for pair in std::mem::take(&mut self.before_dirty) {
            if !self.antichain.contains(&pair.a, &pair.b) {
                self.antichain.add(pair.a.clone(), &pair.b, false);
                self.frontier.push_back(Pair {
                    dirty: false,
                    ..pair
                });
            }
        }
        debug!(bound = self.bound, "bound raised");
        Ok(())
    }

    /// Drop meta-states deeper than the bound from `expanded`.
    ///
    /// Returns the untouched set when anything was dropped and the current
    /// pair is not itself a descendant of a pruned step (in that case a twin
    /// is already on record upstream).
    fn prune(
        &self,
        expanded: &mut FxHashSet<Meta<B>>,
        dirty: bool,
    ) -> Option<SharedStateSet<Meta<B>>> {
        if !expanded.iter().any(|meta| meta.depth() > self.bound) {
            return None;
        }
        let unpruned = (!dirty).then(|| Arc::new(expanded.clone()));
        expanded.retain(|meta| meta.depth() <= self.bound);
        unpruned
    }

    /// Run the bounded inclusion check until a verdict is reached.
    pub fn run(&mut self) -> InclusionResult<A::Symbol> {
        let mut rounds: u64 = 0;

        while let Some(current) = self.frontier.pop_front() {
            rounds += 1;
            if rounds % 1024 == 0 {
                debug!(
                    rounds,
                    seen = self.antichain.len(),
                    frontier = self.frontier.len(),
                    "exploration progress"
                );
            }

            if self.a.is_final(&current.a)
                && !current.b.iter().any(|meta| self.b.is_final(meta))
            {
                let counter_example = chain_word(&current.chain);
                debug!(
                    length = counter_example.len(),
                    bound_hit = current.dirty,
                    "counter-example found"
                );
                return InclusionResult {
                    included: false,
                    bound_hit: current.dirty,
                    counter_example,
                    max_bound: self.bound,
                };
            }

            for sigma in self.a.next_symbols(&current.a) {
                let successors_a = self.a.successors(&current.a, &sigma);
                if successors_a.is_empty() {
                    continue;
                }

                let (states_b, unpruned) = if self.a.is_epsilon(&sigma) {
                    (current.b.clone(), None)
                } else {
                    let mut expanded = FxHashSet::default();
                    for meta in current.b.iter() {
                        expanded.extend(self.b.successors(meta, &sigma));
                    }
                    let unpruned = self.prune(&mut expanded, current.dirty);
                    (Arc::new(expanded), unpruned)
                };

                let dirty = current.dirty || unpruned.is_some();
                let chain = Some(TraceChain::extend(&current.chain, sigma.clone()));
                for state_a in successors_a {
                    if let Some(unpruned) = &unpruned {
                        self.before_dirty.push(Pair {
                            a: state_a.clone(),
                            b: unpruned.clone(),
                            chain: chain.clone(),
                            dirty: false,
                        });
                    }

                    if !self.antichain.contains(&state_a, &states_b) {
                        self.antichain.add(state_a.clone(), &states_b, dirty);
                        trace!(frontier = self.frontier.len(), dirty, "pair pushed");
                        self.frontier.push_front(Pair {
                            a: state_a,
                            b: states_b.clone(),
                            chain: chain.clone(),
                            dirty,
                        });
                    }
                }
            }
        }

        debug!(rounds, seen = self.antichain.len(), "inclusion holds");
        InclusionResult::included(self.bound)
    }
}
