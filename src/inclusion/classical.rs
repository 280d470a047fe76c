//! The exact antichain-based inclusion engine.

use super::chain::{chain_word, TraceChain};
use super::{Antichain, InclusionError, InclusionResult, SharedStateSet};
use crate::automaton::Automaton;
use rustc_hash::FxHashSet;
use std::collections::VecDeque;
use std::sync::Arc;
use tracing::{debug, trace};

struct Pair<SA, SB, Y> {
    a: SA,
    b: SharedStateSet<SB>,
    chain: Option<Arc<TraceChain<Y>>>,
}

/// Exact language inclusion between two automata.
///
/// Explores pairs of an A-state and the set of B-states reachable on the same
/// path, depth-first, pruning any pair subsumed by an already-seen one. The
/// antichain of seen pairs doubles as the visited set, which is what makes
/// the exploration terminate even when A has infinitely many states.
///
/// One engine instance serves one query. [`run`](Self::run) explores until it
/// finds a counter-example or exhausts the frontier; calling it again resumes
/// from the live frontier and yields the next counter-example, or a positive
/// verdict once the frontier drains.
///
/// # Example
///
/// ```rust,ignore
/// use libinclusion::prelude::*;
///
/// let mut engine = ClassicalInclusion::new(&lhs, &rhs)?;
/// let result = engine.run();
/// if !result.included {
///     println!("diverging word of length {}", result.counter_example.len());
/// }
/// ```
pub struct ClassicalInclusion<A, B>
where
    A: Automaton,
    B: Automaton<Symbol = A::Symbol>,
{
    a: A,
    b: B,
    antichain: Antichain<A::State, B::State>,
    frontier: VecDeque<Pair<A::State, B::State, A::Symbol>>,
}

impl<A, B> ClassicalInclusion<A, B>
where
    A: Automaton,
    B: Automaton<Symbol = A::Symbol>,
{
    /// Set up the inclusion query `L(a) ⊆ L(b)`.
    ///
    /// Fails with [`InclusionError::InvalidConfig`] unless `b` collapses
    /// epsilon transitions or produces none.
    pub fn new(a: A, b: B) -> Result<Self, InclusionError> {
        if !b.no_epsilon_produced() && !b.collapse_epsilon() {
            return Err(InclusionError::InvalidConfig);
        }

        let mut antichain = Antichain::new();
        let mut frontier = VecDeque::new();
        let b_initial: SharedStateSet<B::State> =
            Arc::new(b.initial_states().into_iter().collect());
        for state_a in a.initial_states() {
            antichain.add_unchecked(state_a.clone(), b_initial.clone(), false);
            frontier.push_back(Pair {
                a: state_a,
                b: b_initial.clone(),
                chain: None,
            });
        }

        Ok(Self {
            a,
            b,
            antichain,
            frontier,
        })
    }

    /// Run the inclusion check until a verdict is reached.
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
                && !current.b.iter().any(|state| self.b.is_final(state))
            {
                let counter_example = chain_word(&current.chain);
                debug!(length = counter_example.len(), "counter-example found");
                return InclusionResult {
                    included: false,
                    bound_hit: false,
                    counter_example,
                    max_bound: 0,
                };
            }

            for sigma in self.a.next_symbols(&current.a) {
                let successors_a = self.a.successors(&current.a, &sigma);
                if successors_a.is_empty() {
                    continue;
                }

                // B-set identity is shared across every A-successor of this
                // symbol: the subset expansion is paid once.
                let states_b: SharedStateSet<B::State> = if self.a.is_epsilon(&sigma) {
                    current.b.clone()
                } else {
                    let mut expanded = FxHashSet::default();
                    for state in current.b.iter() {
                        expanded.extend(self.b.successors(state, &sigma));
                    }
                    Arc::new(expanded)
                };

                let chain = Some(TraceChain::extend(&current.chain, sigma.clone()));
                for state_a in successors_a {
                    if !self.antichain.contains(&state_a, &states_b) {
                        self.antichain.add(state_a.clone(), &states_b, false);
                        trace!(frontier = self.frontier.len(), "pair pushed");
                        self.frontier.push_front(Pair {
                            a: state_a,
                            b: states_b.clone(),
                            chain: chain.clone(),
                        });
                    }
                }
            }
        }

        debug!(rounds, seen = self.antichain.len(), "inclusion holds");
        InclusionResult::included(0)
    }
}
