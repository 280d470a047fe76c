//! # libinclusion
//!
//! Antichain-based language inclusion between finite automata.
//!
//! This library answers whether every word accepted by an automaton A is also
//! accepted by an automaton B, and produces a concrete counter-example word
//! when it is not. Two engines are provided:
//!
//! * [`ClassicalInclusion`](inclusion::ClassicalInclusion): the exact check,
//!   guaranteed to terminate, driven by an antichain of subsumed state pairs.
//!
//! * [`BoundedInclusion`](inclusion::BoundedInclusion): inclusion modulo an
//!   independence relation over the alphabet, where words that differ only by
//!   swapping adjacent independent symbols are identified. The problem is
//!   undecidable in general, so the check is bounded by an integer `k` and may
//!   report spurious counter-examples; the bound can be raised incrementally,
//!   reusing prior exploration.
//!
//! ## Example
//!
//! ```rust,ignore
//! use libinclusion::prelude::*;
//!
//! let mut table = SymbolTable::new();
//! let a = table.intern("a");
//!
//! let mut lhs = ExplicitAutomaton::new("lhs");
//! let q0 = lhs.add_state("q0");
//! lhs.mark_initial(q0);
//! lhs.mark_final(q0);
//! lhs.add_transition(q0, a, q0);
//!
//! let mut rhs = ExplicitAutomaton::new("rhs");
//! let r0 = rhs.add_state("r0");
//! rhs.mark_initial(r0);
//! rhs.mark_final(r0);
//! rhs.add_transition(r0, a, r0);
//!
//! let mut engine = ClassicalInclusion::new(&lhs, &rhs)?;
//! assert!(engine.run().included);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod automaton;
pub mod cli;
pub mod dot;
pub mod format;
pub mod inclusion;
pub mod independence;

/// Common imports for convenient usage
pub mod prelude {
    pub use crate::automaton::{
        reachable_states, Automaton, EpsilonClosed, ExplicitAutomaton, StateId, SymbolId,
        SymbolTable, WordAutomaton,
    };
    pub use crate::format::{parse_automaton, ParseError};
    pub use crate::inclusion::{
        BoundedInclusion, ClassicalInclusion, InclusionError, InclusionResult,
    };
    pub use crate::independence::{Independence, IndependentPairs, NoIndependence};
}
