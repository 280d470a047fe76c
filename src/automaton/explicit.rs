//! Dense in-memory automaton with interned state and symbol names.
//!
//! This is the representation the front-end parser builds and the one most
//! tests use. Symbols live in a [`SymbolTable`] shared between the two
//! automata of a query so that the same name maps to the same [`SymbolId`] on
//! both sides.

use super::Automaton;
use crate::independence::IndependentPairs;
use rustc_hash::{FxHashMap, FxHashSet};

/// Interned symbol identifier.
///
/// A thin wrapper around a 32-bit index into a [`SymbolTable`]. Keeping the
/// name out of the struct keeps states and symbols `Copy` and cheap to hash.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SymbolId(u32);

/// State identifier within one [`ExplicitAutomaton`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StateId(u32);

/// Mapping between symbol names and [`SymbolId`]s, plus the independence
/// pairs declared over them.
///
/// One table must be shared by both automata of an inclusion query; the
/// engines compare symbols by id only.
#[derive(Debug, Default)]
pub struct SymbolTable {
    names: Vec<String>,
    lookup: FxHashMap<String, SymbolId>,
    independence: FxHashSet<(SymbolId, SymbolId)>,
}

impl SymbolTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern `name`, returning the existing id if the name is known.
    pub fn intern(&mut self, name: &str) -> SymbolId {
        if let Some(&id) = self.lookup.get(name) {
            return id;
        }
        let id = SymbolId(self.names.len() as u32);
        self.names.push(name.to_owned());
        self.lookup.insert(name.to_owned(), id);
        id
    }

    /// Look up a symbol by name without interning it.
    pub fn find(&self, name: &str) -> Option<SymbolId> {
        self.lookup.get(name).copied()
    }

    /// The name a symbol was interned under.
    pub fn name(&self, symbol: SymbolId) -> &str {
        &self.names[symbol.0 as usize]
    }

    /// Number of interned symbols.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether the table holds no symbols.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Declare `a` and `b` independent (both orientations are recorded).
    pub fn add_independence(&mut self, a: SymbolId, b: SymbolId) {
        self.independence.insert((a, b));
        self.independence.insert((b, a));
    }

    /// Whether `a` and `b` were declared independent.
    pub fn independent(&self, a: SymbolId, b: SymbolId) -> bool {
        self.independence.contains(&(a, b))
    }

    /// Whether no independence pairs were declared.
    pub fn independence_is_empty(&self) -> bool {
        self.independence.is_empty()
    }

    /// Snapshot of the declared pairs as a standalone relation.
    pub fn independence(&self) -> IndependentPairs<SymbolId> {
        IndependentPairs::from_pairs(self.independence.iter().copied())
    }
}

#[derive(Debug, Default, PartialEq)]
struct StateData {
    name: String,
    is_final: bool,
    successors: FxHashMap<SymbolId, Vec<StateId>>,
}

/// A finite automaton stored as adjacency maps, one per state.
///
/// States are addressed by [`StateId`] in insertion order. The structure is
/// append-only: states and transitions can be added but not removed, which
/// matches how the parser and the test fixtures build automata.
#[derive(Debug, Default, PartialEq)]
pub struct ExplicitAutomaton {
    name: String,
    states: Vec<StateData>,
    lookup: FxHashMap<String, StateId>,
    initial: Vec<StateId>,
    epsilon: FxHashSet<SymbolId>,
}

impl ExplicitAutomaton {
    /// Create an empty automaton.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// The automaton's declared name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Add a state, returning the existing id if `name` is already declared.
    pub fn add_state(&mut self, name: &str) -> StateId {
        if let Some(&id) = self.lookup.get(name) {
            return id;
        }
        let id = StateId(self.states.len() as u32);
        self.states.push(StateData {
            name: name.to_owned(),
            ..StateData::default()
        });
        self.lookup.insert(name.to_owned(), id);
        id
    }

    /// Look up a state by name.
    pub fn state_id(&self, name: &str) -> Option<StateId> {
        self.lookup.get(name).copied()
    }

    /// The name a state was declared under.
    pub fn state_name(&self, state: StateId) -> &str {
        &self.states[state.0 as usize].name
    }

    /// Number of states.
    pub fn num_states(&self) -> usize {
        self.states.len()
    }

    /// Mark a state initial. Duplicate marks are ignored.
    pub fn mark_initial(&mut self, state: StateId) {
        if !self.initial.contains(&state) {
            self.initial.push(state);
        }
    }

    /// Mark a state accepting.
    pub fn mark_final(&mut self, state: StateId) {
        self.states[state.0 as usize].is_final = true;
    }

    /// Classify a symbol as a silent move for this automaton.
    pub fn mark_epsilon(&mut self, symbol: SymbolId) {
        self.epsilon.insert(symbol);
    }

    /// Add the transition `from --symbol--> to`.
    pub fn add_transition(&mut self, from: StateId, symbol: SymbolId, to: StateId) {
        let bucket = self.states[from.0 as usize]
            .successors
            .entry(symbol)
            .or_default();
        if !bucket.contains(&to) {
            bucket.push(to);
        }
    }
}

impl Automaton for ExplicitAutomaton {
    type State = StateId;
    type Symbol = SymbolId;

    fn initial_states(&self) -> Vec<StateId> {
        self.initial.clone()
    }

    fn successors(&self, state: &StateId, symbol: &SymbolId) -> Vec<StateId> {
        self.states[state.0 as usize]
            .successors
            .get(symbol)
            .cloned()
            .unwrap_or_default()
    }

    fn next_symbols(&self, state: &StateId) -> Vec<SymbolId> {
        let mut symbols: Vec<SymbolId> = self.states[state.0 as usize]
            .successors
            .keys()
            .copied()
            .collect();
        // deterministic exploration order regardless of hash seed
        symbols.sort_unstable();
        symbols
    }

    fn is_final(&self, state: &StateId) -> bool {
        self.states[state.0 as usize].is_final
    }

    fn is_epsilon(&self, symbol: &SymbolId) -> bool {
        self.epsilon.contains(symbol)
    }

    fn no_epsilon_produced(&self) -> bool {
        self.epsilon.is_empty()
            || !self
                .states
                .iter()
                .any(|s| s.successors.keys().any(|y| self.epsilon.contains(y)))
    }
}
