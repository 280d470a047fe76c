//! An automaton accepting exactly one word.

use super::Automaton;
use std::hash::Hash;

/// Accepts exactly the word it was built from.
///
/// States are prefix lengths: state `i` means the first `i` symbols have been
/// read, and the state past the last symbol is the only accepting one. The
/// word must be epsilon-free.
///
/// The main use is the spurious-trace check of the bounded engine: replace A
/// with the candidate counter-example and re-run the inclusion with the bound
/// set to the word's length, which that run can never exceed.
#[derive(Debug, Clone)]
pub struct WordAutomaton<Y> {
    word: Vec<Y>,
}

impl<Y> WordAutomaton<Y> {
    /// Build the automaton for `word`.
    pub fn new(word: Vec<Y>) -> Self {
        Self { word }
    }

    /// The accepted word.
    pub fn word(&self) -> &[Y] {
        &self.word
    }

    /// Length of the accepted word.
    pub fn len(&self) -> usize {
        self.word.len()
    }

    /// Whether this automaton accepts only the empty word.
    pub fn is_empty(&self) -> bool {
        self.word.is_empty()
    }
}

impl<Y: Clone + Eq + Hash> Automaton for WordAutomaton<Y> {
    type State = usize;
    type Symbol = Y;

    fn initial_states(&self) -> Vec<usize> {
        vec![0]
    }

    fn successors(&self, state: &usize, symbol: &Y) -> Vec<usize> {
        match self.word.get(*state) {
            Some(expected) if expected == symbol => vec![state + 1],
            _ => Vec::new(),
        }
    }

    fn next_symbols(&self, state: &usize) -> Vec<Y> {
        self.word.get(*state).cloned().into_iter().collect()
    }

    fn is_final(&self, state: &usize) -> bool {
        *state >= self.word.len()
    }

    fn is_epsilon(&self, _symbol: &Y) -> bool {
        false
    }

    fn no_epsilon_produced(&self) -> bool {
        true
    }
}
