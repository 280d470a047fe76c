//! Antichain of minimal `(a, B-set)` pairs.

use super::SharedStateSet;
use rustc_hash::{FxHashMap, FxHashSet};
use std::hash::Hash;

#[derive(Debug)]
struct Entry<B> {
    states: SharedStateSet<B>,
    dirty: bool,
}

/// The set of explored pairs, kept minimal under subsumption.
///
/// A pair `(a, b1)` subsumes `(a, b2)` iff `b1 ⊆ b2`: a smaller B-set is a
/// stronger obligation for B, so once `(a, b1)` is recorded there is no point
/// exploring `(a, b2)`. The structure keeps, per A-state, only the minimal
/// B-sets seen, which serves simultaneously as the visited set and as the
/// dominance filter of the engines; it is also why exploration terminates.
///
/// Invariant: for any two entries `(a, b1)`, `(a, b2)` of the same bucket,
/// neither `b1 ⊆ b2` nor `b2 ⊆ b1`.
///
/// Each entry carries a `dirty` flag. The bounded engine marks entries whose
/// reachability depends on pruning at the current bound; [`clean_dirty`]
/// purges them when the bound is raised.
///
/// [`clean_dirty`]: Antichain::clean_dirty
#[derive(Debug, Default)]
pub struct Antichain<A, B> {
    buckets: FxHashMap<A, Vec<Entry<B>>>,
}

impl<A: Clone + Eq + Hash, B: Eq + Hash> Antichain<A, B> {
    /// Create an empty antichain.
    pub fn new() -> Self {
        Self {
            buckets: FxHashMap::default(),
        }
    }

    /// Append `(a, b)` without enforcing the invariant.
    ///
    /// Only correct when the caller knows no comparable entry exists, e.g.
    /// when seeding the initial pairs.
    pub fn add_unchecked(&mut self, a: A, b: SharedStateSet<B>, dirty: bool) {
        self.buckets
            .entry(a)
            .or_default()
            .push(Entry { states: b, dirty });
    }

    /// Add `(a, b)`, preserving the invariant.
    ///
    /// If an existing entry is a subset of `b`, nothing changes (the stronger
    /// obligation stays). Otherwise every strict superset of `b` is removed
    /// and `(b, dirty)` is appended.
    pub fn add(&mut self, a: A, b: &SharedStateSet<B>, dirty: bool) {
        let entries = self.buckets.entry(a).or_default();
        let mut index = 0;
        while index < entries.len() {
            if entries[index].states.is_subset(b) {
                // subsumed by a smaller set; supersets of b cannot coexist
                // with it, so there is nothing left to remove
                return;
            }
            if b.is_subset(&entries[index].states) {
                entries.remove(index);
            } else {
                index += 1;
            }
        }
        entries.push(Entry {
            states: b.clone(),
            dirty,
        });
    }

    /// Whether `(a, b)` or a subsuming (smaller) pair is already present.
    pub fn contains(&self, a: &A, b: &FxHashSet<B>) -> bool {
        self.buckets
            .get(a)
            .map(|entries| entries.iter().any(|entry| entry.states.is_subset(b)))
            .unwrap_or(false)
    }

    /// Remove every entry whose dirty flag is set.
    pub fn clean_dirty(&mut self) {
        for entries in self.buckets.values_mut() {
            entries.retain(|entry| !entry.dirty);
        }
    }

    /// Number of distinct A-states recorded.
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    /// Whether nothing was recorded yet.
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn set(states: &[u32]) -> SharedStateSet<u32> {
        Arc::new(states.iter().copied().collect())
    }

    fn bucket_sets(chain: &Antichain<u8, u32>, a: u8) -> Vec<Vec<u32>> {
        chain
            .buckets
            .get(&a)
            .map(|entries| {
                entries
                    .iter()
                    .map(|entry| {
                        let mut states: Vec<u32> = entry.states.iter().copied().collect();
                        states.sort_unstable();
                        states
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    #[test]
    fn subsumed_add_is_ignored() {
        let mut chain = Antichain::new();
        chain.add(0u8, &set(&[1]), false);
        chain.add(0u8, &set(&[1, 2]), false);
        assert_eq!(bucket_sets(&chain, 0), vec![vec![1]]);
    }

    #[test]
    fn supersets_are_evicted() {
        let mut chain = Antichain::new();
        chain.add(0u8, &set(&[1, 2]), false);
        chain.add(0u8, &set(&[2, 3]), false);
        chain.add(0u8, &set(&[2]), false);
        assert_eq!(bucket_sets(&chain, 0), vec![vec![2]]);
    }

    #[test]
    fn incomparable_sets_coexist() {
        let mut chain = Antichain::new();
        chain.add(0u8, &set(&[1, 2]), false);
        chain.add(0u8, &set(&[2, 3]), false);
        let buckets = bucket_sets(&chain, 0);
        assert_eq!(buckets.len(), 2);

        // the invariant: no two entries comparable in either direction
        for (i, left) in buckets.iter().enumerate() {
            for right in buckets.iter().skip(i + 1) {
                let l: FxHashSet<u32> = left.iter().copied().collect();
                let r: FxHashSet<u32> = right.iter().copied().collect();
                assert!(!l.is_subset(&r));
                assert!(!r.is_subset(&l));
            }
        }
    }

    #[test]
    fn contains_checks_subsumption() {
        let mut chain = Antichain::new();
        chain.add(0u8, &set(&[1, 2]), false);
        assert!(chain.contains(&0, &set(&[1, 2])));
        assert!(chain.contains(&0, &set(&[1, 2, 3])));
        assert!(!chain.contains(&0, &set(&[1])));
        assert!(!chain.contains(&1, &set(&[1, 2])));
    }

    #[test]
    fn distinct_a_states_have_independent_buckets() {
        let mut chain = Antichain::new();
        chain.add(0u8, &set(&[1]), false);
        chain.add(1u8, &set(&[1, 2]), false);
        assert_eq!(chain.len(), 2);
        assert_eq!(bucket_sets(&chain, 1), vec![vec![1, 2]]);
    }

    #[test]
    fn clean_dirty_purges_flagged_entries() {
        let mut chain = Antichain::new();
        chain.add(0u8, &set(&[1]), true);
        chain.add(0u8, &set(&[2]), false);
        chain.add_unchecked(1u8, set(&[3]), true);
        chain.clean_dirty();
        assert_eq!(bucket_sets(&chain, 0), vec![vec![2]]);
        assert!(bucket_sets(&chain, 1).is_empty());
    }

    #[test]
    fn empty_set_subsumes_everything() {
        let mut chain = Antichain::new();
        chain.add(0u8, &set(&[]), false);
        assert!(chain.contains(&0, &set(&[])));
        assert!(chain.contains(&0, &set(&[7])));
        chain.add(0u8, &set(&[7]), false);
        assert_eq!(bucket_sets(&chain, 0), vec![Vec::<u32>::new()]);
    }
}
