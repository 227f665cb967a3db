//! Score-ordered ranking of contaminants.
//!
//! The container hands back the highest-scoring contaminant first while
//! being built on the standard library's heap, a primitive that yields its
//! smallest key first: scores are negated on insertion and negated back on
//! retrieval. The negation stays internal to this module.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// Heap entry ordered by negated score; the sequence participates in the
/// ordering only as an arbitrary tie-break, which callers must not rely on.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct Entry {
    neg_score: i64,
    sequence: String,
}

/// Priority container over `(score, contaminant)` pairs.
///
/// Read-many by contract: `top_k` restores the container to its pre-call
/// state, so repeated calls over the same state return the same set.
#[derive(Debug, Default)]
pub struct ContaminantRanking {
    heap: BinaryHeap<Reverse<Entry>>,
}

impl ContaminantRanking {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of ranked entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Insert a contaminant with its score. O(log m).
    pub fn insert(&mut self, sequence: String, score: usize) {
        let neg_score = -i64::try_from(score).unwrap_or(i64::MAX);
        self.heap.push(Reverse(Entry { neg_score, sequence }));
    }

    /// The `min(k, len)` highest-scoring contaminants, best first.
    ///
    /// Entries are extracted, recorded, and reinserted unchanged, so the
    /// container ends in its pre-call state. O(k log m) out, O(k log m)
    /// back. Tie order between equal scores is unspecified.
    pub fn top_k(&mut self, k: usize) -> Vec<String> {
        let take = k.min(self.heap.len());
        let mut removed = Vec::with_capacity(take);
        while removed.len() < take {
            if let Some(Reverse(entry)) = self.heap.pop() {
                removed.push(entry);
            }
        }
        let top: Vec<String> = removed.iter().map(|e| e.sequence.clone()).collect();
        for entry in removed {
            self.heap.push(Reverse(entry));
        }
        top
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> ContaminantRanking {
        let mut ranking = ContaminantRanking::new();
        ranking.insert("AAA".to_string(), 3);
        ranking.insert("CCC".to_string(), 7);
        ranking.insert("GGG".to_string(), 1);
        ranking.insert("TTT".to_string(), 5);
        ranking
    }

    #[test]
    fn test_highest_score_first() {
        let mut ranking = filled();
        assert_eq!(ranking.top_k(2), vec!["CCC".to_string(), "TTT".to_string()]);
    }

    #[test]
    fn test_top_k_is_non_destructive() {
        let mut ranking = filled();
        let before = ranking.len();
        let first = ranking.top_k(3);
        assert_eq!(ranking.len(), before);
        let second = ranking.top_k(3);
        assert_eq!(ranking.len(), before);
        assert_eq!(first, second);
    }

    #[test]
    fn test_k_larger_than_len() {
        let mut ranking = filled();
        let all = ranking.top_k(100);
        assert_eq!(all.len(), 4);
        assert_eq!(ranking.len(), 4);
    }

    #[test]
    fn test_zero_k() {
        let mut ranking = filled();
        assert!(ranking.top_k(0).is_empty());
        assert_eq!(ranking.len(), 4);
    }

    #[test]
    fn test_duplicate_sequences_are_kept() {
        let mut ranking = ContaminantRanking::new();
        ranking.insert("ACGT".to_string(), 2);
        ranking.insert("ACGT".to_string(), 2);
        assert_eq!(ranking.len(), 2);
        assert_eq!(ranking.top_k(2).len(), 2);
        assert_eq!(ranking.len(), 2);
    }

    #[test]
    fn test_tied_scores_return_same_set() {
        let mut ranking = ContaminantRanking::new();
        ranking.insert("AA".to_string(), 4);
        ranking.insert("CC".to_string(), 4);
        ranking.insert("GG".to_string(), 4);
        let mut first = ranking.top_k(2);
        let mut second = ranking.top_k(2);
        first.sort();
        second.sort();
        assert_eq!(first, second);
    }
}
