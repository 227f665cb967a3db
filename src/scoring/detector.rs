//! The contamination detector: the single owner of the tree, the threshold,
//! and the ranking.

use tracing::debug;

use crate::core::error::ContaminationError;
use crate::ranking::ContaminantRanking;
use crate::scoring::segments::longest_matching_segments;
use crate::tree::SuffixTree;

/// Scores a stream of contaminants against one reference sequence.
///
/// The suffix tree is built once at construction and is read-only afterwards;
/// the ranking is mutated by every insertion and is exclusively owned here.
///
/// # Example
///
/// ```
/// use contam_rank::ContaminationDetector;
///
/// let mut detector = ContaminationDetector::new("ACGTACGTTT", 3).unwrap();
/// assert_eq!(detector.add_contaminant("ACGTAA").unwrap(), 1);
/// assert_eq!(detector.add_contaminant("TTTTT").unwrap(), 3);
/// assert_eq!(detector.top_contaminants(1), vec!["TTTTT".to_string()]);
/// ```
#[derive(Debug)]
pub struct ContaminationDetector {
    tree: SuffixTree,
    threshold: usize,
    ranking: ContaminantRanking,
}

impl ContaminationDetector {
    /// Build a detector over `reference` with the minimum segment length
    /// `threshold`.
    ///
    /// # Errors
    ///
    /// Returns `ThresholdOutOfRange` if `threshold` is zero and
    /// `MalformedAlphabet` if the reference contains the reserved terminator
    /// byte. Construction is all-or-nothing.
    pub fn new(reference: &str, threshold: usize) -> Result<Self, ContaminationError> {
        if threshold == 0 {
            return Err(ContaminationError::ThresholdOutOfRange(threshold));
        }
        let tree = SuffixTree::from_sequence(reference.as_bytes().to_vec())?;
        Ok(Self {
            tree,
            threshold,
            ranking: ContaminantRanking::new(),
        })
    }

    /// Minimum length a matched segment must reach to count
    #[must_use]
    pub fn threshold(&self) -> usize {
        self.threshold
    }

    /// The reference index, for callers that want raw traversal
    #[must_use]
    pub fn tree(&self) -> &SuffixTree {
        &self.tree
    }

    /// Number of contaminants added so far
    #[must_use]
    pub fn len(&self) -> usize {
        self.ranking.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ranking.is_empty()
    }

    /// Score `contaminant` and enqueue it. Returns the contamination score:
    /// the count of maximal matched segments.
    ///
    /// # Errors
    ///
    /// Returns `MalformedAlphabet` if the contaminant contains the reserved
    /// terminator byte; the ranking is left untouched in that case.
    pub fn add_contaminant(&mut self, contaminant: &str) -> Result<usize, ContaminationError> {
        let segments = longest_matching_segments(&self.tree, contaminant.as_bytes(), self.threshold)?;
        let score = segments.len();
        debug!(score, bases = contaminant.len(), "scored contaminant");
        self.ranking.insert(contaminant.to_string(), score);
        Ok(score)
    }

    /// The `min(k, len)` most contaminating sequences, highest score first.
    /// Non-destructive: the ranking is unchanged after the call.
    pub fn top_contaminants(&mut self, k: usize) -> Vec<String> {
        self.ranking.top_k(k)
    }
}
