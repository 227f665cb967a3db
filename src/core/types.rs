use serde::{Deserialize, Serialize};

/// Reserved child key marking suffix terminators inside the tree.
///
/// Reference and contaminant sequences must not contain this byte; inputs
/// that do are rejected with
/// [`MalformedAlphabet`](crate::core::error::TreeError::MalformedAlphabet)
/// before any tree node is created.
pub const TERMINATOR_BYTE: u8 = 0x00;

/// 1-based identifier of a reference string inside a suffix tree.
///
/// Ids are assigned in insertion order, starting at 1, and appear in the
/// per-node marker sets that record which strings' suffixes pass through a
/// node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct StringId(pub usize);

impl std::fmt::Display for StringId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A maximal matched region of a contaminant against the reference.
///
/// Half-open: the segment covers `contaminant[start..end]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSegment {
    /// Start index into the contaminant (inclusive)
    pub start: usize,
    /// End index into the contaminant (exclusive)
    pub end: usize,
}

impl MatchSegment {
    #[must_use]
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end);
        Self { start, end }
    }

    /// Number of matched bytes covered by this segment
    #[must_use]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Check that a sequence stays inside the supported alphabet.
///
/// Returns the offset of the first reserved byte, or `None` if the sequence
/// is clean. The only excluded byte is [`TERMINATOR_BYTE`]; everything else
/// is legal so the tree works for arbitrary ASCII sequences, not just ACGT.
#[must_use]
pub fn find_reserved_byte(sequence: &[u8]) -> Option<usize> {
    sequence.iter().position(|&b| b == TERMINATOR_BYTE)
}
