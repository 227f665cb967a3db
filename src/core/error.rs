//! Error taxonomy for tree construction, navigation, and scoring.
//!
//! All of these are local contract violations surfaced immediately to the
//! caller; nothing is retried internally. Construction is all-or-nothing (a
//! half-built tree is never exposed) and a failed scoring call leaves the
//! ranking untouched.

use thiserror::Error;

/// Errors raised by suffix-tree construction and navigation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    /// The position handle does not belong to this tree, or refers to a node
    /// that was spliced out during construction. Never recoverable except by
    /// discarding the stale handle.
    #[error("invalid position: {0}")]
    InvalidPosition(&'static str),

    /// The sequence contains the reserved terminator byte
    #[error("sequence contains the reserved terminator byte 0x00 at offset {0}")]
    MalformedAlphabet(usize),
}

/// Errors raised by the contamination scorer and detector
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContaminationError {
    /// Threshold must be at least 1
    #[error("threshold must be >= 1, got {0}")]
    ThresholdOutOfRange(usize),

    /// A contaminant contains the reserved terminator byte
    #[error("contaminant contains the reserved terminator byte 0x00 at offset {0}")]
    MalformedAlphabet(usize),

    #[error(transparent)]
    Tree(#[from] TreeError),
}
