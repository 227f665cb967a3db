//! Arena node storage for the suffix tree.

use std::collections::{BTreeSet, HashMap};

use crate::core::types::StringId;

/// Index of a node slot in the tree arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) usize);

/// An edge label: a half-open range into one of the reference sequences.
///
/// Labels are immutable values. Splitting an edge never rewrites a label in
/// place; it creates new label values (and new nodes) covering the two halves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeLabel {
    /// Owning reference string
    pub string_id: StringId,
    /// Start offset into the owning string (inclusive)
    pub begin: usize,
    /// End offset into the owning string (exclusive)
    pub end: usize,
}

impl EdgeLabel {
    #[must_use]
    pub(crate) fn new(string_id: StringId, begin: usize, end: usize) -> Self {
        debug_assert!(begin <= end);
        Self {
            string_id,
            begin,
            end,
        }
    }

    /// Zero-length label anchored at `offset`, used by terminator nodes
    #[must_use]
    pub(crate) fn empty_at(string_id: StringId, offset: usize) -> Self {
        Self::new(string_id, offset, offset)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.end - self.begin
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.begin == self.end
    }

    /// The label with its first `n` bytes stripped
    #[must_use]
    pub(crate) fn advanced(self, n: usize) -> Self {
        debug_assert!(n <= self.len());
        Self::new(self.string_id, self.begin + n, self.end)
    }

    /// The first `n` bytes of the label
    #[must_use]
    pub(crate) fn truncated(self, n: usize) -> Self {
        debug_assert!(n <= self.len());
        Self::new(self.string_id, self.begin, self.begin + n)
    }
}

/// Distinguishes content-bearing nodes from suffix-endpoint markers.
///
/// Terminator nodes carry zero-length labels and exist only to record that a
/// suffix ends at their parent. They are never returned by content lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Branch,
    Terminator,
}

/// One arena slot.
///
/// `alive` is the construction-time tombstone: when an edge split splices a
/// node out of the tree, its slot stays in the arena but is marked dead so
/// stale positions can be detected.
#[derive(Debug)]
pub(crate) struct Node {
    pub(crate) label: EdgeLabel,
    /// Cumulative matched length from the root to the end of this edge
    pub(crate) depth: usize,
    pub(crate) parent: Option<NodeId>,
    /// Children keyed by the first byte of their edge label
    pub(crate) children: HashMap<u8, NodeId>,
    /// Ids of the strings whose suffixes pass through this node; grows
    /// monotonically, never shrinks
    pub(crate) marker: BTreeSet<StringId>,
    pub(crate) kind: NodeKind,
    pub(crate) alive: bool,
}

impl Node {
    pub(crate) fn branch(
        label: EdgeLabel,
        depth: usize,
        parent: Option<NodeId>,
        marker: BTreeSet<StringId>,
    ) -> Self {
        Self {
            label,
            depth,
            parent,
            children: HashMap::new(),
            marker,
            kind: NodeKind::Branch,
            alive: true,
        }
    }

    pub(crate) fn terminator(
        label: EdgeLabel,
        depth: usize,
        parent: NodeId,
        marker: BTreeSet<StringId>,
    ) -> Self {
        Self {
            label,
            depth,
            parent: Some(parent),
            children: HashMap::new(),
            marker,
            kind: NodeKind::Terminator,
            alive: true,
        }
    }
}
