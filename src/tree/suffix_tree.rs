//! Suffix tree construction and navigation.
//!
//! Construction threads one suffix at a time into the tree, shortest trailing
//! suffix first, using a recursive insertion rule with three split cases.
//! This is deliberately the simple quadratic scheme rather than Ukkonen's
//! linear construction: reference sequences in the contamination use case are
//! short, and the incremental rule is far easier to reason about and test.
//!
//! After `new` returns the tree is never mutated again, so any number of
//! callers may traverse it concurrently.

use std::collections::BTreeSet;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::core::error::TreeError;
use crate::core::types::{find_reserved_byte, StringId, TERMINATOR_BYTE};
use crate::tree::node::{EdgeLabel, Node, NodeId, NodeKind};

static NEXT_TREE_ID: AtomicU64 = AtomicU64::new(1);

/// A handle to one node of one tree.
///
/// Positions are cheap to copy and only usable with the tree that issued
/// them; every accessor validates the handle and reports `InvalidPosition`
/// for foreign or stale ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    tree: u64,
    node: NodeId,
}

/// Generalized suffix tree over an ordered set of reference sequences.
#[derive(Debug)]
pub struct SuffixTree {
    /// Identity used to reject positions issued by a different tree
    id: u64,
    sequences: Vec<Vec<u8>>,
    nodes: Vec<Node>,
    root: NodeId,
}

impl SuffixTree {
    /// Build a suffix tree over an ordered set of sequences.
    ///
    /// Sequences are assigned 1-based string ids in input order. Construction
    /// is all-or-nothing: inputs are validated up front and no partially
    /// built tree is ever observable.
    ///
    /// # Errors
    ///
    /// Returns `TreeError::MalformedAlphabet` if any sequence contains the
    /// reserved terminator byte.
    pub fn new(sequences: Vec<Vec<u8>>) -> Result<Self, TreeError> {
        for sequence in &sequences {
            if let Some(offset) = find_reserved_byte(sequence) {
                return Err(TreeError::MalformedAlphabet(offset));
            }
        }

        let root = Node::branch(
            EdgeLabel::empty_at(StringId(0), 0),
            0,
            None,
            BTreeSet::new(),
        );
        let mut tree = Self {
            id: NEXT_TREE_ID.fetch_add(1, Ordering::Relaxed),
            sequences,
            nodes: vec![root],
            root: NodeId(0),
        };

        for index in 0..tree.sequences.len() {
            let sid = StringId(index + 1);
            let len = tree.sequences[index].len();

            // Every suffix of this string passes through the root.
            let root_id = tree.root;
            tree.nodes[root_id.0].marker.insert(sid);

            let mut marker = BTreeSet::new();
            marker.insert(sid);

            // Shortest trailing suffix first; each suffix is an independent
            // path so the order has no observable effect.
            for start in (0..len).rev() {
                let label = EdgeLabel::new(sid, start, len);
                tree.insert_below(root_id, label, &marker);
            }
        }

        Ok(tree)
    }

    /// Build a tree over a single reference sequence (string id 1)
    pub fn from_sequence(sequence: impl Into<Vec<u8>>) -> Result<Self, TreeError> {
        Self::new(vec![sequence.into()])
    }

    /// Number of live nodes, root included
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.alive).count()
    }

    /// Position of the root
    #[must_use]
    pub fn root(&self) -> Position {
        Position {
            tree: self.id,
            node: self.root,
        }
    }

    /// Parent of `p`, or `None` at the root.
    ///
    /// # Errors
    ///
    /// Returns `TreeError::InvalidPosition` if `p` is foreign or stale.
    pub fn parent(&self, p: &Position) -> Result<Option<Position>, TreeError> {
        let node = self.validate(p)?;
        Ok(self.nodes[node.0].parent.map(|id| Position {
            tree: self.id,
            node: id,
        }))
    }

    /// Child of `p` whose edge label aligns with `s`.
    ///
    /// The lookup goes by the first byte of `s`; the child is returned only
    /// when its label is a prefix of `s` or `s` is a prefix of the label.
    /// Terminator nodes are never returned.
    ///
    /// # Errors
    ///
    /// Returns `TreeError::InvalidPosition` if `p` is foreign or stale.
    pub fn child(&self, p: &Position, s: &[u8]) -> Result<Option<Position>, TreeError> {
        let node = self.validate(p)?;
        let Some(&key) = s.first() else {
            return Ok(None);
        };
        let Some(&child) = self.nodes[node.0].children.get(&key) else {
            return Ok(None);
        };
        if self.nodes[child.0].kind == NodeKind::Terminator {
            return Ok(None);
        }
        let label = self.label_bytes(self.nodes[child.0].label);
        if label.starts_with(s) || s.starts_with(label) {
            Ok(Some(Position {
                tree: self.id,
                node: child,
            }))
        } else {
            Ok(None)
        }
    }

    /// Edge-label text of the node at `p`
    ///
    /// # Errors
    ///
    /// Returns `TreeError::InvalidPosition` if `p` is foreign or stale.
    pub fn label(&self, p: &Position) -> Result<&[u8], TreeError> {
        let node = self.validate(p)?;
        Ok(self.label_bytes(self.nodes[node.0].label))
    }

    /// Cumulative matched length from the root to the end of `p`'s edge
    ///
    /// # Errors
    ///
    /// Returns `TreeError::InvalidPosition` if `p` is foreign or stale.
    pub fn depth(&self, p: &Position) -> Result<usize, TreeError> {
        let node = self.validate(p)?;
        Ok(self.nodes[node.0].depth)
    }

    /// Read-only view of the marker set: the ids of the strings whose
    /// suffixes pass through `p`
    ///
    /// # Errors
    ///
    /// Returns `TreeError::InvalidPosition` if `p` is foreign or stale.
    pub fn mark(&self, p: &Position) -> Result<&BTreeSet<StringId>, TreeError> {
        let node = self.validate(p)?;
        Ok(&self.nodes[node.0].marker)
    }

    /// Concatenation of edge labels from the root down to `p`
    ///
    /// # Errors
    ///
    /// Returns `TreeError::InvalidPosition` if `p` is foreign or stale.
    pub fn path_string(&self, p: &Position) -> Result<Vec<u8>, TreeError> {
        let mut node = self.validate(p)?;
        let mut labels = Vec::new();
        loop {
            labels.push(self.nodes[node.0].label);
            match self.nodes[node.0].parent {
                Some(parent) => node = parent,
                None => break,
            }
        }
        let mut path = Vec::new();
        for label in labels.iter().rev() {
            path.extend_from_slice(self.label_bytes(*label));
        }
        Ok(path)
    }

    fn validate(&self, p: &Position) -> Result<NodeId, TreeError> {
        if p.tree != self.id {
            return Err(TreeError::InvalidPosition(
                "position does not belong to this tree",
            ));
        }
        match self.nodes.get(p.node.0) {
            Some(node) if node.alive => Ok(p.node),
            _ => Err(TreeError::InvalidPosition(
                "position refers to a node that was spliced out of the tree",
            )),
        }
    }

    fn label_bytes(&self, label: EdgeLabel) -> &[u8] {
        // The root and terminator nodes carry zero-length labels whose
        // string id may not address a real sequence.
        if label.is_empty() {
            return &[];
        }
        &self.sequences[label.string_id.0 - 1][label.begin..label.end]
    }

    fn first_byte(&self, label: EdgeLabel) -> u8 {
        self.sequences[label.string_id.0 - 1][label.begin]
    }

    fn common_prefix_len(&self, a: EdgeLabel, b: EdgeLabel) -> usize {
        self.label_bytes(a)
            .iter()
            .zip(self.label_bytes(b))
            .take_while(|(x, y)| x == y)
            .count()
    }

    fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        id
    }

    /// Thread the remaining suffix `label` into the subtree rooted at
    /// `parent`, tagging every node on the path with `marker`.
    fn insert_below(&mut self, parent: NodeId, label: EdgeLabel, marker: &BTreeSet<StringId>) {
        if label.is_empty() {
            self.attach_terminator(parent, label, marker);
            return;
        }

        let key = self.first_byte(label);
        let Some(&child) = self.nodes[parent.0].children.get(&key) else {
            // No child under this byte: the whole remaining suffix becomes a
            // new leaf.
            let depth = self.nodes[parent.0].depth + label.len();
            let leaf = self.push(Node::branch(label, depth, Some(parent), marker.clone()));
            self.nodes[parent.0].children.insert(key, leaf);
            return;
        };

        let edge = self.nodes[child.0].label;
        let common = self.common_prefix_len(label, edge);

        if common == edge.len() {
            // Case A: the suffix consumes the whole edge. A childless node
            // about to gain children also terminates a suffix exactly here,
            // so it gets an explicit terminator child first.
            if self.nodes[child.0].children.is_empty() {
                let end_marker = self.nodes[child.0].marker.clone();
                let end_label = EdgeLabel::empty_at(edge.string_id, edge.end);
                self.insert_below(child, end_label, &end_marker);
            }
            self.nodes[child.0].marker.extend(marker.iter().copied());
            self.insert_below(child, label.advanced(common), marker);
        } else if common == label.len() {
            // Case B: the edge consumes the whole suffix (proper prefix).
            // The intermediate node carries exactly the suffix text and a
            // terminator records that the inserted suffix ends there.
            let mid = self.split_edge(parent, key, child, common, marker);
            let seq_end = self.sequences[label.string_id.0 - 1].len();
            let end_label = EdgeLabel::empty_at(label.string_id, seq_end);
            self.insert_below(mid, end_label, marker);
        } else {
            // Case C: partial mismatch inside the edge. The intermediate
            // node carries the common prefix and the suffix tail becomes a
            // sibling leaf of the shrunk child.
            let mid = self.split_edge(parent, key, child, common, marker);
            self.insert_below(mid, label.advanced(common), marker);
        }
    }

    /// Attach (or merge into) the terminator child of `parent`.
    fn attach_terminator(&mut self, parent: NodeId, label: EdgeLabel, marker: &BTreeSet<StringId>) {
        if let Some(&existing) = self.nodes[parent.0].children.get(&TERMINATOR_BYTE) {
            self.nodes[existing.0].marker.extend(marker.iter().copied());
            return;
        }
        let depth = self.nodes[parent.0].depth;
        let terminator = self.push(Node::terminator(label, depth, parent, marker.clone()));
        self.nodes[parent.0]
            .children
            .insert(TERMINATOR_BYTE, terminator);
    }

    /// Split `child`'s edge after `common` bytes.
    ///
    /// Installs a new intermediate node in `child`'s place under `parent`,
    /// re-attaches the remainder of the old edge as a fresh node below it,
    /// and tombstones the old slot. Labels are never rewritten in place.
    /// Returns the intermediate node.
    fn split_edge(
        &mut self,
        parent: NodeId,
        key: u8,
        child: NodeId,
        common: usize,
        marker: &BTreeSet<StringId>,
    ) -> NodeId {
        let edge = self.nodes[child.0].label;
        debug_assert!(common > 0 && common < edge.len());

        let mut mid_marker = self.nodes[child.0].marker.clone();
        mid_marker.extend(marker.iter().copied());
        let mid_depth = self.nodes[parent.0].depth + common;
        let mid = self.push(Node::branch(
            edge.truncated(common),
            mid_depth,
            Some(parent),
            mid_marker,
        ));
        self.nodes[parent.0].children.insert(key, mid);

        // Splice: a fresh node takes over the rest of the old edge along
        // with the old node's children and marker; the old slot dies.
        let rest = edge.advanced(common);
        let rest_key = self.first_byte(rest);
        let moved_children = std::mem::take(&mut self.nodes[child.0].children);
        let moved_marker = std::mem::take(&mut self.nodes[child.0].marker);
        let depth = self.nodes[child.0].depth;
        let shrunk = self.push(Node {
            label: rest,
            depth,
            parent: Some(mid),
            children: moved_children,
            marker: moved_marker,
            kind: NodeKind::Branch,
            alive: true,
        });
        let grandchildren: Vec<NodeId> = self.nodes[shrunk.0].children.values().copied().collect();
        for grandchild in grandchildren {
            self.nodes[grandchild.0].parent = Some(shrunk);
        }
        self.nodes[child.0].alive = false;
        self.nodes[mid.0].children.insert(rest_key, shrunk);

        mid
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(sequences: &[&str]) -> SuffixTree {
        SuffixTree::new(sequences.iter().map(|s| s.as_bytes().to_vec()).collect()).unwrap()
    }

    /// Walk from the root consuming whole edge labels against `suffix`.
    fn walk(tree: &SuffixTree, suffix: &[u8]) -> Position {
        let mut pos = tree.root();
        let mut rem = suffix;
        while !rem.is_empty() {
            pos = tree
                .child(&pos, rem)
                .unwrap()
                .unwrap_or_else(|| panic!("no path for {:?}", String::from_utf8_lossy(suffix)));
            let consumed = tree.label(&pos).unwrap().len().min(rem.len());
            rem = &rem[consumed..];
        }
        pos
    }

    #[test]
    fn test_suffix_coverage() {
        // Every suffix of every reference string must be a root-to-node path.
        for reference in ["ACGTACGTTT", "AAB", "ABAB", "MISSISSIPPI"] {
            let tree = build(&[reference]);
            for i in 0..reference.len() {
                let suffix = &reference.as_bytes()[i..];
                let pos = walk(&tree, suffix);
                assert_eq!(
                    tree.path_string(&pos).unwrap(),
                    suffix,
                    "suffix {i} of {reference}"
                );
            }
        }
    }

    #[test]
    fn test_suffix_coverage_multiple_strings() {
        let tree = build(&["ACGT", "CGCG"]);
        for (reference, sid) in [("ACGT", StringId(1)), ("CGCG", StringId(2))] {
            for i in 0..reference.len() {
                let suffix = &reference.as_bytes()[i..];
                let pos = walk(&tree, suffix);
                assert_eq!(tree.path_string(&pos).unwrap(), suffix);
                assert!(
                    tree.mark(&pos).unwrap().contains(&sid),
                    "marker of {suffix:?} path must contain {sid}"
                );
            }
        }
    }

    #[test]
    fn test_sibling_key_uniqueness() {
        let tree = build(&["ABABABAB", "BABA"]);
        for node in tree.nodes.iter().filter(|n| n.alive) {
            let mut seen = std::collections::HashSet::new();
            for (&key, &child) in &node.children {
                let child_node = &tree.nodes[child.0];
                if child_node.kind == NodeKind::Branch {
                    assert_eq!(key, tree.first_byte(child_node.label));
                }
                assert!(seen.insert(key), "duplicate first byte under one node");
            }
        }
    }

    #[test]
    fn test_depth_additivity() {
        let tree = build(&["ACGTACGTTT"]);
        for node in tree.nodes.iter().filter(|n| n.alive) {
            if let Some(parent) = node.parent {
                assert_eq!(node.depth, tree.nodes[parent.0].depth + node.label.len());
            } else {
                assert_eq!(node.depth, 0);
            }
        }
    }

    #[test]
    fn test_marker_monotonicity() {
        let tree = build(&["ACGT", "CGCG", "GGGG"]);
        for node in tree.nodes.iter().filter(|n| n.alive) {
            for &child in node.children.values() {
                assert!(
                    node.marker.is_superset(&tree.nodes[child.0].marker),
                    "ancestor marker must include descendant markers"
                );
            }
        }
    }

    #[test]
    fn test_terminator_marks_internal_suffix_end() {
        // "AB" is both a full suffix path and a prefix of "ABAB", so the
        // node spelling "AB" must own a terminator child.
        let tree = build(&["ABAB"]);
        let pos = walk(&tree, b"AB");
        let node = tree.validate(&pos).unwrap();
        let terminator = tree.nodes[node.0]
            .children
            .get(&TERMINATOR_BYTE)
            .copied()
            .expect("terminator child");
        assert_eq!(tree.nodes[terminator.0].kind, NodeKind::Terminator);
        assert!(tree.nodes[terminator.0].label.is_empty());
    }

    #[test]
    fn test_child_alignment_contract() {
        let tree = build(&["ACGTACGTTT"]);
        let root = tree.root();

        // Label is a prefix of the query.
        assert!(tree.child(&root, b"ACGTACGTTT").unwrap().is_some());
        // Query is a prefix of the label.
        assert!(tree.child(&root, b"AC").unwrap().is_some());
        // First byte matches but neither is a prefix of the other.
        assert!(tree.child(&root, b"AX").unwrap().is_none());
        // No child under this byte at all.
        assert!(tree.child(&root, b"Z").unwrap().is_none());
        // Empty query never matches.
        assert!(tree.child(&root, b"").unwrap().is_none());
    }

    #[test]
    fn test_root_reads_as_empty() {
        let tree = build(&["ACGT"]);
        let root = tree.root();
        assert_eq!(tree.label(&root).unwrap(), b"");
        assert_eq!(tree.depth(&root).unwrap(), 0);
        assert_eq!(tree.path_string(&root).unwrap(), b"");
    }

    #[test]
    fn test_parent_navigation() {
        let tree = build(&["ACGT"]);
        let root = tree.root();
        assert_eq!(tree.parent(&root).unwrap(), None);

        let child = tree.child(&root, b"ACGT").unwrap().unwrap();
        let up = tree.parent(&child).unwrap().unwrap();
        assert_eq!(up, root);
        assert_eq!(tree.depth(&root).unwrap(), 0);
        assert_eq!(tree.depth(&child).unwrap(), 4);
    }

    #[test]
    fn test_foreign_position_rejected() {
        let a = build(&["ACGT"]);
        let b = build(&["ACGT"]);
        let foreign = a.root();
        assert!(matches!(
            b.label(&foreign),
            Err(TreeError::InvalidPosition(_))
        ));
        assert!(matches!(
            b.parent(&foreign),
            Err(TreeError::InvalidPosition(_))
        ));
    }

    #[test]
    fn test_spliced_slots_are_dead() {
        // "AAB" forces a split of the "AB" edge, so the arena must contain a
        // tombstoned slot that validation rejects.
        let tree = build(&["AAB"]);
        let dead = tree.nodes.iter().position(|n| !n.alive);
        assert!(dead.is_some(), "edge split must tombstone the old slot");
        let stale = Position {
            tree: tree.id,
            node: NodeId(dead.unwrap()),
        };
        assert!(matches!(
            tree.label(&stale),
            Err(TreeError::InvalidPosition(_))
        ));
    }

    #[test]
    fn test_malformed_alphabet_rejected() {
        let err = SuffixTree::from_sequence(b"AC\x00GT".to_vec()).unwrap_err();
        assert_eq!(err, TreeError::MalformedAlphabet(2));
    }

    #[test]
    fn test_node_count_excludes_dead_slots() {
        let tree = build(&["AAB"]);
        assert_eq!(
            tree.node_count(),
            tree.nodes.iter().filter(|n| n.alive).count()
        );
        assert!(tree.node_count() < tree.nodes.len());
    }
}
