//! Generalized suffix tree over one or more reference sequences.
//!
//! The tree is a compressed trie of every suffix of every reference string,
//! built once by quadratic incremental insertion and read-only afterwards.
//! Nodes live in an arena addressed by stable indices; edge labels are
//! immutable `(string id, begin, end)` ranges into the owning sequence rather
//! than copied text.

pub mod node;
pub mod suffix_tree;

pub use node::{EdgeLabel, NodeKind};
pub use suffix_tree::{Position, SuffixTree};
