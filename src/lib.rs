//! # contam-rank
//!
//! A library for ranking candidate contaminant sequences by how much of each
//! one reoccurs, above a minimum length threshold, inside a fixed reference
//! sequence.
//!
//! The reference is indexed once in a generalized suffix tree (simple
//! quadratic incremental construction, build-once/query-many). Each
//! contaminant is scored by walking the tree from every candidate start
//! index, collecting the maximal matched segments of length at least the
//! threshold; the contamination score is the number of those segments, so
//! many independently-recurring regions outrank one long shared stretch.
//! A non-destructive ranking answers top-k queries any number of times.
//!
//! ## Example
//!
//! ```rust
//! use contam_rank::ContaminationDetector;
//!
//! // Reference sequence and minimum segment length
//! let mut detector = ContaminationDetector::new("ACGTACGTTT", 3).unwrap();
//!
//! // "ACGTA" recurs once; the all-T read matches three overlapping windows
//! assert_eq!(detector.add_contaminant("ACGTAA").unwrap(), 1);
//! assert_eq!(detector.add_contaminant("TTTTT").unwrap(), 3);
//!
//! assert_eq!(detector.top_contaminants(1), vec!["TTTTT".to_string()]);
//! ```
//!
//! ## Modules
//!
//! - [`tree`]: Generalized suffix tree construction and navigation
//! - [`scoring`]: Segment extraction and the contamination detector
//! - [`ranking`]: Score-ordered, non-destructive top-k container
//! - [`core`]: Shared types and the error taxonomy
//! - [`parsing`]: FASTA readers for references and contaminant batches
//! - [`cli`]: Command-line interface implementation

pub mod cli;
pub mod core;
pub mod parsing;
pub mod ranking;
pub mod scoring;
pub mod tree;

// Re-export commonly used types for convenience
pub use crate::core::error::{ContaminationError, TreeError};
pub use crate::core::types::{MatchSegment, StringId};
pub use ranking::ContaminantRanking;
pub use scoring::{longest_matching_segments, ContaminationDetector};
pub use tree::{Position, SuffixTree};
