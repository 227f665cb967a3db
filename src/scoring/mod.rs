//! Contamination scoring: threshold-bounded longest-match traversal of the
//! suffix tree and the detector that ranks a stream of contaminants.

pub mod detector;
pub mod segments;

pub use detector::ContaminationDetector;
pub use segments::longest_matching_segments;
