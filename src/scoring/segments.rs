//! Maximal matching segments of a contaminant against the reference tree.

use crate::core::error::{ContaminationError, TreeError};
use crate::core::types::{find_reserved_byte, MatchSegment};
use crate::tree::SuffixTree;

/// Find every maximal matching segment of `contaminant` with length at least
/// `threshold`.
///
/// For each candidate start index the tree is walked from the root, matching
/// byte by byte inside edge labels and hopping to the next child once an edge
/// is consumed; the walk stops at the first mismatch or when no further child
/// exists. Segments are produced in increasing start order and pruned with a
/// one-step lookback: when two consecutive segments share an end index, only
/// the one with the smaller start survives (it subsumes the other). The
/// pruning is deliberately local; nested segments with different end indices
/// are all retained.
///
/// A threshold longer than the contaminant admits no candidate starts and
/// yields an empty result, not an error.
///
/// # Errors
///
/// Returns `ThresholdOutOfRange` if `threshold` is zero and
/// `MalformedAlphabet` if the contaminant contains the reserved terminator
/// byte.
pub fn longest_matching_segments(
    tree: &SuffixTree,
    contaminant: &[u8],
    threshold: usize,
) -> Result<Vec<MatchSegment>, ContaminationError> {
    if threshold == 0 {
        return Err(ContaminationError::ThresholdOutOfRange(threshold));
    }
    if let Some(offset) = find_reserved_byte(contaminant) {
        return Err(ContaminationError::MalformedAlphabet(offset));
    }

    let mut segments: Vec<MatchSegment> = Vec::new();
    if contaminant.len() < threshold {
        return Ok(segments);
    }

    for start in 0..=contaminant.len() - threshold {
        let matched = match_length(tree, &contaminant[start..])?;
        if matched < threshold {
            continue;
        }
        let current = MatchSegment::new(start, start + matched);
        let subsumed = segments
            .last()
            .is_some_and(|prev| prev.end == current.end && prev.start < current.start);
        if !subsumed {
            segments.push(current);
        }
    }

    Ok(segments)
}

/// Length of the longest prefix of `query` that occurs in the reference.
///
/// Child hops go by first byte only; comparison happens byte by byte inside
/// each edge label so a mismatch in the middle of an edge still credits the
/// matched portion.
fn match_length(tree: &SuffixTree, query: &[u8]) -> Result<usize, TreeError> {
    let mut matched = 0;
    let mut pos = tree.root();

    while matched < query.len() {
        let Some(next) = tree.child(&pos, &query[matched..=matched])? else {
            break;
        };
        for &byte in tree.label(&next)? {
            if matched < query.len() && query[matched] == byte {
                matched += 1;
            } else {
                return Ok(matched);
            }
        }
        pos = next;
    }

    Ok(matched)
}
