//! Complete, conflict-free pairing check for matching rounds.
//!
//! Left and right are disjoint index sets `0..L` and `0..R`. A candidate set
//! of pairs is valid when every index on each side appears in exactly one
//! pair, which forces `L == R`. The check is a single pass over the pairs.

use std::fmt;

use thiserror::Error;

use super::spec::MatchPair;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Side::Left => "left",
            Side::Right => "right",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatchingError {
    #[error("left has {left} items but right has {right}")]
    UnequalSides { left: usize, right: usize },
    #[error("{side} index {index} is out of range for {len} items")]
    OutOfRange { side: Side, index: usize, len: usize },
    #[error("{side} index {index} is matched more than once")]
    MatchedMoreThanOnce { side: Side, index: usize },
    #[error("left item {0} is unmatched")]
    LeftUnmatched(usize),
    #[error("right item {0} is unmatched")]
    RightUnmatched(usize),
}

/// Check that `pairs` is a perfect matching between `left_len` and
/// `right_len` items.
///
/// Reports, in this order: unequal sides, then the first pair (in list order)
/// with an out-of-range or already-used index, then the lowest unmatched left
/// index, then the lowest unmatched right index.
pub fn validate_matching(
    left_len: usize,
    right_len: usize,
    pairs: &[MatchPair],
) -> Result<(), MatchingError> {
    if left_len != right_len {
        return Err(MatchingError::UnequalSides {
            left: left_len,
            right: right_len,
        });
    }

    let mut left_used = vec![false; left_len];
    let mut right_used = vec![false; right_len];

    for pair in pairs {
        claim(&mut left_used, Side::Left, pair.left)?;
        claim(&mut right_used, Side::Right, pair.right)?;
    }

    if let Some(index) = left_used.iter().position(|used| !used) {
        return Err(MatchingError::LeftUnmatched(index));
    }
    if let Some(index) = right_used.iter().position(|used| !used) {
        return Err(MatchingError::RightUnmatched(index));
    }
    Ok(())
}

fn claim(used: &mut [bool], side: Side, index: usize) -> Result<(), MatchingError> {
    let len = used.len();
    match used.get_mut(index) {
        None => Err(MatchingError::OutOfRange { side, index, len }),
        Some(true) => Err(MatchingError::MatchedMoreThanOnce { side, index }),
        Some(slot) => {
            *slot = true;
            Ok(())
        }
    }
}
