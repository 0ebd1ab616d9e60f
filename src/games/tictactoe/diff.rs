//! Comparison of a submitted board against the stored one.

use super::{Board, Cell, Mark, Position};
use tracing::{debug, instrument};

/// Outcome of comparing two boards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDiff {
    /// The boards are identical.
    Unchanged,
    /// Exactly one cell changed, and it now holds the expected mark.
    OneValid(Position),
    /// A cell changed to something other than the expected mark, or more
    /// than one cell changed.
    Invalid,
}

/// Diffs `current` against `previous`, expecting at most one new `expected` mark.
///
/// Every differing cell must now hold `expected`. A cell that switched from
/// the other mark to `expected` counts as a move like any other.
#[instrument(skip(current, previous), fields(current = %current, previous = %previous))]
pub fn diff_moves(current: &Board, previous: &Board, expected: Mark) -> MoveDiff {
    let mut changed = None;

    for pos in Position::ALL {
        if current.get(pos) == previous.get(pos) {
            continue;
        }
        if current.get(pos) != Cell::Occupied(expected) || changed.is_some() {
            debug!(%pos, "Board does not follow from the stored state");
            return MoveDiff::Invalid;
        }
        changed = Some(pos);
    }

    match changed {
        Some(pos) => MoveDiff::OneValid(pos),
        None => MoveDiff::Unchanged,
    }
}
