//! Win detection logic for tic-tac-toe.

use super::super::{Board, Cell, Mark, Position};
use tracing::instrument;

/// The eight winning lines in scan order: rows top to bottom, columns left
/// to right, then the 0-4-8 and 2-4-6 diagonals.
pub const LINES: [[Position; 3]; 8] = [
    // Rows
    [Position::TopLeft, Position::TopCenter, Position::TopRight],
    [Position::MiddleLeft, Position::Center, Position::MiddleRight],
    [Position::BottomLeft, Position::BottomCenter, Position::BottomRight],
    // Columns
    [Position::TopLeft, Position::MiddleLeft, Position::BottomLeft],
    [Position::TopCenter, Position::Center, Position::BottomCenter],
    [Position::TopRight, Position::MiddleRight, Position::BottomRight],
    // Diagonals
    [Position::TopLeft, Position::Center, Position::BottomRight],
    [Position::TopRight, Position::Center, Position::BottomLeft],
];

/// Checks if there is a winner on the board.
///
/// Returns the mark of the first line in [`LINES`] holding three identical
/// marks, `None` otherwise.
#[instrument(skip(board), fields(board = %board))]
pub fn check_winner(board: &Board) -> Option<Mark> {
    LINES.iter().find_map(|[a, b, c]| match board.get(*a) {
        Cell::Occupied(mark) if board.get(*b) == board.get(*a) && board.get(*c) == board.get(*a) => {
            Some(mark)
        }
        _ => None,
    })
}
