//! Validation of client-supplied boards.

use super::{Board, BoardError, Cell, Mark};
use tracing::{debug, instrument, warn};

/// A validated opening board together with the mark assigned to the computer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_getters::Getters)]
pub struct NewBoard {
    board: Board,
    computer_mark: Mark,
}

/// Validates the board a client opens a game with.
///
/// The board must parse and hold at most one mark. The computer plays the
/// mark that is not on the board, or X when the board is blank.
///
/// # Errors
///
/// Returns [`BoardError`] on a length mismatch, an illegal character, or more
/// than one mark.
#[instrument]
pub fn validate_new_board(board: &str) -> Result<NewBoard, BoardError> {
    let parsed = validate_board(board)?;

    let marks: Vec<Mark> = parsed
        .cells()
        .iter()
        .filter_map(|cell| match cell {
            Cell::Occupied(mark) => Some(*mark),
            Cell::Empty => None,
        })
        .collect();

    let computer_mark = match marks.as_slice() {
        [] => Mark::X,
        [human] => human.opponent(),
        _ => {
            warn!(marks = marks.len(), "More than one move made on a new board");
            return Err(BoardError::TooManyMarks { found: marks.len() });
        }
    };

    debug!(%computer_mark, "New board accepted");
    Ok(NewBoard {
        board: parsed,
        computer_mark,
    })
}

/// Validates a board submitted with a move.
///
/// Only the length and character set are checked; any number of marks is
/// allowed.
///
/// # Errors
///
/// Returns [`BoardError`] on a length mismatch or an illegal character.
#[instrument]
pub fn validate_board(board: &str) -> Result<Board, BoardError> {
    board.parse::<Board>().inspect_err(|e| {
        warn!(error = %e, "Invalid board");
    })
}
