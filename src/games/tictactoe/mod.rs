//! Tic-tac-toe board engine.
//!
//! Pure functions over a 9-cell board: validation, status, move diffing and
//! the computer's random reply.

mod diff;
mod opponent;
mod position;
pub mod rules;
mod types;
mod validation;

pub use diff::{MoveDiff, diff_moves};
pub use opponent::{
    FirstBlankSelector, MoveSelector, RandomMoveSelector, SeededMoveSelector, pick_random_move,
};
pub use position::Position;
pub use rules::compute_status;
pub use types::{BLANK, Board, BoardError, Cell, Game, GameStatus, Mark};
pub use validation::{NewBoard, validate_board, validate_new_board};
