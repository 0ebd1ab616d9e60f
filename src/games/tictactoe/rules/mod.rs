//! Game rules for tic-tac-toe.
//!
//! Pure functions that evaluate a board. Nothing here touches storage.

pub mod draw;
pub mod win;

pub use draw::is_full;
pub use win::check_winner;

use super::{Board, GameStatus};
use tracing::{debug, instrument};

/// Computes the status of `board`.
///
/// A win takes precedence over a full board: the first winning line in scan
/// order decides the result. A full board without a winner is a draw.
#[instrument(skip(board), fields(board = %board))]
pub fn compute_status(board: &Board) -> GameStatus {
    let status = match check_winner(board) {
        Some(mark) => GameStatus::won_by(mark),
        None if is_full(board) => GameStatus::Draw,
        None => GameStatus::Running,
    };
    debug!(%status, "Status computed");
    status
}
