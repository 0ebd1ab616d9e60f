//! Computer opponent: places its mark on a random blank cell.

use std::fmt::Debug;

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use tracing::{debug, instrument};

use super::{Board, Cell, Mark, Position};

/// Places `mark` on a blank cell of `board` chosen uniformly by `rng`.
///
/// A board with no blank cell is returned unchanged.
#[instrument(skip(board, rng), fields(board = %board))]
pub fn pick_random_move<R: Rng + ?Sized>(board: &Board, mark: Mark, rng: &mut R) -> Board {
    let mut next = *board;
    if let Some(pos) = Position::blanks(board).choose(rng) {
        debug!(%pos, %mark, "Computer move chosen");
        next.set(*pos, Cell::Occupied(mark));
    }
    next
}

/// Chooses the computer's reply on a board.
///
/// The game service holds one of these so callers can swap the random
/// source for a deterministic one.
pub trait MoveSelector: Debug + Send + Sync {
    /// Returns `board` with `mark` placed on one blank cell, or unchanged if
    /// no blank cell remains.
    fn select(&self, board: &Board, mark: Mark) -> Board;
}

/// Uniform random selection with a fresh entropy-seeded source per call.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomMoveSelector;

impl MoveSelector for RandomMoveSelector {
    fn select(&self, board: &Board, mark: Mark) -> Board {
        let mut rng = StdRng::from_entropy();
        pick_random_move(board, mark, &mut rng)
    }
}

/// Random selection from a fixed seed. Every call replays the same sequence,
/// so the same board always gets the same reply.
#[derive(Debug, Clone, Copy)]
pub struct SeededMoveSelector {
    seed: u64,
}

impl SeededMoveSelector {
    /// Creates a selector that seeds each call with `seed`.
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl MoveSelector for SeededMoveSelector {
    fn select(&self, board: &Board, mark: Mark) -> Board {
        let mut rng = StdRng::seed_from_u64(self.seed);
        pick_random_move(board, mark, &mut rng)
    }
}

/// Always plays the lowest-indexed blank cell.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstBlankSelector;

impl MoveSelector for FirstBlankSelector {
    fn select(&self, board: &Board, mark: Mark) -> Board {
        let mut next = *board;
        if let Some(pos) = Position::blanks(board).first() {
            next.set(*pos, Cell::Occupied(mark));
        }
        next
    }
}
