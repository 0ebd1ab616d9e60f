//! Storage capability used by the game service.

mod memory;

pub use memory::MemoryGameStore;

use std::fmt::Debug;

use async_trait::async_trait;

use crate::db::DbError;
use crate::games::tictactoe::{Board, Game, Mark};

/// Durable game storage keyed by game id.
///
/// Implementations own id generation. Every method is a suspension point;
/// nothing here is transactional across calls.
#[async_trait]
pub trait GameStore: Debug + Send + Sync {
    /// Returns every stored game.
    async fn list_games(&self) -> Result<Vec<Game>, DbError>;

    /// Returns the game with `id`, or `None` if there is none.
    async fn get_game(&self, id: &str) -> Result<Option<Game>, DbError>;

    /// Stores a new running game and returns its id.
    async fn insert_game(&self, computer_mark: Mark, board: Board) -> Result<String, DbError>;

    /// Overwrites the board and status of an existing game. Returns the
    /// number of rows affected.
    async fn update_game(&self, game: &Game) -> Result<usize, DbError>;

    /// Removes a game. Returns the number of rows affected.
    async fn delete_game(&self, id: &str) -> Result<usize, DbError>;
}
