//! In-process game store.

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use tracing::{debug, info, instrument};

use super::GameStore;
use crate::db::DbError;
use crate::games::tictactoe::{Board, Game, GameStatus, Mark};

/// Game store held in memory, in insertion order.
///
/// Clones share the same games.
#[derive(Debug, Clone, Default)]
pub struct MemoryGameStore {
    games: Arc<Mutex<Vec<Game>>>,
}

impl MemoryGameStore {
    /// Creates an empty store.
    #[instrument]
    pub fn new() -> Self {
        info!("Creating in-memory game store");
        Self::default()
    }

    /// Stores `game` as is, replacing any game with the same id.
    pub fn put(&self, game: Game) -> Result<(), DbError> {
        let mut games = self.lock()?;
        games.retain(|g| g.id() != game.id());
        games.push(game);
        Ok(())
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<Game>>, DbError> {
        self.games
            .lock()
            .map_err(|_| DbError::new("In-memory store lock poisoned"))
    }
}

#[async_trait]
impl GameStore for MemoryGameStore {
    #[instrument(skip(self))]
    async fn list_games(&self) -> Result<Vec<Game>, DbError> {
        let games = self.lock()?.clone();
        debug!(count = games.len(), "Games listed");
        Ok(games)
    }

    #[instrument(skip(self))]
    async fn get_game(&self, id: &str) -> Result<Option<Game>, DbError> {
        Ok(self.lock()?.iter().find(|g| g.id() == id).cloned())
    }

    #[instrument(skip(self, board), fields(board = %board))]
    async fn insert_game(&self, computer_mark: Mark, board: Board) -> Result<String, DbError> {
        let id = uuid::Uuid::new_v4().to_string();
        self.lock()?
            .push(Game::new(id.clone(), board, GameStatus::Running, computer_mark));
        info!(id = %id, "Game inserted");
        Ok(id)
    }

    #[instrument(skip(self, game), fields(id = %game.id()))]
    async fn update_game(&self, game: &Game) -> Result<usize, DbError> {
        let mut games = self.lock()?;
        match games.iter_mut().find(|g| g.id() == game.id()) {
            Some(stored) => {
                *stored = stored.advance(*game.board(), *game.status());
                Ok(1)
            }
            None => Ok(0),
        }
    }

    #[instrument(skip(self))]
    async fn delete_game(&self, id: &str) -> Result<usize, DbError> {
        let mut games = self.lock()?;
        let before = games.len();
        games.retain(|g| g.id() != id);
        Ok(before - games.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_insert_then_get() {
        let store = MemoryGameStore::new();
        let board: Board = "X--------".parse().unwrap();
        let id = store.insert_game(Mark::O, board).await.unwrap();

        let game = store.get_game(&id).await.unwrap().unwrap();
        assert_eq!(*game.board(), board);
        assert_eq!(*game.status(), GameStatus::Running);
        assert_eq!(*game.computer_mark(), Mark::O);
    }

    #[tokio::test]
    async fn test_update_keeps_computer_mark() {
        let store = MemoryGameStore::new();
        let id = store.insert_game(Mark::X, Board::new()).await.unwrap();
        let game = store.get_game(&id).await.unwrap().unwrap();

        // A caller cannot change the computer mark through an update.
        let tampered = Game::new(id.clone(), "O--------".parse().unwrap(), GameStatus::Running, Mark::O);
        assert_eq!(store.update_game(&tampered).await.unwrap(), 1);

        let stored = store.get_game(&id).await.unwrap().unwrap();
        assert_eq!(*stored.computer_mark(), *game.computer_mark());
        assert_eq!(stored.board().to_string(), "O--------");
    }

    #[tokio::test]
    async fn test_update_and_delete_missing_affect_nothing() {
        let store = MemoryGameStore::new();
        let ghost = Game::new("nope".to_string(), Board::new(), GameStatus::Running, Mark::X);
        assert_eq!(store.update_game(&ghost).await.unwrap(), 0);
        assert_eq!(store.delete_game("nope").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_list_in_insertion_order() {
        let store = MemoryGameStore::new();
        let a = store.insert_game(Mark::X, Board::new()).await.unwrap();
        let b = store.insert_game(Mark::O, Board::new()).await.unwrap();

        let ids: Vec<String> = store
            .list_games()
            .await
            .unwrap()
            .into_iter()
            .map(|g| g.id().clone())
            .collect();
        assert_eq!(ids, vec![a, b]);
    }
}
