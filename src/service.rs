//! Game service: the rules engine wrapped around a game store.

use std::sync::Arc;

use derive_more::{Display, Error, From};
use tracing::{debug, error, info, instrument, warn};

use crate::db::DbError;
use crate::games::tictactoe::{
    BoardError, Game, MoveDiff, MoveSelector, RandomMoveSelector, compute_status, diff_moves,
    validate_board, validate_new_board,
};
use crate::store::GameStore;

/// Why a game operation was rejected.
#[derive(Debug, Clone, Display, Error, From)]
pub enum GameError {
    /// The opening board failed validation.
    #[display("invalid new board: {_0}")]
    InvalidNewBoard(BoardError),
    /// A submitted board failed validation.
    #[display("invalid board: {_0}")]
    InvalidBoard(BoardError),
    /// No game with this id exists, or it vanished mid-update.
    #[display("game {id} not found")]
    NotFound {
        /// Requested game id.
        id: String,
    },
    /// The game has already finished.
    #[display("game {id} already over")]
    GameOver {
        /// Requested game id.
        id: String,
    },
    /// The submitted board is identical to the stored one.
    #[display("no move made")]
    NoMoveMade,
    /// The submitted board does not follow from the stored one by a single
    /// move of the human's mark.
    #[display("game state mismatch")]
    StateMismatch,
    /// The store failed.
    #[display("store failure: {_0}")]
    #[from]
    Store(DbError),
}

impl GameError {
    fn not_found(id: &str) -> Self {
        Self::NotFound { id: id.to_string() }
    }
}

/// Orchestrates board engine calls around persisted games.
#[derive(Debug, Clone)]
pub struct GameService {
    store: Arc<dyn GameStore>,
    selector: Arc<dyn MoveSelector>,
}

impl GameService {
    /// Creates a service whose computer plays uniformly random moves.
    #[instrument(skip(store))]
    pub fn new(store: Arc<dyn GameStore>) -> Self {
        Self::with_selector(store, Arc::new(RandomMoveSelector))
    }

    /// Creates a service with an explicit move selector.
    #[instrument(skip(store, selector))]
    pub fn with_selector(store: Arc<dyn GameStore>, selector: Arc<dyn MoveSelector>) -> Self {
        info!(?selector, "Creating GameService");
        Self { store, selector }
    }

    /// Starts a game from a client-supplied opening board.
    ///
    /// The computer takes the mark not on the board and replies at once.
    /// Returns the id of the new game.
    ///
    /// # Errors
    ///
    /// [`GameError::InvalidNewBoard`] if the board holds more than one mark or
    /// is malformed, [`GameError::Store`] if the insert fails.
    #[instrument(skip(self))]
    pub async fn create_game(&self, board: &str) -> Result<String, GameError> {
        let opening = validate_new_board(board).map_err(GameError::InvalidNewBoard)?;
        let computer_mark = *opening.computer_mark();

        let board = self.selector.select(opening.board(), computer_mark);
        let id = self
            .store
            .insert_game(computer_mark, board)
            .await
            .inspect_err(|e| error!(error = %e, "Game creation failed"))?;

        info!(id = %id, %computer_mark, %board, "Game created");
        Ok(id)
    }

    /// Fetches one game.
    ///
    /// # Errors
    ///
    /// [`GameError::NotFound`] if there is no such game.
    #[instrument(skip(self))]
    pub async fn get_game(&self, id: &str) -> Result<Game, GameError> {
        self.store
            .get_game(id)
            .await
            .inspect_err(|e| error!(error = %e, "Unable to get game"))?
            .ok_or_else(|| {
                warn!(id, "Game not found");
                GameError::not_found(id)
            })
    }

    /// Lists every game.
    ///
    /// # Errors
    ///
    /// [`GameError::Store`] if the store fails.
    #[instrument(skip(self))]
    pub async fn list_games(&self) -> Result<Vec<Game>, GameError> {
        let games = self
            .store
            .list_games()
            .await
            .inspect_err(|e| error!(error = %e, "Unable to list games"))?;
        debug!(count = games.len(), "Games listed");
        Ok(games)
    }

    /// Applies the human's move and, if the game goes on, the computer's reply.
    ///
    /// Returns the game as persisted.
    ///
    /// # Errors
    ///
    /// - [`GameError::InvalidBoard`] if the submitted board is malformed.
    /// - [`GameError::NotFound`] if there is no such game, or it was deleted
    ///   before the update landed.
    /// - [`GameError::GameOver`] if the game has already finished.
    /// - [`GameError::NoMoveMade`] if the board is unchanged.
    /// - [`GameError::StateMismatch`] if the board is not one human move away
    ///   from the stored board.
    #[instrument(skip(self))]
    pub async fn apply_move(&self, id: &str, board: &str) -> Result<Game, GameError> {
        let submitted = validate_board(board).map_err(GameError::InvalidBoard)?;
        let stored = self.get_game(id).await?;

        if stored.status().is_terminal() {
            warn!(id, status = %stored.status(), "Game already over");
            return Err(GameError::GameOver { id: id.to_string() });
        }

        match diff_moves(&submitted, stored.board(), stored.human_mark()) {
            MoveDiff::Unchanged => {
                warn!(id, "No move made by opponent");
                return Err(GameError::NoMoveMade);
            }
            MoveDiff::Invalid => {
                warn!(id, stored = %stored.board(), %submitted, "Game state mismatch");
                return Err(GameError::StateMismatch);
            }
            MoveDiff::OneValid(pos) => debug!(id, %pos, "Opponent move accepted"),
        }

        let status = compute_status(&submitted);
        let next = if status.is_terminal() {
            stored.advance(submitted, status)
        } else {
            let board = self.selector.select(&submitted, *stored.computer_mark());
            stored.advance(board, compute_status(&board))
        };

        let rows = self
            .store
            .update_game(&next)
            .await
            .inspect_err(|e| error!(error = %e, "Game update failed"))?;
        if rows == 0 {
            warn!(id, "Game deleted during update");
            return Err(GameError::not_found(id));
        }

        info!(id, board = %next.board(), status = %next.status(), "Game updated");
        Ok(next)
    }

    /// Deletes a game.
    ///
    /// # Errors
    ///
    /// [`GameError::NotFound`] if nothing was deleted.
    #[instrument(skip(self))]
    pub async fn delete_game(&self, id: &str) -> Result<(), GameError> {
        let rows = self
            .store
            .delete_game(id)
            .await
            .inspect_err(|e| error!(error = %e, "Game deletion failed"))?;
        if rows == 0 {
            warn!(id, "Game not found");
            return Err(GameError::not_found(id));
        }
        info!(id, "Game deleted");
        Ok(())
    }
}
