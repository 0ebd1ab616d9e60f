//! Database models and their mapping to domain types.

use chrono::NaiveDateTime;
use derive_getters::Getters;
use derive_new::new;
use diesel::prelude::*;
use tracing::instrument;

use crate::db::{DbError, schema};
use crate::games::tictactoe::{Board, Game, GameStatus, Mark};

/// Game row as stored in the `games` table.
#[derive(Debug, Clone, Queryable, Selectable, Getters)]
#[diesel(table_name = schema::games)]
pub struct GameRow {
    id: String,
    computer_mark: String,
    board: String,
    status: String,
    created_at: NaiveDateTime,
}

impl GameRow {
    /// Parses the stored strings into a domain [`Game`].
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if any column holds a value the domain types reject.
    #[instrument(skip(self), fields(id = %self.id))]
    pub fn into_game(self) -> Result<Game, DbError> {
        let board: Board = self
            .board
            .parse()
            .map_err(|e| DbError::new(format!("Invalid board '{}': {}", self.board, e)))?;
        let status: GameStatus = self
            .status
            .parse()
            .map_err(|_| DbError::new(format!("Invalid status: '{}'", self.status)))?;
        let computer_mark: Mark = self
            .computer_mark
            .parse()
            .map_err(|_| DbError::new(format!("Invalid computer mark: '{}'", self.computer_mark)))?;

        Ok(Game::new(self.id, board, status, computer_mark))
    }
}

/// Insertable game row for new games.
#[derive(Debug, Clone, Insertable, new, Getters)]
#[diesel(table_name = schema::games)]
pub struct NewGameRow {
    id: String,
    computer_mark: String,
    board: String,
    status: String,
}

impl NewGameRow {
    /// Builds the row for a freshly created, running game.
    #[instrument(skip(board), fields(board = %board))]
    pub fn running(id: String, computer_mark: Mark, board: &Board) -> Self {
        Self::new(
            id,
            computer_mark.to_string(),
            board.to_string(),
            GameStatus::Running.to_string(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(board: &str, status: &str, mark: &str) -> GameRow {
        GameRow {
            id: "g1".to_string(),
            computer_mark: mark.to_string(),
            board: board.to_string(),
            status: status.to_string(),
            created_at: NaiveDateTime::default(),
        }
    }

    #[test]
    fn test_row_into_game() {
        let game = row("X---O----", "RUNNING", "O").into_game().unwrap();
        assert_eq!(game.id(), "g1");
        assert_eq!(*game.status(), GameStatus::Running);
        assert_eq!(*game.computer_mark(), Mark::O);
        assert_eq!(game.board().to_string(), "X---O----");
    }

    #[test]
    fn test_row_with_bad_status_rejected() {
        assert!(row("---------", "WON", "X").into_game().is_err());
    }

    #[test]
    fn test_row_with_bad_mark_rejected() {
        assert!(row("---------", "RUNNING", "Z").into_game().is_err());
    }

    #[test]
    fn test_new_row_strings() {
        let board: Board = "----X----".parse().unwrap();
        let new = NewGameRow::running("g2".to_string(), Mark::X, &board);
        assert_eq!(new.computer_mark(), "X");
        assert_eq!(new.board(), "----X----");
        assert_eq!(new.status(), "RUNNING");
    }
}
