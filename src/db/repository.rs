//! SQLite-backed game repository.

use std::time::Duration;

use async_trait::async_trait;
use diesel::connection::SimpleConnection;
use diesel::dsl::sql;
use diesel::prelude::*;
use diesel::sql_types::BigInt;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::{debug, info, instrument, warn};

use crate::db::{DbError, GameRow, NewGameRow, schema};
use crate::games::tictactoe::{Board, Game, Mark};
use crate::store::GameStore;

/// Schema migrations compiled into the binary.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Database repository for game records.
///
/// Opens a fresh connection per operation; the database path must name a
/// file so that every connection sees the same data.
#[derive(Debug, Clone)]
pub struct GameRepository {
    db_path: String,
}

impl GameRepository {
    /// Creates a new repository for the database at the given path.
    ///
    /// No connection is made; call [`GameRepository::run_migrations`] or use
    /// [`GameRepository::connect`] to verify the database.
    #[instrument(skip(db_path), fields(db_path = %db_path))]
    pub fn new(db_path: String) -> Self {
        info!(path = %db_path, "Creating GameRepository");
        Self { db_path }
    }

    /// Connects to the database, retrying on failure, and applies pending
    /// migrations.
    ///
    /// # Errors
    ///
    /// Returns the last [`DbError`] if every attempt fails.
    #[instrument(skip(db_path), fields(db_path = %db_path))]
    pub async fn connect(
        db_path: String,
        attempts: u32,
        retry_delay: Duration,
    ) -> Result<Self, DbError> {
        let repo = Self::new(db_path);
        let attempts = attempts.max(1);

        for attempt in 1..=attempts {
            let candidate = repo.clone();
            match tokio::task::spawn_blocking(move || candidate.run_migrations()).await? {
                Ok(()) => {
                    info!(attempt, "Connected to database");
                    return Ok(repo);
                }
                Err(e) if attempt < attempts => {
                    warn!(attempt, error = %e, "Failed connecting to database");
                    info!(delay_secs = retry_delay.as_secs(), "Retrying");
                    tokio::time::sleep(retry_delay).await;
                }
                Err(e) => return Err(e),
            }
        }

        Err(DbError::new("Unable to connect to database"))
    }

    /// Applies all pending schema migrations.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the connection or a migration fails.
    #[instrument(skip(self))]
    pub fn run_migrations(&self) -> Result<(), DbError> {
        let mut conn = self.connection()?;
        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|e| DbError::new(format!("Migration failed: {}", e)))?;
        info!(count = applied.len(), "Migrations applied");
        Ok(())
    }

    /// Establishes a database connection.
    #[instrument(skip(self))]
    fn connection(&self) -> Result<SqliteConnection, DbError> {
        debug!(path = %self.db_path, "Establishing connection");
        let mut conn = SqliteConnection::establish(&self.db_path)
            .map_err(|e| DbError::new(format!("Failed to connect to '{}': {}", self.db_path, e)))?;
        conn.batch_execute("PRAGMA busy_timeout = 5000;")?;
        Ok(conn)
    }

    /// Lists all games, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs or a row fails to parse.
    #[instrument(skip(self))]
    pub fn list_games(&self) -> Result<Vec<Game>, DbError> {
        debug!("Listing all games");
        let mut conn = self.connection()?;

        let rows = schema::games::table
            .order(schema::games::created_at.asc())
            // created_at has one second resolution; rowid keeps insertion order
            .then_order_by(sql::<BigInt>("rowid").asc())
            .select(GameRow::as_select())
            .load(&mut conn)?;

        let games = rows
            .into_iter()
            .map(GameRow::into_game)
            .collect::<Result<Vec<_>, _>>()?;

        info!(count = games.len(), "Games loaded");
        Ok(games)
    }

    /// Gets a game by id. Returns `None` if not found.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs or the row fails to parse.
    #[instrument(skip(self))]
    pub fn get_game(&self, id: &str) -> Result<Option<Game>, DbError> {
        debug!(id, "Looking up game");
        let mut conn = self.connection()?;

        let row = schema::games::table
            .find(id)
            .select(GameRow::as_select())
            .first(&mut conn)
            .optional()?;

        match row {
            Some(row) => Ok(Some(row.into_game()?)),
            None => {
                debug!(id, "Game not found");
                Ok(None)
            }
        }
    }

    /// Inserts a running game and returns its generated id.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self, board), fields(board = %board))]
    pub fn insert_game(&self, computer_mark: Mark, board: &Board) -> Result<String, DbError> {
        let mut conn = self.connection()?;
        let row = NewGameRow::running(uuid::Uuid::new_v4().to_string(), computer_mark, board);

        let id = diesel::insert_into(schema::games::table)
            .values(&row)
            .returning(schema::games::id)
            .get_result::<String>(&mut conn)?;

        info!(id = %id, %computer_mark, "Game inserted");
        Ok(id)
    }

    /// Writes the board and status of `game`. Returns the number of rows
    /// affected, zero if the game no longer exists.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self, game), fields(id = %game.id(), status = %game.status()))]
    pub fn update_game(&self, game: &Game) -> Result<usize, DbError> {
        let mut conn = self.connection()?;

        let rows = diesel::update(schema::games::table.find(game.id().as_str()))
            .set((
                schema::games::board.eq(game.board().to_string()),
                schema::games::status.eq(game.status().to_string()),
            ))
            .execute(&mut conn)?;

        debug!(rows, "Game updated");
        Ok(rows)
    }

    /// Deletes a game. Returns the number of rows affected.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn delete_game(&self, id: &str) -> Result<usize, DbError> {
        let mut conn = self.connection()?;

        let rows = diesel::delete(schema::games::table.find(id)).execute(&mut conn)?;

        debug!(rows, "Game deleted");
        Ok(rows)
    }
}

#[async_trait]
impl GameStore for GameRepository {
    async fn list_games(&self) -> Result<Vec<Game>, DbError> {
        let repo = self.clone();
        tokio::task::spawn_blocking(move || repo.list_games()).await?
    }

    async fn get_game(&self, id: &str) -> Result<Option<Game>, DbError> {
        let repo = self.clone();
        let id = id.to_string();
        tokio::task::spawn_blocking(move || repo.get_game(&id)).await?
    }

    async fn insert_game(&self, computer_mark: Mark, board: Board) -> Result<String, DbError> {
        let repo = self.clone();
        tokio::task::spawn_blocking(move || repo.insert_game(computer_mark, &board)).await?
    }

    async fn update_game(&self, game: &Game) -> Result<usize, DbError> {
        let repo = self.clone();
        let game = game.clone();
        tokio::task::spawn_blocking(move || repo.update_game(&game)).await?
    }

    async fn delete_game(&self, id: &str) -> Result<usize, DbError> {
        let repo = self.clone();
        let id = id.to_string();
        tokio::task::spawn_blocking(move || repo.delete_game(&id)).await?
    }
}
