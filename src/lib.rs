//! Tic-tac-toe REST API library.
//!
//! A client plays tic-tac-toe against a computer that picks uniformly random
//! moves; games are persisted in SQLite.
//!
//! # Architecture
//!
//! - **Board engine**: pure board validation, move diffing, status and the
//!   computer's random reply
//! - **Service**: create/get/list/move/delete orchestration around a store
//! - **Store**: the [`GameStore`] capability, in memory or SQLite-backed
//! - **API**: axum routes under `/api/v1/games`
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use tictactoe_api::{AppState, GameService, MemoryGameStore, build_router};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let service = GameService::new(Arc::new(MemoryGameStore::new()));
//! let app = build_router(AppState::new(service, "http://localhost:8080"));
//! let listener = tokio::net::TcpListener::bind("127.0.0.1:8080").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod api;
mod config;
mod db;
mod games;
mod service;
mod store;

// Crate-level exports - HTTP API
pub use api::{
    ApiError, AppState, BoardRequest, ErrorBody, GameId, GameResponse, MSG_INTERNAL_SERVER_ERROR,
    MSG_RESOURCE_NOT_FOUND, NewGameResponse, build_router, is_game_id,
};

// Crate-level exports - Configuration
pub use config::{ConfigError, ServerConfig};

// Crate-level exports - Persistence
pub use db::{DbError, GameRepository, GameRow, MIGRATIONS, NewGameRow};
pub use store::{GameStore, MemoryGameStore};

// Crate-level exports - Service
pub use service::{GameError, GameService};

// Crate-level exports - Board engine
pub use games::tictactoe::{
    BLANK, Board, BoardError, Cell, FirstBlankSelector, Game, GameStatus, Mark, MoveDiff,
    MoveSelector, NewBoard, Position, RandomMoveSelector, SeededMoveSelector, compute_status,
    diff_moves, pick_random_move, validate_board, validate_new_board,
};
