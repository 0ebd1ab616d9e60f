//! Database persistence layer for games.

mod error;
mod models;
mod repository;
mod schema; // Diesel generated schema - internal use only

pub use error::DbError;
pub use models::{GameRow, NewGameRow};
pub use repository::{GameRepository, MIGRATIONS};
