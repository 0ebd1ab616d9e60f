//! Game store errors.

use derive_more::{Display, Error};
use tracing::instrument;

/// Failure of a [`GameStore`](crate::GameStore) operation, tagged with the
/// source location that raised it.
///
/// Both the SQLite repository and the in-memory store report through this
/// type. The message is logged but never sent to HTTP clients.
#[derive(Debug, Clone, Display, Error)]
#[display("Game store error: {} at {}:{}", message, file, line)]
pub struct DbError {
    /// What went wrong.
    pub message: String,
    /// Line that raised the error.
    pub line: u32,
    /// File that raised the error.
    pub file: &'static str,
}

impl DbError {
    /// Creates an error located at the caller.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

impl From<diesel::result::Error> for DbError {
    #[track_caller]
    fn from(err: diesel::result::Error) -> Self {
        Self::new(format!("Query on games table failed: {}", err))
    }
}

impl From<diesel::ConnectionError> for DbError {
    #[track_caller]
    fn from(err: diesel::ConnectionError) -> Self {
        Self::new(format!("Unable to open games database: {}", err))
    }
}

impl From<tokio::task::JoinError> for DbError {
    #[track_caller]
    fn from(err: tokio::task::JoinError) -> Self {
        Self::new(format!("Blocking store task failed: {}", err))
    }
}
