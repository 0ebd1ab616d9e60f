//! API error type mapping to HTTP status codes and the `{"reason": ...}` body.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use derive_more::{Display, Error, From};
use serde::Serialize;

use crate::service::GameError;

/// Reason sent with 404 responses.
pub const MSG_RESOURCE_NOT_FOUND: &str = "Resource not found";
/// Reason sent with 500 responses.
pub const MSG_INTERNAL_SERVER_ERROR: &str = "Internal server error";

/// Error body returned for every failed request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorBody {
    /// Short human-readable reason.
    pub reason: String,
}

/// Application-level error that maps to HTTP responses.
#[derive(Debug, Clone, Display, Error, From)]
pub enum ApiError {
    /// The request body is not a JSON object with a string `board`.
    #[display("invalid request body")]
    #[from(ignore)]
    InvalidRequestBody,
    /// The path does not name a game.
    #[display("resource not found")]
    #[from(ignore)]
    NotFound,
    /// The game service rejected the request.
    #[display("{_0}")]
    Game(GameError),
}

impl ApiError {
    /// Status code and client-facing reason for this error.
    ///
    /// Store failures never leak their detail.
    pub fn status_and_reason(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::InvalidRequestBody => (StatusCode::BAD_REQUEST, "invalid request body"),
            ApiError::NotFound => (StatusCode::NOT_FOUND, MSG_RESOURCE_NOT_FOUND),
            ApiError::Game(e) => match e {
                GameError::InvalidNewBoard(_) => (StatusCode::BAD_REQUEST, "invalid new board"),
                GameError::InvalidBoard(_) => (StatusCode::BAD_REQUEST, "invalid board"),
                GameError::GameOver { .. } => (StatusCode::BAD_REQUEST, "game already over"),
                GameError::NoMoveMade => (StatusCode::BAD_REQUEST, "no move made"),
                GameError::StateMismatch => (StatusCode::BAD_REQUEST, "game state mismatch"),
                GameError::NotFound { .. } => (StatusCode::NOT_FOUND, MSG_RESOURCE_NOT_FOUND),
                GameError::Store(_) => {
                    (StatusCode::INTERNAL_SERVER_ERROR, MSG_INTERNAL_SERVER_ERROR)
                }
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, reason) = self.status_and_reason();
        let body = ErrorBody {
            reason: reason.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
