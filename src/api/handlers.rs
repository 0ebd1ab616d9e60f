//! Game handlers for the REST API.

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use tracing::{instrument, warn};

use super::{ApiError, AppState, BoardRequest, GameId, GameResponse, NewGameResponse};

fn parse_body(body: &Bytes) -> Result<BoardRequest, ApiError> {
    BoardRequest::from_json(body).map_err(|e| {
        warn!(error = %e, "Invalid request body");
        ApiError::InvalidRequestBody
    })
}

/// GET /api/v1/games - List all games.
#[instrument(skip(state))]
pub async fn list_games(State(state): State<AppState>) -> Result<Json<Vec<GameResponse>>, ApiError> {
    let games = state.service().list_games().await?;
    Ok(Json(games.into_iter().map(GameResponse::from).collect()))
}

/// POST /api/v1/games - Create a game; the computer replies at once.
#[instrument(skip(state, body))]
pub async fn create_game(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<NewGameResponse>), ApiError> {
    let request = parse_body(&body)?;
    let id = state.service().create_game(request.board()).await?;
    let location = state.location(&id);
    Ok((StatusCode::CREATED, Json(NewGameResponse { location })))
}

/// GET /api/v1/games/{id} - Fetch one game.
#[instrument(skip(state))]
pub async fn get_game(
    State(state): State<AppState>,
    GameId(id): GameId,
) -> Result<Json<GameResponse>, ApiError> {
    let game = state.service().get_game(&id).await?;
    Ok(Json(game.into()))
}

/// PUT /api/v1/games/{id} - Apply the human's move and the computer's reply.
#[instrument(skip(state, body))]
pub async fn update_game(
    State(state): State<AppState>,
    GameId(id): GameId,
    body: Bytes,
) -> Result<Json<GameResponse>, ApiError> {
    let request = parse_body(&body)?;
    let game = state.service().apply_move(&id, request.board()).await?;
    Ok(Json(game.into()))
}

/// DELETE /api/v1/games/{id} - Delete one game.
#[instrument(skip(state))]
pub async fn delete_game(
    State(state): State<AppState>,
    GameId(id): GameId,
) -> Result<impl IntoResponse, ApiError> {
    state.service().delete_game(&id).await?;
    Ok((StatusCode::OK, [(header::CONTENT_TYPE, "application/json")]))
}

/// Fallback for paths outside the API.
pub async fn not_found() -> ApiError {
    ApiError::NotFound
}
