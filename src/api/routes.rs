//! Axum router configuration.
//!
//! All routes are under `/api/v1/`.

use axum::Router;
use axum::body::Body;
use axum::http::Request;
use axum::routing::get;
use tower::ServiceBuilder;
use tracing::info;

use super::AppState;
use super::handlers;

/// Build the complete API router with request logging.
pub fn build_router(state: AppState) -> Router {
    let v1 = Router::new()
        .route(
            "/games",
            get(handlers::list_games).post(handlers::create_game),
        )
        .route(
            "/games/{game_id}",
            get(handlers::get_game)
                .put(handlers::update_game)
                .delete(handlers::delete_game),
        );

    Router::new()
        .nest("/api/v1", v1)
        .fallback(handlers::not_found)
        .layer(ServiceBuilder::new().map_request(|req: Request<Body>| {
            info!(method = %req.method(), uri = %req.uri(), "Incoming HTTP request");
            req
        }))
        .with_state(state)
}
