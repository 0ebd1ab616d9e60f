//! REST transport: routes, handlers, extractors and the error envelope.

mod error;
mod extract;
mod handlers;
mod routes;
mod types;

pub use error::{ApiError, ErrorBody, MSG_INTERNAL_SERVER_ERROR, MSG_RESOURCE_NOT_FOUND};
pub use extract::{GameId, is_game_id};
pub use routes::build_router;
pub use types::{BoardRequest, GameResponse, NewGameResponse};

use std::sync::Arc;

use tracing::instrument;

use crate::service::GameService;

/// Shared state handed to every handler.
#[derive(Debug, Clone)]
pub struct AppState {
    service: GameService,
    host_address: Arc<str>,
}

impl AppState {
    /// Creates the state. `host_address` prefixes the `location` of new games.
    #[instrument(skip(service))]
    pub fn new(service: GameService, host_address: &str) -> Self {
        Self {
            service,
            host_address: Arc::from(host_address.trim_end_matches('/')),
        }
    }

    /// The game service.
    pub fn service(&self) -> &GameService {
        &self.service
    }

    /// Location of the game with `id`.
    pub fn location(&self, id: &str) -> String {
        format!("{}/api/v1/games/{}", self.host_address, id)
    }
}
