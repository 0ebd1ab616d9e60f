//! Request and response bodies.

use serde::de::Error as _;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::games::tictactoe::{Board, Game, GameStatus};

/// Body of POST and PUT requests.
///
/// A missing or null `board` decodes as an empty string and fails board
/// validation rather than body decoding. Only JSON objects are accepted.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BoardRequest {
    /// Board as a nine character string over `X`, `O` and `-`.
    #[serde(default)]
    pub board: Option<String>,
}

impl BoardRequest {
    /// Decodes a request body, rejecting anything but a JSON object.
    ///
    /// # Errors
    ///
    /// Returns the decoding error for malformed JSON, non-object bodies and
    /// a `board` that is not a string.
    pub fn from_json(body: &[u8]) -> Result<Self, serde_json::Error> {
        match serde_json::from_slice::<Value>(body)? {
            Value::Object(fields) => serde_json::from_value(Value::Object(fields)),
            other => Err(serde_json::Error::custom(format!(
                "expected a JSON object, found {other}"
            ))),
        }
    }

    /// The submitted board string, empty if absent.
    pub fn board(&self) -> &str {
        self.board.as_deref().unwrap_or_default()
    }
}

/// Body of a successful POST.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewGameResponse {
    /// Where the new game lives.
    pub location: String,
}

/// Public view of a game. The computer's mark is not exposed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameResponse {
    /// Game id.
    pub id: String,
    /// Current board.
    pub board: Board,
    /// Current status.
    pub status: GameStatus,
}

impl From<Game> for GameResponse {
    fn from(game: Game) -> Self {
        Self {
            id: game.id().clone(),
            board: *game.board(),
            status: *game.status(),
        }
    }
}
