//! Path extractor for game ids.

use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;
use tracing::debug;

use super::ApiError;

/// A game id taken from the request path.
///
/// Only ids shaped like a version-4 UUID are accepted (hyphens optional);
/// anything else is answered with 404 as if no route matched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameId(pub String);

impl<S> FromRequestParts<S> for GameId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::NotFound)?;

        if is_game_id(&id) {
            Ok(GameId(id))
        } else {
            debug!(id = %id, "Path segment is not a game id");
            Err(ApiError::NotFound)
        }
    }
}

/// Checks for 8-4-4-4-12 hex groups with optional hyphens between them,
/// version nibble `4` and variant nibble one of `8`, `9`, `a`, `b`.
pub fn is_game_id(s: &str) -> bool {
    const GROUPS: [usize; 5] = [8, 4, 4, 4, 12];

    let mut rest = s;
    let mut hex = Vec::with_capacity(32);
    for (i, len) in GROUPS.into_iter().enumerate() {
        if i > 0 {
            rest = rest.strip_prefix('-').unwrap_or(rest);
        }
        let Some(group) = rest.get(..len) else {
            return false;
        };
        if !group.bytes().all(|b| b.is_ascii_hexdigit()) {
            return false;
        }
        hex.extend_from_slice(group.as_bytes());
        rest = &rest[len..];
    }

    rest.is_empty() && hex[12] == b'4' && matches!(hex[16], b'8' | b'9' | b'a' | b'A' | b'b' | b'B')
}
