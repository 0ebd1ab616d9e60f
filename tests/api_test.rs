//! End-to-end tests driving the router in process.

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use tictactoe_api::{
    AppState, Board, DbError, FirstBlankSelector, Game, GameService, GameStatus, GameStore, Mark,
    MemoryGameStore, build_router,
};

const HOST: &str = "http://tictactoe";
const UNKNOWN_ID: &str = "0f8fad5b-d9cb-469f-a165-70867728950e";

fn app_with(store: Arc<dyn GameStore>) -> Router {
    let service = GameService::with_selector(store, Arc::new(FirstBlankSelector));
    build_router(AppState::new(service, HOST))
}

fn app(store: &MemoryGameStore) -> Router {
    app_with(Arc::new(store.clone()))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<&str>) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(body.map(|b| Body::from(b.to_string())).unwrap_or_else(Body::empty))
        .expect("Failed to build request");

    let response = app.clone().oneshot(request).await.expect("Request failed");
    let status = response.status();
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).map(|v| v.as_bytes()),
        Some(&b"application/json"[..]),
        "Content-Type of {status} response",
    );
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("Failed to read body")
        .to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("Body is not JSON")
    };
    (status, value)
}

fn seed(store: &MemoryGameStore, board: &str, status: GameStatus, computer_mark: Mark) -> String {
    let id = uuid::Uuid::new_v4().to_string();
    let board: Board = board.parse().expect("Invalid test board");
    store
        .put(Game::new(id.clone(), board, status, computer_mark))
        .expect("Seed failed");
    id
}

fn id_from_location(location: &Value) -> String {
    let location = location.as_str().expect("location is not a string");
    let prefix = format!("{HOST}/api/v1/games/");
    location
        .strip_prefix(&prefix)
        .expect("Unexpected location prefix")
        .to_string()
}

#[tokio::test]
async fn test_create_from_blank_board() {
    let store = MemoryGameStore::new();
    let app = app(&store);

    let (status, body) = send(&app, Method::POST, "/api/v1/games", Some(r#"{"board":"---------"}"#)).await;
    assert_eq!(status, StatusCode::CREATED);
    let id = id_from_location(&body["location"]);

    let (status, game) = send(&app, Method::GET, &format!("/api/v1/games/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(game, json!({"id": id, "board": "X--------", "status": "RUNNING"}));
}

#[tokio::test]
async fn test_create_with_random_reply() {
    let store = MemoryGameStore::new();
    let app = build_router(AppState::new(GameService::new(Arc::new(store.clone())), ""));

    let (status, body) = send(&app, Method::POST, "/api/v1/games", Some(r#"{"board":"----O----"}"#)).await;
    assert_eq!(status, StatusCode::CREATED);
    let location = body["location"].as_str().expect("location is not a string");
    let id = location.strip_prefix("/api/v1/games/").expect("Unexpected location");

    let game = store.get_game(id).await.expect("Store failed").expect("Missing game");
    assert_eq!(game.board().mark_count(), 2);
    assert_eq!(*game.computer_mark(), Mark::X);
    assert_eq!(*game.status(), GameStatus::Running);
}

#[tokio::test]
async fn test_create_rejections() {
    let store = MemoryGameStore::new();
    let app = app(&store);

    for (body, reason) in [
        ("not json", "invalid request body"),
        (r#"{"board": 9}"#, "invalid request body"),
        ("[]", "invalid request body"),
        (r#"["---------"]"#, "invalid request body"),
        (r#"{"board":"XO-------"}"#, "invalid new board"),
        (r#"{"board":"---"}"#, "invalid new board"),
        ("{}", "invalid new board"),
    ] {
        let (status, value) = send(&app, Method::POST, "/api/v1/games", Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "body {body}");
        assert_eq!(value, json!({"reason": reason}), "body {body}");
    }
    assert!(store.list_games().await.expect("Store failed").is_empty());
}

#[tokio::test]
async fn test_list_games_hides_computer_mark() {
    let store = MemoryGameStore::new();
    let app = app(&store);

    let (status, body) = send(&app, Method::GET, "/api/v1/games", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    let a = seed(&store, "X--------", GameStatus::Running, Mark::X);
    let b = seed(&store, "XXXOO----", GameStatus::XWon, Mark::O);

    let (status, body) = send(&app, Method::GET, "/api/v1/games", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([
            {"id": a, "board": "X--------", "status": "RUNNING"},
            {"id": b, "board": "XXXOO----", "status": "X_WON"},
        ])
    );
}

#[tokio::test]
async fn test_move_and_computer_reply() {
    let store = MemoryGameStore::new();
    let app = app(&store);
    let id = seed(&store, "X--------", GameStatus::Running, Mark::X);

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/api/v1/games/{id}"),
        Some(r#"{"board":"X---O----"}"#),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"id": id, "board": "XX--O----", "status": "RUNNING"}));
}

#[tokio::test]
async fn test_human_win_ends_game_without_reply() {
    let store = MemoryGameStore::new();
    let app = app(&store);
    let id = seed(&store, "XX-OO----", GameStatus::Running, Mark::X);

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/api/v1/games/{id}"),
        Some(r#"{"board":"XX-OOO---"}"#),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"id": id, "board": "XX-OOO---", "status": "O_WON"}));

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/api/v1/games/{id}"),
        Some(r#"{"board":"XXXOOO---"}"#),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"reason": "game already over"}));
}

#[tokio::test]
async fn test_move_rejections() {
    let store = MemoryGameStore::new();
    let app = app(&store);
    let id = seed(&store, "X--------", GameStatus::Running, Mark::X);
    let uri = format!("/api/v1/games/{id}");

    for (body, reason) in [
        ("[", "invalid request body"),
        ("[]", "invalid request body"),
        (r#"["X---O----"]"#, "invalid request body"),
        (r#"{"board":"X-------"}"#, "invalid board"),
        (r#"{"board":"X-------Z"}"#, "invalid board"),
        (r#"{"board":"X--------"}"#, "no move made"),
        (r#"{"board":"XX-------"}"#, "game state mismatch"),
        (r#"{"board":"X---O---O"}"#, "game state mismatch"),
    ] {
        let (status, value) = send(&app, Method::PUT, &uri, Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "body {body}");
        assert_eq!(value, json!({"reason": reason}), "body {body}");
    }

    let stored = store.get_game(&id).await.expect("Store failed").expect("Missing game");
    assert_eq!(stored.board().to_string(), "X--------");
}

#[tokio::test]
async fn test_unknown_and_malformed_ids_are_not_found() {
    let store = MemoryGameStore::new();
    let app = app(&store);

    let unknown = format!("/api/v1/games/{UNKNOWN_ID}");
    let (status, body) = send(&app, Method::GET, &unknown, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"reason": "Resource not found"}));

    let (status, _) = send(&app, Method::PUT, &unknown, Some(r#"{"board":"X--------"}"#)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::GET, "/api/v1/games/dummy_game_id", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::GET, "/elsewhere", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_twice() {
    let store = MemoryGameStore::new();
    let app = app(&store);
    let id = seed(&store, "X--------", GameStatus::Running, Mark::X);
    let uri = format!("/api/v1/games/{id}");

    let (status, body) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::Null);

    let (status, _) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::DELETE, &format!("/api/v1/games/{UNKNOWN_ID}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[derive(Debug)]
struct BrokenStore;

#[async_trait]
impl GameStore for BrokenStore {
    async fn list_games(&self) -> Result<Vec<Game>, DbError> {
        Err(DbError::new("connection refused"))
    }
    async fn get_game(&self, _id: &str) -> Result<Option<Game>, DbError> {
        Err(DbError::new("connection refused"))
    }
    async fn insert_game(&self, _mark: Mark, _board: Board) -> Result<String, DbError> {
        Err(DbError::new("connection refused"))
    }
    async fn update_game(&self, _game: &Game) -> Result<usize, DbError> {
        Err(DbError::new("connection refused"))
    }
    async fn delete_game(&self, _id: &str) -> Result<usize, DbError> {
        Err(DbError::new("connection refused"))
    }
}

#[tokio::test]
async fn test_store_failures_are_opaque_server_errors() {
    let app = app_with(Arc::new(BrokenStore));
    let game_uri = format!("/api/v1/games/{UNKNOWN_ID}");

    let requests = [
        (Method::GET, "/api/v1/games", None),
        (Method::POST, "/api/v1/games", Some(r#"{"board":"---------"}"#)),
        (Method::GET, game_uri.as_str(), None),
        (Method::PUT, game_uri.as_str(), Some(r#"{"board":"X--------"}"#)),
        (Method::DELETE, game_uri.as_str(), None),
    ];
    for (method, uri, body) in requests {
        let (status, value) = send(&app, method.clone(), uri, body).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{method} {uri}");
        assert_eq!(value, json!({"reason": "Internal server error"}));
    }
}
