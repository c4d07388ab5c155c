use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use common::games::tictactoe::EasyVariant;
use serde_json::{Value, json};
use tictactoe_server::server_config::ServerConfig;
use tictactoe_server::web_server::build_router;
use tower::ServiceExt;

fn router() -> Router {
    build_router(&ServerConfig::default())
}

async fn post_move(app: Router, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri("/api/ai-move")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_root_message() {
    let (status, body) = get_json(router(), "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "Tic Tac Toe AI Backend" }));
}

#[tokio::test]
async fn test_health_reports_version() {
    let (status, body) = get_json(router(), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_hard_opening_takes_center() {
    let (status, body) = post_move(
        router(),
        json!({
            "board": [" ", " ", " ", " ", " ", " ", " ", " ", " "],
            "difficulty": "hard",
            "mover": "X",
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "move": 4,
            "board": [" ", " ", " ", " ", "X", " ", " ", " ", " "],
            "winner": null,
            "winningLine": [],
        })
    );
}

#[tokio::test]
async fn test_winning_move_reports_line() {
    let (status, body) = post_move(
        router(),
        json!({
            "board": ["X", "X", " ", "O", "O", " ", " ", " ", " "],
            "difficulty": "hard",
            "aiSymbol": "X",
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["move"], 2);
    assert_eq!(body["winner"], "X");
    assert_eq!(body["winningLine"], json!([0, 1, 2]));
}

#[tokio::test]
async fn test_last_cell_reports_draw() {
    let (status, body) = post_move(
        router(),
        json!({
            "board": ["X", "O", "X", "X", "O", "O", "O", "X", ""],
            "difficulty": "easy",
            "mover": "X",
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["move"], 8);
    assert_eq!(body["winner"], "draw");
    assert_eq!(body["winningLine"], json!([]));
}

#[tokio::test]
async fn test_full_board_is_rejected() {
    let (status, body) = post_move(
        router(),
        json!({
            "board": ["X", "O", "X", "X", "O", "O", "O", "X", "X"],
            "difficulty": "hard",
            "mover": "O",
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid state: board is full");
}

#[tokio::test]
async fn test_mover_out_of_turn_is_rejected() {
    let (status, body) = post_move(
        router(),
        json!({
            "board": [" ", " ", " ", " ", " ", " ", " ", " ", " "],
            "difficulty": "easy",
            "mover": "O",
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("X's turn"));
}

#[tokio::test]
async fn test_undecodable_body_is_rejected_by_extractor() {
    let (status, _) = post_move(
        router(),
        json!({
            "board": ["X", " "],
            "difficulty": "hard",
            "mover": "O",
        }),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_seeded_easy_requests_repeat() {
    let config = ServerConfig {
        easy_variant: EasyVariant::Random,
        ..ServerConfig::default()
    };
    let body = json!({
        "board": [" ", " ", " ", " ", " ", " ", " ", " ", " "],
        "difficulty": "easy",
        "mover": "X",
        "seed": 17,
    });
    let (_, first) = post_move(build_router(&config), body.clone()).await;
    let (_, second) = post_move(build_router(&config), body).await;
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_cors_preflight_allows_any_origin_by_default() {
    let request = Request::builder()
        .method("OPTIONS")
        .uri("/api/ai-move")
        .header(header::ORIGIN, "https://example.com")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .body(Body::empty())
        .unwrap();
    let response = router().oneshot(request).await.unwrap();
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "*"
    );
}

async fn preflight_allow_origin(app: Router, origin: &str) -> Option<String> {
    let request = Request::builder()
        .method("OPTIONS")
        .uri("/api/ai-move")
        .header(header::ORIGIN, origin)
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    response
        .headers()
        .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
        .map(|value| value.to_str().unwrap().to_string())
}

#[tokio::test]
async fn test_cors_restricted_to_configured_origins() {
    let config = ServerConfig {
        allowed_origins: vec![
            "http://localhost:3000".to_string(),
            "bad\norigin".to_string(),
        ],
        ..ServerConfig::default()
    };

    assert_eq!(
        preflight_allow_origin(build_router(&config), "http://localhost:3000").await,
        Some("http://localhost:3000".to_string())
    );
    assert_eq!(
        preflight_allow_origin(build_router(&config), "https://example.com").await,
        None
    );
}
