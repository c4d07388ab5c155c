use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use common::games::tictactoe::{GameError, MoveRequest, MoveResponse, resolve_ai_move};
use common::{log, version};
use serde_json::json;

use crate::web_server::WebServerState;

#[derive(Debug)]
pub struct ApiError(GameError);

impl From<GameError> for ApiError {
    fn from(err: GameError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": self.0.to_string() })),
        )
            .into_response()
    }
}

/// Picks and applies the AI's move. Each call owns its random source.
pub fn compute_move(state: &WebServerState, request: &MoveRequest) -> Result<MoveResponse, ApiError> {
    let mut rng = request.session_rng();
    let response = resolve_ai_move(request, state.easy_variant, &mut rng)?;
    Ok(response)
}

pub async fn ai_move_handler(
    State(state): State<WebServerState>,
    Json(request): Json<MoveRequest>,
) -> Result<Json<MoveResponse>, ApiError> {
    match compute_move(&state, &request) {
        Ok(response) => {
            log!(
                "[ai-move] {} {} played {} winner={:?}",
                request.difficulty,
                request.mover,
                response.move_index,
                response.winner
            );
            Ok(Json(response))
        }
        Err(err) => {
            log!("[ai-move] rejected {} request for {}: {}", request.difficulty, request.mover, err.0);
            Err(err)
        }
    }
}

pub async fn root_handler() -> impl IntoResponse {
    Json(json!({ "message": "Tic Tac Toe AI Backend" }))
}

pub async fn health_handler() -> impl IntoResponse {
    Json(json!({ "status": "ok", "version": version::get_version() }))
}
