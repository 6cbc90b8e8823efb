//! Status Routes - AI backend availability

use axum::{extract::State, routing::get, Json, Router};

use crate::models::StatusResponse;
use crate::AppState;

/// Report which AI backend is serving requests
#[utoipa::path(
    get,
    path = "/ollama-status",
    responses(
        (status = 200, description = "AI backend status", body = StatusResponse)
    ),
    tag = "Status"
)]
pub async fn ai_status(State(state): State<AppState>) -> Json<StatusResponse> {
    Json(state.status_service.check().await.into())
}

pub fn router() -> Router<AppState> {
    Router::new().route("/ollama-status", get(ai_status))
}
