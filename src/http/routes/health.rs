use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};

use crate::http::dto::HealthResponse;
use crate::http::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}

/// Always answers; `sqlite` reports whether the store responds right now.
async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        ok: true,
        sqlite: state.service.store_available().await,
    })
}
