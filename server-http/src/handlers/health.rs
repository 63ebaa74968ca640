use crate::api::HealthResponse;
use crate::state::AppState;
use axum::{Json, extract::State};
use chrono::Utc;

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let cache = if state.cache.is_enabled() {
        "enabled"
    } else {
        "disabled"
    };

    Json(HealthResponse {
        status: "OK".into(),
        timestamp: Utc::now(),
        cache: cache.into(),
    })
}
