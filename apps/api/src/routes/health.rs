use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Liveness plus the screening settings this instance runs with.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "screener",
        "model": state.config.groq_model,
        "questions_per_session": state.generator.target_count,
        "max_attempts": state.generator.max_attempts(),
    }))
}
