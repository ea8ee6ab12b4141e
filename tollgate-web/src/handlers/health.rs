//! Health check handlers

use super::types::HealthResponse;
use crate::AppState;
use axum::{extract::State, response::Json};

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: chrono::Utc::now(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        active_tokens: state.registry.len(),
    })
}
