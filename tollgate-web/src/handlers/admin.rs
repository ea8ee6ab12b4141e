//! Operator endpoints

use super::types::PurgeResponse;
use crate::AppState;
use axum::{extract::State, response::Json};

/// `DELETE /admin/tokens/expired`, evicts tokens nobody has read since they expired
pub async fn purge_expired_tokens(State(state): State<AppState>) -> Json<PurgeResponse> {
    let purged = state.registry.purge_expired();
    Json(PurgeResponse {
        purged,
        remaining: state.registry.len(),
    })
}
