//! Tollgate Web Server
//!
//! HTTP boundary over `tollgate-security`: a session cookie carries the token
//! between requests, the token boundary middleware binds it for each request
//! and role guards protect the business and user management routes.

pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod session;
pub mod state;

// Re-export main types
pub use server::{TollgateServer, TollgateServerBuilder};
pub use state::AppState;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    Router,
};
use tollgate_core::TollgateError;
use tollgate_security::SecurityError;
use tower_http::trace::TraceLayer;
use tracing::error;

/// Create the main application router
pub fn create_app(state: AppState) -> Router {
    routes::app_routes(&state)
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::token_boundary,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Error types for the web server
#[derive(thiserror::Error, Debug)]
pub enum WebError {
    #[error("Access denied")]
    AccessDenied,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Already exists: {0}")]
    Conflict(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Server error: {0}")]
    Server(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] TollgateError),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type for web operations
pub type WebResult<T> = Result<T, WebError>;

impl From<SecurityError> for WebError {
    fn from(error: SecurityError) -> Self {
        match error {
            SecurityError::AccessDenied => WebError::AccessDenied,
            SecurityError::NotFound { resource } => WebError::NotFound(resource),
            SecurityError::Conflict { resource } => WebError::Conflict(resource),
            SecurityError::Core(core) => WebError::Config(core),
        }
    }
}

impl WebError {
    pub fn status(&self) -> StatusCode {
        match self {
            WebError::AccessDenied => StatusCode::FORBIDDEN,
            WebError::NotFound(_) => StatusCode::NOT_FOUND,
            WebError::Conflict(_) => StatusCode::CONFLICT,
            WebError::BadRequest(_) => StatusCode::BAD_REQUEST,
            WebError::Server(_) | WebError::Config(_) | WebError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn code(&self) -> &'static str {
        match self {
            WebError::AccessDenied => "access_denied",
            WebError::NotFound(_) => "not_found",
            WebError::Conflict(_) => "conflict",
            WebError::BadRequest(_) => "bad_request",
            WebError::Server(_) | WebError::Config(_) | WebError::Internal(_) => "internal_error",
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            WebError::Config(core) => core.log(),
            _ if status.is_server_error() => error!("Request failed: {}", self),
            _ => {}
        }

        // Server side detail stays in the log
        let message = if status.is_server_error() {
            "Internal server error".to_string()
        } else {
            self.to_string()
        };

        (
            status,
            Json(serde_json::json!({
                "error": self.code(),
                "message": message,
            })),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_security_errors_map_to_status() {
        assert_eq!(
            WebError::from(SecurityError::AccessDenied).status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            WebError::from(SecurityError::not_found("user x")).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            WebError::from(SecurityError::conflict("user x")).status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            WebError::Internal("boom".to_string()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
