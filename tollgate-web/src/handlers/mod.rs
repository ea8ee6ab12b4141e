//! HTTP request handlers for the Tollgate web server

pub mod admin;
pub mod auth;
pub mod business;
pub mod health;
pub mod types;
pub mod users;

pub use admin::*;
pub use auth::*;
pub use business::*;
pub use health::*;
pub use users::*;

pub use types::*;

use crate::{WebError, WebResult};

/// Run credential hashing on the blocking pool
pub(crate) async fn hashing<T, F>(work: F) -> WebResult<T>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| WebError::Internal(format!("Blocking task failed: {}", e)))
}
