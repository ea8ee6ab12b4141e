//! Request and response bodies

use serde::{Deserialize, Serialize};
use tollgate_security::{Authentication, DefaultUser, Permission};

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub version: String,
    /// Registered tokens, expired ones included until they are next read
    pub active_tokens: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub user: String,
    pub password: String,
}

/// Who is logged in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusResponse {
    pub user: DefaultUser,
    pub role: String,
}

impl From<Authentication<DefaultUser, Permission>> for StatusResponse {
    fn from(authentication: Authentication<DefaultUser, Permission>) -> Self {
        Self {
            role: authentication.permissions.name().to_string(),
            user: authentication.user,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PasswordRequest {
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUserRequest {
    pub name: String,
    pub surname: String,
    pub password: String,
    pub role: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurgeResponse {
    pub purged: usize,
    pub remaining: usize,
}
