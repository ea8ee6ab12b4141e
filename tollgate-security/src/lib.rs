//! Tollgate Security - tokens, credentials and role-ranked authorization
//!
//! - [`auth`]: users, credential verification, permissions and authorization
//! - [`session`]: the expiring token registry and the request-scoped token context
//! - [`repository`] and [`users`]: in-memory user and role management
//!
//! ## Flow
//!
//! A request binds its session token into a [`TokenContext`]. Protected code
//! resolves the current [`Authentication`] through the
//! [`AuthenticationRegistry`] and checks it with an [`AuthorizationStrategy`].
//! Login and logout change the binding, which is written back to the session
//! when the request's [`TokenScope`] ends.

pub mod auth;
pub mod repository;
pub mod session;
pub mod users;

pub use auth::{
    roles, AndAuthorizationStrategy, Authentication, AuthenticationData, AuthenticationService,
    AuthenticationStrategy, AuthorizationStrategy, DefaultAuthenticationService,
    DefaultAuthorizationStrategy, DefaultUser, OrAuthorizationStrategy, Permission, Permissions,
    RolePermissions, SaltedHashAuthenticationData, SaltedHashAuthenticationStrategy, User,
    UserDetails, UserDetailsProvider,
};
pub use repository::{
    InMemoryRolePermissionsRepository, InMemoryUserDetailsRepository, RolePermissionsRepository,
};
pub use session::{
    AuthenticationRegistry, AuthenticationStats, AuthenticationStore, ExpirationPolicy,
    InMemoryAuthenticationStore, NeverExpire, Reconciliation, SessionHandle,
    TimeoutExpirationPolicy, TokenContext, TokenScope, AUTH_TOKEN_ATTRIBUTE,
};
pub use users::{UserRepository, UserService};

use tollgate_core::TollgateError;

/// Security error type
#[derive(Debug, thiserror::Error)]
pub enum SecurityError {
    /// Unknown principal, wrong credential and insufficient permissions all
    /// surface as this one variant
    #[error("Access denied")]
    AccessDenied,

    #[error("Not found: {resource}")]
    NotFound { resource: String },

    #[error("Already exists: {resource}")]
    Conflict { resource: String },

    #[error("Core error: {0}")]
    Core(#[from] TollgateError),
}

pub type SecurityResult<T> = Result<T, SecurityError>;

impl SecurityError {
    /// Create a not found error
    pub fn not_found<S: Into<String>>(resource: S) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    /// Create a conflict error
    pub fn conflict<S: Into<String>>(resource: S) -> Self {
        Self::Conflict {
            resource: resource.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_denied_does_not_leak_detail() {
        assert_eq!(SecurityError::AccessDenied.to_string(), "Access denied");
    }

    #[test]
    fn test_core_errors_convert() {
        let core = tollgate_core::validation_error!("bad", "field", "test");
        let error: SecurityError = core.into();
        assert!(matches!(error, SecurityError::Core(_)));
        assert_eq!(
            SecurityError::not_found("role GUEST").to_string(),
            "Not found: role GUEST"
        );
    }
}
