//! User Identity
//!
//! Users, the details loaded for them at login time, and the authentication
//! result that the registry hands out for a token.

use super::permissions::Permissions;
use super::strategy::AuthenticationData;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// A user of the system; `identity` uniquely identifies it and is the lookup key
pub trait User: Clone + Send + Sync + 'static {
    fn identity(&self) -> &str;
}

/// Plain user record identified by email
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultUser {
    pub name: String,
    pub surname: String,
    pub email: String,
}

impl DefaultUser {
    pub fn new(
        name: impl Into<String>,
        surname: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            surname: surname.into(),
            email: email.into(),
        }
    }
}

impl User for DefaultUser {
    fn identity(&self) -> &str {
        &self.email
    }
}

/// Result of a successful credential check: who the caller is and what they may do
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Authentication<U, P> {
    pub user: U,
    pub permissions: P,
}

impl<U: User, P: Permissions> Authentication<U, P> {
    pub fn new(user: U, permissions: P) -> Self {
        Self { user, permissions }
    }
}

/// Everything known about a user: identity, verification material and permissions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserDetails<U, A, P> {
    pub user: U,
    pub authentication_data: A,
    pub permissions: P,
}

impl<U, A, P> UserDetails<U, A, P> {
    pub fn new(user: U, authentication_data: A, permissions: P) -> Self {
        Self {
            user,
            authentication_data,
            permissions,
        }
    }
}

/// Loads [`UserDetails`] from wherever users are kept
pub trait UserDetailsProvider: Send + Sync {
    type User: User;
    type Data: AuthenticationData;
    type Permissions: Permissions;

    fn find_by_identity(
        &self,
        identity: &str,
    ) -> Option<UserDetails<Self::User, Self::Data, Self::Permissions>>;
}

impl<T: UserDetailsProvider + ?Sized> UserDetailsProvider for Arc<T> {
    type User = T::User;
    type Data = T::Data;
    type Permissions = T::Permissions;

    fn find_by_identity(
        &self,
        identity: &str,
    ) -> Option<UserDetails<Self::User, Self::Data, Self::Permissions>> {
        (**self).find_by_identity(identity)
    }
}
