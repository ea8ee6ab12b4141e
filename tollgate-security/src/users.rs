//! User Management
//!
//! Creates users and changes their passwords. Credentials are hashed here,
//! everything else is delegated to the repositories.

use crate::auth::{
    DefaultUser, Permission, SaltedHashAuthenticationData, SaltedHashAuthenticationStrategy,
    UserDetails,
};
use crate::repository::{InMemoryUserDetailsRepository, RolePermissionsRepository};
use crate::SecurityResult;
use std::sync::Arc;
use tracing::info;

pub type UserRepository =
    InMemoryUserDetailsRepository<DefaultUser, SaltedHashAuthenticationData, Permission>;

pub struct UserService {
    users: Arc<UserRepository>,
    roles: Arc<dyn RolePermissionsRepository>,
    strategy: SaltedHashAuthenticationStrategy,
}

impl UserService {
    pub fn new(
        users: Arc<UserRepository>,
        roles: Arc<dyn RolePermissionsRepository>,
        strategy: SaltedHashAuthenticationStrategy,
    ) -> Self {
        Self {
            users,
            roles,
            strategy,
        }
    }

    /// `role` must name a known role
    pub fn create_user(&self, user: DefaultUser, password: &str, role: &str) -> SecurityResult<()> {
        let role = self.roles.find_by_name(role)?;
        let data = self.strategy.new_authentication_data(password);
        info!("Creating user {} with role {}", user.email, role.name);

        self.users
            .insert(UserDetails::new(user, data, Permission::Role(role)))
    }

    /// Re-salts and re-hashes; unknown users fail with `NotFound`
    pub fn update_user_password(&self, email: &str, password: &str) -> SecurityResult<()> {
        let mut details = self
            .users
            .find_by_email(email)
            .ok_or_else(|| crate::SecurityError::not_found(format!("user {}", email)))?;
        details.authentication_data = self.strategy.new_authentication_data(password);

        self.users.update(details)?;
        info!("Updated password of {}", email);
        Ok(())
    }

    pub fn find_user_by_email(&self, email: &str) -> Option<DefaultUser> {
        self.users.find_by_email(email).map(|details| details.user)
    }

    pub fn users(&self) -> &Arc<UserRepository> {
        &self.users
    }

    pub fn strategy(&self) -> &SaltedHashAuthenticationStrategy {
        &self.strategy
    }
}
