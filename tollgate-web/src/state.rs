//! Application state shared by every handler

use crate::session::SessionStore;
use crate::WebResult;
use std::sync::Arc;
use tollgate_core::{SystemTimeSource, TimeSource, TollgateConfig};
use tollgate_security::{
    AuthenticationRegistry, DefaultAuthenticationService, DefaultAuthorizationStrategy,
    DefaultUser, InMemoryRolePermissionsRepository, Permission, SaltedHashAuthenticationStrategy,
    SecurityError, UserRepository, UserService,
};
use tracing::{info, warn};

pub type Registry = AuthenticationRegistry<DefaultUser, Permission>;
pub type Authenticator =
    DefaultAuthenticationService<Arc<UserRepository>, SaltedHashAuthenticationStrategy>;

#[derive(Clone)]
pub struct AppState {
    /// Configuration
    pub config: Arc<TollgateConfig>,
    /// Issued tokens
    pub registry: Arc<Registry>,
    /// Credential check for login
    pub authentication: Arc<Authenticator>,
    pub authorization: DefaultAuthorizationStrategy<Permission>,
    pub roles: Arc<InMemoryRolePermissionsRepository>,
    /// User management
    pub users: Arc<UserService>,
    /// Cookie-keyed sessions holding the bound token
    pub sessions: SessionStore,
}

impl AppState {
    /// Create a new application state on the system clock
    pub fn new(config: TollgateConfig) -> WebResult<Self> {
        Self::with_clock(config, Arc::new(SystemTimeSource))
    }

    /// Create the state reading token lifetimes from `clock`
    pub fn with_clock(config: TollgateConfig, clock: Arc<dyn TimeSource>) -> WebResult<Self> {
        config.validate()?;

        let strategy = SaltedHashAuthenticationStrategy::new(config.security.hash_iterations);
        let roles = Arc::new(InMemoryRolePermissionsRepository::with_default_roles());
        let user_repository = Arc::new(UserRepository::new());
        let users = Arc::new(UserService::new(
            user_repository.clone(),
            roles.clone(),
            strategy,
        ));
        let registry = Arc::new(Registry::with_timeout(
            config.security.authentication_timeout(),
            clock,
        ));

        let state = Self {
            authentication: Arc::new(DefaultAuthenticationService::new(
                user_repository,
                strategy,
            )),
            authorization: DefaultAuthorizationStrategy::new(),
            registry,
            roles,
            users,
            sessions: SessionStore::new(),
            config: Arc::new(config),
        };
        state.seed_admin()?;

        Ok(state)
    }

    fn seed_admin(&self) -> WebResult<()> {
        let bootstrap = &self.config.bootstrap;
        let admin = DefaultUser::new("Admin", "Admin", bootstrap.admin_email.clone());

        match self.users.create_user(
            admin,
            &bootstrap.admin_password,
            tollgate_security::roles::ADMIN,
        ) {
            Ok(()) => {
                info!("Seeded administrator {}", bootstrap.admin_email);
                Ok(())
            }
            Err(SecurityError::Conflict { .. }) => {
                warn!("Administrator {} already exists", bootstrap.admin_email);
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }

    pub fn session_cookie(&self) -> &str {
        &self.config.server.session_cookie
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_seeds_administrator() {
        let mut config = TollgateConfig::default();
        config.security.hash_iterations = 10;
        let state = AppState::new(config).unwrap();

        let admin = state.users.find_user_by_email("admin@tollgate.local");
        assert!(admin.is_some());
        assert!(state.registry.is_empty());
        assert_eq!(state.session_cookie(), "tollgate_session");
    }

    #[test]
    fn test_state_rejects_invalid_config() {
        let mut config = TollgateConfig::default();
        config.security.authentication_timeout_secs = 0;
        assert!(AppState::new(config).is_err());
    }
}
