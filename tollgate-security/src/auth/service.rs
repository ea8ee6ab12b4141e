//! Authentication Service
//!
//! Looks a principal up, verifies the presented credential and produces an
//! [`Authentication`]. Holds no mutable state.

use super::identity::{Authentication, User, UserDetailsProvider};
use super::permissions::Permissions;
use super::strategy::AuthenticationStrategy;
use tracing::debug;

pub trait AuthenticationService<U: User, P: Permissions>: Send + Sync {
    /// `None` for an unknown principal and for a wrong credential alike
    fn authenticate(&self, principal: &str, credential: &str) -> Option<Authentication<U, P>>;
}

pub struct DefaultAuthenticationService<D, S> {
    provider: D,
    strategy: S,
}

impl<D, S> DefaultAuthenticationService<D, S>
where
    D: UserDetailsProvider,
    S: AuthenticationStrategy<D::Data>,
{
    pub fn new(provider: D, strategy: S) -> Self {
        Self { provider, strategy }
    }

    pub fn strategy(&self) -> &S {
        &self.strategy
    }
}

impl<D, S> AuthenticationService<D::User, D::Permissions> for DefaultAuthenticationService<D, S>
where
    D: UserDetailsProvider,
    S: AuthenticationStrategy<D::Data>,
{
    fn authenticate(
        &self,
        principal: &str,
        credential: &str,
    ) -> Option<Authentication<D::User, D::Permissions>> {
        let verified = self
            .provider
            .find_by_identity(principal)
            .filter(|details| {
                self.strategy
                    .authenticate(credential, &details.authentication_data)
            })
            .map(|details| Authentication::new(details.user, details.permissions));

        if verified.is_none() {
            debug!("Authentication rejected for principal {}", principal);
        }
        verified
    }
}
