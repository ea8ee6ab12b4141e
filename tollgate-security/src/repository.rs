//! In-memory user and role repositories

use crate::auth::{
    AuthenticationData, Permissions, RolePermissions, User, UserDetails, UserDetailsProvider,
};
use crate::{SecurityError, SecurityResult};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tracing::debug;

/// Resolves role names for administrative operations
pub trait RolePermissionsRepository: Send + Sync {
    /// Unknown names fail with [`SecurityError::NotFound`]
    fn find_by_name(&self, name: &str) -> SecurityResult<RolePermissions>;
}

#[derive(Debug, Default)]
pub struct InMemoryRolePermissionsRepository {
    roles: DashMap<String, RolePermissions>,
}

impl InMemoryRolePermissionsRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeded with [`RolePermissions::defaults`]
    pub fn with_default_roles() -> Self {
        let repository = Self::new();
        for role in RolePermissions::defaults() {
            repository.insert(role);
        }
        repository
    }

    pub fn insert(&self, role: RolePermissions) {
        self.roles.insert(role.name.clone(), role);
    }
}

impl RolePermissionsRepository for InMemoryRolePermissionsRepository {
    fn find_by_name(&self, name: &str) -> SecurityResult<RolePermissions> {
        self.roles
            .get(name)
            .map(|role| role.value().clone())
            .ok_or_else(|| SecurityError::not_found(format!("role {}", name)))
    }
}

/// User details keyed by identity
pub struct InMemoryUserDetailsRepository<U, A, P> {
    users: DashMap<String, UserDetails<U, A, P>>,
}

impl<U, A, P> Default for InMemoryUserDetailsRepository<U, A, P> {
    fn default() -> Self {
        Self {
            users: DashMap::new(),
        }
    }
}

impl<U, A, P> InMemoryUserDetailsRepository<U, A, P>
where
    U: User,
    A: AuthenticationData,
    P: Permissions,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, details: UserDetails<U, A, P>) -> SecurityResult<()> {
        match self.users.entry(details.user.identity().to_string()) {
            Entry::Occupied(entry) => {
                Err(SecurityError::conflict(format!("user {}", entry.key())))
            }
            Entry::Vacant(entry) => {
                debug!("Stored user {}", entry.key());
                entry.insert(details);
                Ok(())
            }
        }
    }

    pub fn update(&self, details: UserDetails<U, A, P>) -> SecurityResult<()> {
        match self.users.get_mut(details.user.identity()) {
            Some(mut existing) => {
                *existing = details;
                Ok(())
            }
            None => Err(SecurityError::not_found(format!(
                "user {}",
                details.user.identity()
            ))),
        }
    }

    pub fn find_by_email(&self, email: &str) -> Option<UserDetails<U, A, P>> {
        self.users.get(email).map(|details| details.value().clone())
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

impl<U, A, P> UserDetailsProvider for InMemoryUserDetailsRepository<U, A, P>
where
    U: User,
    A: AuthenticationData,
    P: Permissions,
{
    type User = U;
    type Data = A;
    type Permissions = P;

    fn find_by_identity(&self, identity: &str) -> Option<UserDetails<U, A, P>> {
        self.find_by_email(identity)
    }
}
