//! Permission System
//!
//! Permissions are compared through a grantor relation: `required.accept(actual)`
//! holds when everything protected by `required` is allowed for a holder of
//! `actual`.

use serde::{Deserialize, Serialize};

/// Names of the built-in roles
pub mod roles {
    pub const ADMIN: &str = "ADMIN";
    pub const REVIEWER: &str = "REVIEWER";
    pub const USER: &str = "USER";
}

/// A permission level.
///
/// `accept` does not have to be a total order. Callers that chain checks across
/// three or more levels assume it is transitive; implementations are expected to
/// honour that, nothing here enforces it.
pub trait Permissions: Clone + Send + Sync + 'static {
    fn accept(&self, other: &Self) -> bool;
}

/// Role with a rank; the lower the rank the wider the permissions
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RolePermissions {
    pub name: String,
    pub rank: i32,
}

impl RolePermissions {
    pub fn new(name: impl Into<String>, rank: i32) -> Self {
        Self {
            name: name.into(),
            rank,
        }
    }

    /// `ADMIN(0)`, `REVIEWER(1)` and `USER(2)`
    pub fn defaults() -> Vec<Self> {
        vec![
            Self::new(roles::ADMIN, 0),
            Self::new(roles::REVIEWER, 1),
            Self::new(roles::USER, 2),
        ]
    }
}

impl Permissions for RolePermissions {
    fn accept(&self, other: &Self) -> bool {
        self.rank >= other.rank
    }
}

impl std::fmt::Display for RolePermissions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", self.name, self.rank)
    }
}

/// The permission kinds the system knows about
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Permission {
    /// Ranked role, the common case
    Role(RolePermissions),
    /// Local system principal: passes every requirement, and only another
    /// system principal passes a system requirement
    System,
}

impl Permission {
    pub fn role(name: impl Into<String>, rank: i32) -> Self {
        Permission::Role(RolePermissions::new(name, rank))
    }

    pub fn name(&self) -> &str {
        match self {
            Permission::Role(role) => &role.name,
            Permission::System => "SYSTEM",
        }
    }

    pub fn as_role(&self) -> Option<&RolePermissions> {
        match self {
            Permission::Role(role) => Some(role),
            Permission::System => None,
        }
    }
}

impl From<RolePermissions> for Permission {
    fn from(role: RolePermissions) -> Self {
        Permission::Role(role)
    }
}

impl Permissions for Permission {
    fn accept(&self, other: &Self) -> bool {
        match (self, other) {
            (_, Permission::System) => true,
            (Permission::System, Permission::Role(_)) => false,
            (Permission::Role(required), Permission::Role(actual)) => required.accept(actual),
        }
    }
}

impl std::fmt::Display for Permission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Permission::Role(role) => write!(f, "{}", role),
            Permission::System => write!(f, "SYSTEM"),
        }
    }
}
