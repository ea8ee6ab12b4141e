//! Authentication and Authorization Module
//!
//! Who a caller is ([`identity`]), how their credential is checked
//! ([`strategy`], [`service`]) and what they may do ([`permissions`],
//! [`authorization`]).

pub mod authorization;
pub mod identity;
pub mod permissions;
pub mod service;
pub mod strategy;

pub use authorization::{
    AndAuthorizationStrategy, AuthorizationStrategy, DefaultAuthorizationStrategy,
    OrAuthorizationStrategy,
};
pub use identity::{Authentication, DefaultUser, User, UserDetails, UserDetailsProvider};
pub use permissions::{roles, Permission, Permissions, RolePermissions};
pub use service::{AuthenticationService, DefaultAuthenticationService};
pub use strategy::{
    AuthenticationData, AuthenticationStrategy, SaltedHashAuthenticationData,
    SaltedHashAuthenticationStrategy, DEFAULT_HASH_ITERATIONS,
};
