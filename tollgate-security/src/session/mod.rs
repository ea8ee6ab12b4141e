//! Token Sessions
//!
//! The registry of issued tokens, the policy that expires them, the storage
//! backends behind the registry and the request-scoped token context.

pub mod context;
pub mod expiration;
pub mod registry;
pub mod storage;

pub use context::{Reconciliation, SessionHandle, TokenContext, TokenScope, AUTH_TOKEN_ATTRIBUTE};
pub use expiration::{ExpirationPolicy, NeverExpire, TimeoutExpirationPolicy};
pub use registry::AuthenticationRegistry;
pub use storage::{
    AuthenticationStats, AuthenticationStore, InMemoryAuthenticationStore, StoredAuthentication,
};
