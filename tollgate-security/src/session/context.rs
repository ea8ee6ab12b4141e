//! Token Context - one bound token per unit of work
//!
//! A [`TokenContext`] is created for every request and passed down explicitly.
//! [`TokenScope`] ties it to the persisted session: the token is read from the
//! session when the scope begins, and any change is written back when it ends.

use super::registry::AuthenticationRegistry;
use super::storage::AuthenticationStore;
use crate::auth::{Authentication, Permissions, User};
use crate::{SecurityError, SecurityResult};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::debug;
use uuid::Uuid;

/// Session attribute holding the bound token
pub const AUTH_TOKEN_ATTRIBUTE: &str = "AUTH_TOKEN";

/// The token bound to the current unit of work, if any
#[derive(Debug, Default)]
pub struct TokenContext {
    token: Mutex<Option<String>>,
}

impl TokenContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bind(&self, token: impl Into<String>) {
        *self.slot() = Some(token.into());
    }

    pub fn current(&self) -> Option<String> {
        self.slot().clone()
    }

    /// Unbind, returning the token that was bound
    pub fn clear(&self) -> Option<String> {
        self.slot().take()
    }

    pub fn is_bound(&self) -> bool {
        self.slot().is_some()
    }

    fn slot(&self) -> MutexGuard<'_, Option<String>> {
        self.token.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Persisted per-client session that carries the token between requests
pub trait SessionHandle {
    fn token(&self) -> Option<String>;
    fn set_token(&mut self, token: &str);
    fn invalidate(&mut self);
}

/// What the end of a unit of work did to the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reconciliation {
    Unchanged,
    Persisted,
    Invalidated,
}

/// Binds the session token for the duration of a unit of work.
///
/// Reconciliation runs on [`TokenScope::finish`] or, failing that, on drop, so
/// an early return or a panic still leaves the context unbound.
pub struct TokenScope<'a, H: SessionHandle> {
    context: &'a TokenContext,
    session: &'a mut H,
    entry_token: Option<String>,
    finished: bool,
}

impl<'a, H: SessionHandle> TokenScope<'a, H> {
    pub fn begin(context: &'a TokenContext, session: &'a mut H) -> Self {
        let entry_token = session.token();
        match &entry_token {
            Some(token) => context.bind(token.clone()),
            None => {
                context.clear();
            }
        }

        Self {
            context,
            session,
            entry_token,
            finished: false,
        }
    }

    pub fn context(&self) -> &TokenContext {
        self.context
    }

    pub fn finish(mut self) -> Reconciliation {
        self.reconcile()
    }

    fn reconcile(&mut self) -> Reconciliation {
        if self.finished {
            return Reconciliation::Unchanged;
        }
        self.finished = true;

        let exit_token = self.context.clear();
        if exit_token == self.entry_token {
            return Reconciliation::Unchanged;
        }

        match exit_token {
            Some(token) => {
                self.session.set_token(&token);
                Reconciliation::Persisted
            }
            None => {
                self.session.invalidate();
                Reconciliation::Invalidated
            }
        }
    }
}

impl<H: SessionHandle> Drop for TokenScope<'_, H> {
    fn drop(&mut self) {
        self.reconcile();
    }
}

impl<U, P, S> AuthenticationRegistry<U, P, S>
where
    U: User,
    P: Permissions,
    S: AuthenticationStore<U, P>,
{
    /// Issue a fresh token for `authentication` and bind it, dropping any
    /// previously bound registration
    pub fn login(&self, context: &TokenContext, authentication: Authentication<U, P>) -> String {
        if let Some(previous) = context.current() {
            self.remove(&previous);
        }

        let token = Uuid::new_v4().simple().to_string();
        self.register(token.clone(), authentication);
        context.bind(token.clone());
        token
    }

    /// Remove the bound token's registration and unbind it
    pub fn logout(&self, context: &TokenContext) -> bool {
        match context.clear() {
            Some(token) => {
                debug!("Logging out bound token");
                self.remove(&token)
            }
            None => false,
        }
    }

    /// Unbound and expired alike resolve to `None`
    pub fn current_authentication(&self, context: &TokenContext) -> Option<Authentication<U, P>> {
        context.current().and_then(|token| self.get(&token))
    }

    pub fn require_authentication(
        &self,
        context: &TokenContext,
    ) -> SecurityResult<Authentication<U, P>> {
        self.current_authentication(context)
            .ok_or(SecurityError::AccessDenied)
    }
}
