//! Authentication Registry
//!
//! Maps opaque tokens to the [`Authentication`] they were issued for. Entries
//! expire lazily: a lookup that fails the [`ExpirationPolicy`] evicts the entry
//! and reports nothing, there is no background sweeper.

use super::expiration::{ExpirationPolicy, TimeoutExpirationPolicy};
use super::storage::{AuthenticationStore, InMemoryAuthenticationStore, StoredAuthentication};
use crate::auth::{Authentication, Permissions, User};
use std::marker::PhantomData;
use std::sync::Arc;
use tollgate_core::TimeSource;
use tracing::{debug, info};

pub struct AuthenticationRegistry<U, P, S = InMemoryAuthenticationStore<U, P>> {
    store: S,
    policy: Arc<dyn ExpirationPolicy>,
    clock: Arc<dyn TimeSource>,
    _entries: PhantomData<fn() -> (U, P)>,
}

impl<U: User, P: Permissions> AuthenticationRegistry<U, P> {
    /// Registry over the in-memory backend
    pub fn in_memory(policy: Arc<dyn ExpirationPolicy>, clock: Arc<dyn TimeSource>) -> Self {
        Self::with_store(InMemoryAuthenticationStore::new(), policy, clock)
    }

    /// In-memory registry with a sliding timeout read from `clock`
    pub fn with_timeout(timeout: chrono::Duration, clock: Arc<dyn TimeSource>) -> Self {
        let policy = Arc::new(TimeoutExpirationPolicy::new(timeout, clock.clone()));
        Self::in_memory(policy, clock)
    }
}

impl<U, P, S> AuthenticationRegistry<U, P, S>
where
    U: User,
    P: Permissions,
    S: AuthenticationStore<U, P>,
{
    pub fn with_store(
        store: S,
        policy: Arc<dyn ExpirationPolicy>,
        clock: Arc<dyn TimeSource>,
    ) -> Self {
        Self {
            store,
            policy,
            clock,
            _entries: PhantomData,
        }
    }

    /// Store `authentication` under `token`, replacing whatever was there
    pub fn register(&self, token: impl Into<String>, authentication: Authentication<U, P>) {
        let token = token.into();
        debug!(
            "Registering authentication for {}",
            authentication.user.identity()
        );
        let entry = StoredAuthentication::new(authentication, self.clock.now());
        self.store.save(token, Arc::new(entry));
    }

    /// Returns whether an entry was removed; unknown tokens are not an error
    pub fn remove(&self, token: &str) -> bool {
        self.store.delete(token)
    }

    /// Valid entries get their access time refreshed, expired ones are evicted
    pub fn get(&self, token: &str) -> Option<Authentication<U, P>> {
        let entry = self.store.load(token)?;

        {
            let mut stats = entry.lock_stats();
            if self.policy.is_valid(&stats) {
                stats.last_accessed = self.clock.now();
                return Some(entry.authentication().clone());
            }
        }

        if self.store.delete_entry(token, &entry) {
            debug!(
                "Evicted expired authentication for {}",
                entry.authentication().user.identity()
            );
        }
        None
    }

    /// Evict every entry that currently fails the policy
    pub fn purge_expired(&self) -> usize {
        let mut purged = 0;
        for token in self.store.tokens() {
            let Some(entry) = self.store.load(&token) else {
                continue;
            };
            let expired = !self.policy.is_valid(&entry.lock_stats());
            if expired && self.store.delete_entry(&token, &entry) {
                purged += 1;
            }
        }

        if purged > 0 {
            info!("Purged {} expired authentications", purged);
        }
        purged
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clock(&self) -> &Arc<dyn TimeSource> {
        &self.clock
    }
}
