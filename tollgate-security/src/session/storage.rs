//! Authentication Storage - backends for the registry
//!
//! A backend only needs atomic load/save/delete keyed by token. Expiry lives in
//! the registry, so any backend gets it for free.

use crate::auth::Authentication;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Access timestamps of a registered authentication
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticationStats {
    pub created: DateTime<Utc>,
    pub last_accessed: DateTime<Utc>,
}

impl AuthenticationStats {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            created: now,
            last_accessed: now,
        }
    }
}

/// A registered authentication and its access statistics.
///
/// The statistics sit behind their own lock so that checking and refreshing
/// one entry never blocks readers of another.
#[derive(Debug)]
pub struct StoredAuthentication<U, P> {
    authentication: Authentication<U, P>,
    stats: Mutex<AuthenticationStats>,
}

impl<U, P> StoredAuthentication<U, P> {
    pub fn new(authentication: Authentication<U, P>, now: DateTime<Utc>) -> Self {
        Self {
            authentication,
            stats: Mutex::new(AuthenticationStats::new(now)),
        }
    }

    pub fn authentication(&self) -> &Authentication<U, P> {
        &self.authentication
    }

    /// Snapshot of the current statistics
    pub fn stats(&self) -> AuthenticationStats {
        *self.lock_stats()
    }

    /// Holding the guard serializes check-and-refresh on this entry
    pub(crate) fn lock_stats(&self) -> MutexGuard<'_, AuthenticationStats> {
        // Stats are plain timestamps, a panicked holder cannot leave them torn
        self.stats.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

pub trait AuthenticationStore<U, P>: Send + Sync {
    fn load(&self, token: &str) -> Option<Arc<StoredAuthentication<U, P>>>;

    /// Overwrites any entry already stored under `token`
    fn save(&self, token: String, entry: Arc<StoredAuthentication<U, P>>);

    fn delete(&self, token: &str) -> bool;

    /// Deletes `token` only while it still maps to `entry`
    fn delete_entry(&self, token: &str, entry: &Arc<StoredAuthentication<U, P>>) -> bool;

    fn tokens(&self) -> Vec<String>;

    fn len(&self) -> usize;
}

/// Process-local backend on a sharded concurrent map
pub struct InMemoryAuthenticationStore<U, P> {
    entries: DashMap<String, Arc<StoredAuthentication<U, P>>>,
}

impl<U, P> InMemoryAuthenticationStore<U, P> {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }
}

impl<U, P> Default for InMemoryAuthenticationStore<U, P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<U, P> AuthenticationStore<U, P> for InMemoryAuthenticationStore<U, P>
where
    U: Send + Sync,
    P: Send + Sync,
{
    fn load(&self, token: &str) -> Option<Arc<StoredAuthentication<U, P>>> {
        self.entries.get(token).map(|entry| entry.value().clone())
    }

    fn save(&self, token: String, entry: Arc<StoredAuthentication<U, P>>) {
        self.entries.insert(token, entry);
    }

    fn delete(&self, token: &str) -> bool {
        self.entries.remove(token).is_some()
    }

    fn delete_entry(&self, token: &str, entry: &Arc<StoredAuthentication<U, P>>) -> bool {
        self.entries
            .remove_if(token, |_, stored| Arc::ptr_eq(stored, entry))
            .is_some()
    }

    fn tokens(&self) -> Vec<String> {
        self.entries.iter().map(|entry| entry.key().clone()).collect()
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}
