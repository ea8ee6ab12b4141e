//! Expiration Policies

use super::storage::AuthenticationStats;
use chrono::Duration;
use std::sync::Arc;
use tollgate_core::TimeSource;

/// Decides whether a stored authentication may still be handed out
pub trait ExpirationPolicy: Send + Sync {
    fn is_valid(&self, stats: &AuthenticationStats) -> bool;
}

/// Sliding timeout: valid while `last_accessed + duration >= now`.
/// A deadline past the representable calendar never expires.
pub struct TimeoutExpirationPolicy {
    duration: Duration,
    clock: Arc<dyn TimeSource>,
}

impl TimeoutExpirationPolicy {
    pub fn new(duration: Duration, clock: Arc<dyn TimeSource>) -> Self {
        Self { duration, clock }
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }
}

impl ExpirationPolicy for TimeoutExpirationPolicy {
    fn is_valid(&self, stats: &AuthenticationStats) -> bool {
        match stats.last_accessed.checked_add_signed(self.duration) {
            Some(deadline) => deadline >= self.clock.now(),
            None => true,
        }
    }
}

impl std::fmt::Debug for TimeoutExpirationPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimeoutExpirationPolicy")
            .field("duration", &self.duration)
            .finish_non_exhaustive()
    }
}

/// Every entry stays valid until removed
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverExpire;

impl ExpirationPolicy for NeverExpire {
    fn is_valid(&self, _stats: &AuthenticationStats) -> bool {
        true
    }
}
