//! Clock abstraction
//!
//! Everything that reasons about token lifetime reads the time through a
//! [`TimeSource`] so tests can move time forward without sleeping.

use chrono::{DateTime, Duration, TimeZone, Utc};
use std::sync::atomic::{AtomicI64, Ordering};

/// Source of the current wall-clock time
pub trait TimeSource: Send + Sync {
    /// Current instant
    fn now(&self) -> DateTime<Utc>;

    /// Milliseconds since the Unix epoch
    fn millis_from_epoch(&self) -> i64 {
        self.now().timestamp_millis()
    }
}

/// Real clock backed by [`Utc::now`]
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTimeSource;

impl TimeSource for SystemTimeSource {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Controllable clock for tests and simulations.
///
/// Starts at the Unix epoch and only moves when [`ManualTimeSource::advance`]
/// is called. Safe to share between threads.
#[derive(Debug, Default)]
pub struct ManualTimeSource {
    millis: AtomicI64,
}

impl ManualTimeSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start the clock at a specific instant
    pub fn starting_at(instant: DateTime<Utc>) -> Self {
        Self {
            millis: AtomicI64::new(instant.timestamp_millis()),
        }
    }

    /// Move the clock forward
    pub fn advance(&self, by: Duration) {
        self.millis.fetch_add(by.num_milliseconds(), Ordering::SeqCst);
    }

    /// Jump to an absolute instant
    pub fn set(&self, instant: DateTime<Utc>) {
        self.millis
            .store(instant.timestamp_millis(), Ordering::SeqCst);
    }
}

impl TimeSource for ManualTimeSource {
    fn now(&self) -> DateTime<Utc> {
        let millis = self.millis.load(Ordering::SeqCst);
        Utc.timestamp_millis_opt(millis)
            .single()
            .unwrap_or_default()
    }

    fn millis_from_epoch(&self) -> i64 {
        self.millis.load(Ordering::SeqCst)
    }
}
