//! Tollgate Core - shared infrastructure
//!
//! Error types, logging setup, configuration and the clock abstraction used by
//! the security and web crates.

pub mod config;
pub mod error;
pub mod logging;
pub mod time;

pub use config::*;
pub use error::*;
pub use logging::*;
pub use time::*;

// Re-export commonly used external types
pub use chrono;
pub use tracing;
