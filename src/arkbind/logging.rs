//! Subscriber setup for the binary. The library only emits `tracing` events and
//! never installs a subscriber itself.

use crate::config::LogLevel;
use crate::error::{ArkError, Result};
use tracing_subscriber::EnvFilter;

/// Filter for the configured level; `RUST_LOG` wins when set.
pub fn filter_for(level: LogLevel) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.directive()))
}

/// Install the global fmt subscriber, writing to stderr.
pub fn init(level: LogLevel) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(filter_for(level))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| ArkError::Config(format!("Failed to initialize logging: {}", e)))
}
