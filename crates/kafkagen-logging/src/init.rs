//! Subscriber installation

use crate::level::LogLevel;
use once_cell::sync::OnceCell;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

/// Environment variable that overrides the requested level with a full filter.
pub const LOG_ENV_VAR: &str = "KAFKAGEN_LOG";

static INSTALLED: OnceCell<LogLevel> = OnceCell::new();

/// Install a compact stderr subscriber.
///
/// `KAFKAGEN_LOG` takes precedence over `level` when it parses as a filter.
/// Only the first call installs anything; later calls return the level that
/// won. If another subscriber is already global, ours is silently skipped.
pub fn init_logging(level: LogLevel) -> LogLevel {
    *INSTALLED.get_or_init(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
            .unwrap_or_else(|_| EnvFilter::default().add_directive(level.as_filter().into()));

        let layer = tracing_subscriber::fmt::layer()
            .compact()
            .with_target(false)
            .with_writer(std::io::stderr);

        // Ignore error if a subscriber was set elsewhere
        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(layer)
            .try_init();
        level
    })
}

/// The level passed to the first successful [`init_logging`] call.
pub fn installed_level() -> Option<LogLevel> {
    INSTALLED.get().copied()
}

#[cfg(test)]
#[path = "init/init_tests.rs"]
mod init_tests;
