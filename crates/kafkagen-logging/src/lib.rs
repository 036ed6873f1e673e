//! kafkagen-logging - Tracing setup for kafkagen tools
//!
//! This crate provides:
//! - [`LogLevel`] for choosing verbosity from flags or config
//! - [`init_logging`] to install a stderr subscriber once per process

mod init;
mod level;

pub use init::{LOG_ENV_VAR, init_logging, installed_level};
pub use level::{LogLevel, ParseLevelError};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{LogLevel, init_logging};
}
