//! kafkagen-runtime - Concurrent routing and generation for kafkagen
//!
//! This crate drives a generation run:
//! - [`Generator`] loads documents on scoped worker threads and routes them
//! - [`ApiGroup`] and [`HeaderGroup`] pair requests with responses
//! - [`RunReport`] collects written files and per-document failures

mod error;
mod group;
mod runtime;

pub use error::{GenerateError, GenerateResult};
pub use group::{ApiGroup, CompletedPair, HeaderGroup, Slot};
pub use runtime::{Failure, Generator, GeneratorOptions, RunReport};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{GenerateError, Generator, GeneratorOptions, RunReport};
}
