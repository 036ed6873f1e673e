//! Error types for a generation run

use crate::group::Slot;
use kafkagen_codegen::CompileError;
use kafkagen_core::SchemaError;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for generation operations
pub type GenerateResult<T> = Result<T, GenerateError>;

/// Error type for loading, routing and emitting one document or group
#[derive(Error, Debug)]
pub enum GenerateError {
    /// The document could not be loaded
    #[error("{}: {source}", path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: SchemaError,
    },

    /// A group slot was filled twice
    #[error("{group}: {slot} slot already holds {existing}, rejecting {incoming}")]
    Conflict {
        group: String,
        slot: Slot,
        existing: String,
        incoming: String,
    },

    /// Request and response disagree on the shared base name
    #[error("api key {api_key}: request base name {request:?} does not match response base name {response:?}")]
    NameMismatch {
        api_key: i16,
        request: String,
        response: String,
    },

    /// An internal invariant did not hold
    #[error("internal fault: {0}")]
    Fault(String),

    /// The completed group could not be compiled or written
    #[error("{group}: {source}")]
    Compile {
        group: String,
        #[source]
        source: CompileError,
    },
}

impl GenerateError {
    /// Conflicts and faults abort a whole group rather than one document.
    pub fn is_group_fatal(&self) -> bool {
        matches!(
            self,
            GenerateError::Conflict { .. } | GenerateError::NameMismatch { .. } | GenerateError::Fault(_)
        )
    }
}


#[cfg(test)]
#[path = "error/error_parameterized_tests.rs"]
mod error_parameterized_tests;
