//! Error types for schema loading

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type alias for schema operations
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Error type for schema loading and schema value access
#[derive(Error, Debug)]
pub enum SchemaError {
    /// The schema document could not be read
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The document is malformed or does not match the schema model
    #[error("{}: {message}", path.display())]
    Json {
        path: PathBuf,
        line: usize,
        column: usize,
        message: String,
    },

    /// A version range string is not one of `a-b`, `a+`, `none` or `a`
    #[error("invalid version range {text:?}: {reason}")]
    VersionRange { text: String, reason: &'static str },

    /// A field type string is empty or malformed
    #[error("invalid field type {0:?}")]
    InvalidFieldType(String),

    /// A lowercase type name that is not a known primitive
    #[error("unknown primitive type {0:?}")]
    UnknownPrimitive(String),

    /// A default value was read through an accessor for another type
    #[error("default value is not a {expected}")]
    DefaultTypeMismatch { expected: &'static str },

    /// A default value has the right shape but cannot be parsed
    #[error("invalid {kind} default {value:?}")]
    InvalidDefault { kind: &'static str, value: String },

    /// `null`, array and object defaults
    #[error("unsupported {0} default value")]
    UnsupportedDefault(&'static str),

    /// A request or response message without an api key
    #[error("message {0} has no apiKey")]
    MissingApiKey(String),
}

impl SchemaError {
    /// Wrap a serde_json error with the document it came from
    pub fn json(path: &Path, err: serde_json::Error) -> Self {
        SchemaError::Json {
            path: path.to_path_buf(),
            line: err.line(),
            column: err.column(),
            message: err.to_string(),
        }
    }
}
