//! # kafkagen
//!
//! Compile Kafka-style JSON message schemas into Rust.
//!
//! kafkagen reads the relaxed-JSON message definitions used by Kafka-style
//! protocols and emits, per request/response pair:
//! - plain structs with serde derives and schema defaults
//! - version-gated `decode`/`encode` implementations
//! - `is_version_valid`/`is_version_flexible` predicates and the API key
//!
//! ## Build script usage
//!
//! ```no_run
//! use kafkagen::prelude::*;
//!
//! let out_dir = std::env::var("OUT_DIR").unwrap();
//! let options = GeneratorOptions::default();
//! let report = Generator::new(out_dir, options).run(&["schemas/EchoRequest.json", "schemas/EchoResponse.json"]);
//! assert!(report.is_clean());
//! ```
//!
//! ## Crate Structure
//!
//! This is a facade crate that re-exports from:
//! - [`kafkagen_core`] - Relaxed JSON, schema model, version algebra, loader
//! - [`kafkagen_codegen`] - Source emission and the message compiler
//! - [`kafkagen_runtime`] - Concurrent grouping and generation runs
//! - [`kafkagen_logging`] - Tracing subscriber setup
//! - [`kafkagen_protocol`] - Wire codec used by generated code

// Re-export schema types
pub use kafkagen_core::{
    DefaultValue, ElemType, Field, FieldType, MessageData, MessageKind, Primitive, SchemaError,
    SchemaResult, VersionCondition, VersionRange, implies_true, load_message,
};

// Re-export compiler types
pub use kafkagen_codegen::{
    CompileError, CompileOptions, CompileResult, SourceFile, compile_group, compile_message,
};

// Re-export runtime types
pub use kafkagen_runtime::{GenerateError, GenerateResult, Generator, GeneratorOptions, RunReport};

pub use kafkagen_logging::{LogLevel, init_logging};

// Re-export the wire codec
pub use kafkagen_protocol::{CodecError, Decoder, Encoder, Message};

pub use kafkagen_codegen;
pub use kafkagen_core;
pub use kafkagen_protocol;
pub use kafkagen_runtime;
pub use tracing;

/// Prelude module for convenient imports.
///
/// Use `use kafkagen::prelude::*;` to bring the generation entry points and
/// the codec trait into scope.
pub mod prelude {
    pub use crate::{
        CompileOptions, Generator, GeneratorOptions, LogLevel, Message, RunReport, init_logging,
        load_message,
    };
}
