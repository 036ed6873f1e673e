//! kafkagen-codegen - Rust source generation for protocol messages
//!
//! This crate turns loaded schema documents into Rust source:
//! - [`SourceFile`] is an auto-indenting buffer that validates itself with `syn`
//!   before it is atomically written
//! - [`compile_group`] and [`compile_message`] emit structs, defaults and
//!   version-gated codec impls
//!
//! # Example
//!
//! ```no_run
//! use kafkagen_codegen::{CompileOptions, compile_group};
//! use kafkagen_core::load_message;
//! use std::path::Path;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let request = load_message(Path::new("schemas/EchoRequest.json"))?;
//! let response = load_message(Path::new("schemas/EchoResponse.json"))?;
//!
//! let file = compile_group("out/echo_gen.rs", &[&request, &response], &CompileOptions::default())?;
//! file.persist()?;
//! # Ok(())
//! # }
//! ```

mod compiler;
mod emitter;
mod error;

pub use compiler::{CompileOptions, compile_group, compile_message};
pub use emitter::{BANNER, FloatFormat, SourceFile};
pub use error::{CompileError, CompileResult, SyntaxError};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{CompileError, CompileOptions, SourceFile, compile_group};
}
