//! kafkagen-core - Schema model, relaxed-JSON loader and version algebra
//!
//! This crate provides the foundational types for compiling protocol message schemas:
//! - [`JsoncReader`] strips `//` comments from a byte stream and keeps them aside
//! - [`MessageData`], [`Field`] and [`FieldType`] model one schema document
//! - [`VersionRange`] and [`implies_true`] form the version algebra
//! - [`load_message`] parses a document and applies the [`fixups`] table
//! - [`SchemaError`] for input errors

mod default;
mod error;
pub mod fixups;
mod jsonc;
mod loader;
pub mod naming;
mod schema;
mod version;

pub use default::DefaultValue;
pub use error::{SchemaError, SchemaResult};
pub use jsonc::{CommentFilter, JsoncReader, strip_comments};
pub use loader::{load_message, load_message_from_reader};
pub use schema::{CommonStruct, ElemType, Field, FieldType, MessageData, MessageKind, Primitive};
pub use version::{NO_VERSION, VersionCondition, VersionRange, implies_true};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        CommonStruct, DefaultValue, ElemType, Field, FieldType, MessageData, MessageKind,
        Primitive, SchemaError, SchemaResult, VersionCondition, VersionRange, implies_true,
        load_message,
    };
}
