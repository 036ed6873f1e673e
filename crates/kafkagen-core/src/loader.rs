//! Schema document loading

use crate::error::{SchemaError, SchemaResult};
use crate::fixups::apply_fixups;
use crate::jsonc::JsoncReader;
use crate::schema::MessageData;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Load one schema document from disk.
///
/// The document is read through [`JsoncReader`], deserialized strictly
/// (unknown keys are errors) and normalized by [`crate::fixups`].
pub fn load_message(path: &Path) -> SchemaResult<MessageData> {
    let file = File::open(path).map_err(|source| SchemaError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_message_from_reader(BufReader::new(file), path)
}

/// Load a schema document from any reader; `origin` is used in errors.
pub fn load_message_from_reader<R: Read>(reader: R, origin: &Path) -> SchemaResult<MessageData> {
    let mut reader = JsoncReader::new(reader);
    let mut msg: MessageData =
        serde_json::from_reader(&mut reader).map_err(|e| SchemaError::json(origin, e))?;

    if msg.is_api() && msg.api_key.is_none() {
        return Err(SchemaError::MissingApiKey(msg.name));
    }

    msg.comments = String::from_utf8_lossy(&reader.into_comments()).into_owned();
    apply_fixups(&mut msg);

    tracing::debug!(
        path = %origin.display(),
        name = %msg.name,
        kind = %msg.kind,
        fields = msg.fields.len(),
        "loaded schema"
    );
    Ok(msg)
}
