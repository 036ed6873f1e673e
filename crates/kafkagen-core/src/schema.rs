//! Typed model of one message schema document

use crate::default::DefaultValue;
use crate::error::{SchemaError, SchemaResult};
use crate::version::VersionRange;
use serde::Deserialize;
use std::fmt;

/// Kind of message a document declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    Header,
    Request,
    Response,
}

impl MessageKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageKind::Header => "header",
            MessageKind::Request => "request",
            MessageKind::Response => "response",
        }
    }

    /// Suffix API message names carry (`FetchRequest`, `FetchResponse`).
    pub fn name_suffix(&self) -> Option<&'static str> {
        match self {
            MessageKind::Header => None,
            MessageKind::Request => Some("Request"),
            MessageKind::Response => Some("Response"),
        }
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Primitive wire types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    Bool,
    Int8,
    Int16,
    Int32,
    Int64,
    String,
    Bytes,
}

impl Primitive {
    /// Resolve a lowercase schema token.
    pub fn from_token(token: &str) -> SchemaResult<Self> {
        match token {
            "bool" | "boolean" => Ok(Primitive::Bool),
            "int8" => Ok(Primitive::Int8),
            "int16" => Ok(Primitive::Int16),
            "int32" => Ok(Primitive::Int32),
            "int64" => Ok(Primitive::Int64),
            "string" => Ok(Primitive::String),
            "bytes" => Ok(Primitive::Bytes),
            other => Err(SchemaError::UnknownPrimitive(other.to_string())),
        }
    }

    /// Canonical token, also the suffix of the codec method names.
    pub fn token(&self) -> &'static str {
        match self {
            Primitive::Bool => "bool",
            Primitive::Int8 => "int8",
            Primitive::Int16 => "int16",
            Primitive::Int32 => "int32",
            Primitive::Int64 => "int64",
            Primitive::String => "string",
            Primitive::Bytes => "bytes",
        }
    }

    /// Width of integer types.
    pub fn bits(&self) -> Option<u32> {
        match self {
            Primitive::Int8 => Some(8),
            Primitive::Int16 => Some(16),
            Primitive::Int32 => Some(32),
            Primitive::Int64 => Some(64),
            _ => None,
        }
    }

    /// Rust type used in generated code.
    pub fn rust_type(&self) -> &'static str {
        match self {
            Primitive::Bool => "bool",
            Primitive::Int8 => "i8",
            Primitive::Int16 => "i16",
            Primitive::Int32 => "i32",
            Primitive::Int64 => "i64",
            Primitive::String => "String",
            Primitive::Bytes => "Vec<u8>",
        }
    }
}

/// Element type of a field, resolved once at load time.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ElemType {
    Primitive(Primitive),
    /// Reference to a nested or common structure.
    Struct(String),
}

impl ElemType {
    /// Lowercase first byte means primitive, anything else names a structure.
    pub fn parse(name: &str) -> SchemaResult<Self> {
        match name.as_bytes().first() {
            None => Err(SchemaError::InvalidFieldType(name.to_string())),
            Some(b'a'..=b'z') => Primitive::from_token(name).map(ElemType::Primitive),
            Some(_) => Ok(ElemType::Struct(name.to_string())),
        }
    }

    pub fn struct_name(&self) -> Option<&str> {
        match self {
            ElemType::Struct(name) => Some(name),
            ElemType::Primitive(_) => None,
        }
    }
}

impl fmt::Display for ElemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElemType::Primitive(p) => f.write_str(p.token()),
            ElemType::Struct(name) => f.write_str(name),
        }
    }
}

/// A field type: `Elem` or `[]Elem`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub struct FieldType {
    pub elem: ElemType,
    pub array: bool,
}

impl FieldType {
    pub fn scalar(elem: ElemType) -> Self {
        Self { elem, array: false }
    }

    pub fn array_of(elem: ElemType) -> Self {
        Self { elem, array: true }
    }
}

impl TryFrom<String> for FieldType {
    type Error = SchemaError;

    fn try_from(text: String) -> Result<Self, Self::Error> {
        let (array, elem) = match text.strip_prefix("[]") {
            Some(rest) if !rest.is_empty() => (true, rest),
            Some(_) => return Err(SchemaError::InvalidFieldType(text)),
            None => (false, text.as_str()),
        };
        Ok(Self {
            elem: ElemType::parse(elem)?,
            array,
        })
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.array {
            f.write_str("[]")?;
        }
        self.elem.fmt(f)
    }
}

/// One field of a message or structure.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Field {
    pub name: String,
    #[serde(default)]
    pub about: String,
    #[serde(rename = "type")]
    pub ty: FieldType,
    /// Versions the field is present in; unset means never.
    #[serde(default)]
    pub versions: Option<VersionRange>,
    #[serde(default)]
    pub tagged_versions: Option<VersionRange>,
    #[serde(default)]
    pub nullable_versions: Option<VersionRange>,
    #[serde(default)]
    pub flexible_versions: Option<VersionRange>,
    #[serde(default)]
    pub fields: Vec<Field>,
    #[serde(default)]
    pub default: DefaultValue,
    #[serde(default)]
    pub tag: Option<i32>,
    #[serde(default)]
    pub entity_type: String,
    #[serde(default)]
    pub map_key: bool,
    #[serde(default)]
    pub ignorable: bool,
}

impl Field {
    /// Whether the field declares its structure inline.
    pub fn has_nested_struct(&self) -> bool {
        matches!(self.ty.elem, ElemType::Struct(_)) && !self.fields.is_empty()
    }
}

/// A structure shared by reference within one document.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CommonStruct {
    pub name: String,
    #[serde(default)]
    pub versions: Option<VersionRange>,
    #[serde(default)]
    pub fields: Vec<Field>,
}

/// A whole schema document.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct MessageData {
    #[serde(default)]
    pub api_key: Option<i16>,
    #[serde(rename = "type")]
    pub kind: MessageKind,
    pub name: String,
    #[serde(default)]
    pub valid_versions: Option<VersionRange>,
    #[serde(default)]
    pub flexible_versions: Option<VersionRange>,
    #[serde(default)]
    pub fields: Vec<Field>,
    #[serde(default)]
    pub common_structs: Vec<CommonStruct>,
    /// `//` comment text collected while reading the document.
    #[serde(skip)]
    pub comments: String,
}

impl MessageData {
    /// Name with the kind suffix removed (`FetchRequest` -> `Fetch`).
    ///
    /// Returns the full name when the suffix is missing.
    pub fn base_name(&self) -> &str {
        self.kind
            .name_suffix()
            .and_then(|suffix| self.name.strip_suffix(suffix))
            .unwrap_or(&self.name)
    }

    pub fn is_api(&self) -> bool {
        matches!(self.kind, MessageKind::Request | MessageKind::Response)
    }

    /// Look up a common structure by name.
    pub fn common_struct(&self, name: &str) -> Option<&CommonStruct> {
        self.common_structs.iter().find(|s| s.name == name)
    }
}
