//! Lazily-typed field default values
//!
//! Schema documents write defaults as JSON booleans, numbers or strings
//! (`"default": "-1"`, `"default": true`). The value keeps its JSON tag and is
//! only coerced when the compiler asks for a concrete type.

use crate::error::{SchemaError, SchemaResult};
use serde::de::{self, Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};
use std::fmt;

/// A field default, tagged with the JSON shape it was written in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DefaultValue {
    #[default]
    Absent,
    False,
    True,
    /// A JSON number, kept as its literal text.
    Number(String),
    /// A JSON string.
    Str(String),
}

impl DefaultValue {
    /// Read the default as a boolean.
    ///
    /// Strings are accepted when they spell a boolean (`"true"`, `"0"`, `"F"`, ...).
    pub fn as_bool(&self) -> SchemaResult<bool> {
        match self {
            DefaultValue::Absent | DefaultValue::False => Ok(false),
            DefaultValue::True => Ok(true),
            DefaultValue::Str(text) => parse_bool(text).ok_or_else(|| SchemaError::InvalidDefault {
                kind: "boolean",
                value: text.clone(),
            }),
            DefaultValue::Number(_) => Err(SchemaError::DefaultTypeMismatch {
                expected: "boolean",
            }),
        }
    }

    /// Read the default as a signed integer of `bits` width.
    ///
    /// Numbers and numeric strings are accepted, with `0x`, `0o`, `0b` and
    /// leading-zero octal prefixes.
    pub fn as_int(&self, bits: u32) -> SchemaResult<i64> {
        match self {
            DefaultValue::Absent => Ok(0),
            DefaultValue::Str(text) if text == "null" => Ok(0),
            DefaultValue::Number(text) | DefaultValue::Str(text) => {
                parse_int(text, bits).ok_or_else(|| SchemaError::InvalidDefault {
                    kind: "integer",
                    value: text.clone(),
                })
            }
            DefaultValue::False | DefaultValue::True => Err(SchemaError::DefaultTypeMismatch {
                expected: "integer",
            }),
        }
    }

    /// Read the default as a string.
    pub fn as_str(&self) -> SchemaResult<&str> {
        match self {
            DefaultValue::Absent => Ok(""),
            DefaultValue::Str(text) => Ok(text),
            _ => Err(SchemaError::DefaultTypeMismatch { expected: "string" }),
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, DefaultValue::Absent)
    }
}

fn parse_bool(text: &str) -> Option<bool> {
    match text {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}

fn parse_int(text: &str, bits: u32) -> Option<i64> {
    let (negative, unsigned) = match text.as_bytes().first()? {
        b'-' => (true, &text[1..]),
        b'+' => (false, &text[1..]),
        _ => (false, text),
    };

    let (radix, digits) = if let Some(rest) = strip_radix_prefix(unsigned, 'x') {
        (16, rest)
    } else if let Some(rest) = strip_radix_prefix(unsigned, 'o') {
        (8, rest)
    } else if let Some(rest) = strip_radix_prefix(unsigned, 'b') {
        (2, rest)
    } else if unsigned.len() > 1 && unsigned.starts_with('0') {
        (8, &unsigned[1..])
    } else {
        (10, unsigned)
    };

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_alphanumeric()) {
        return None;
    }
    let magnitude = i128::from(u64::from_str_radix(digits, radix).ok()?);
    let value = if negative { -magnitude } else { magnitude };

    let bits = bits.clamp(1, 64);
    let min = -(1i128 << (bits - 1));
    let max = (1i128 << (bits - 1)) - 1;
    if value < min || value > max {
        return None;
    }
    i64::try_from(value).ok()
}

fn strip_radix_prefix(text: &str, letter: char) -> Option<&str> {
    let rest = text.strip_prefix('0')?;
    rest.strip_prefix(letter)
        .or_else(|| rest.strip_prefix(letter.to_ascii_uppercase()))
}

impl<'de> Deserialize<'de> for DefaultValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(DefaultVisitor)
    }
}

struct DefaultVisitor;

impl<'de> Visitor<'de> for DefaultVisitor {
    type Value = DefaultValue;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a boolean, number or string default")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
        Ok(if v {
            DefaultValue::True
        } else {
            DefaultValue::False
        })
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(DefaultValue::Number(v.to_string()))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(DefaultValue::Number(v.to_string()))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        Ok(DefaultValue::Number(v.to_string()))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(DefaultValue::Str(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
        Ok(DefaultValue::Str(v))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Err(E::custom(SchemaError::UnsupportedDefault("null")))
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Err(E::custom(SchemaError::UnsupportedDefault("null")))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, _seq: A) -> Result<Self::Value, A::Error> {
        Err(de::Error::custom(SchemaError::UnsupportedDefault("array")))
    }

    fn visit_map<A: MapAccess<'de>>(self, _map: A) -> Result<Self::Value, A::Error> {
        Err(de::Error::custom(SchemaError::UnsupportedDefault("object")))
    }
}
