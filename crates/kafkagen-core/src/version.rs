//! Protocol version ranges and minimal version conditions
//!
//! A [`VersionRange`] is parsed from one of four textual forms:
//!
//! | Text   | Shape  | `(min, max)` |
//! |--------|--------|--------------|
//! | `2-5`  | closed | `(2, 5)`     |
//! | `3+`   | open   | `(3, -1)`    |
//! | `none` | empty  | `(-1, -1)`   |
//! | `4`    | single | `(4, 4)`     |
//!
//! [`implies_true`] turns a range into the smallest test that decides whether a
//! version lies inside it, given what an enclosing range already guarantees.

use crate::error::SchemaError;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// Sentinel for an open upper bound, or for both bounds of an empty range.
pub const NO_VERSION: i16 = -1;

/// An inclusive span of protocol versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub struct VersionRange {
    pub min: i16,
    pub max: i16,
}

impl VersionRange {
    /// The range containing no versions (`none`).
    pub const EMPTY: VersionRange = VersionRange {
        min: NO_VERSION,
        max: NO_VERSION,
    };

    /// `min-max`
    pub fn closed(min: i16, max: i16) -> Self {
        Self { min, max }
    }

    /// `min+`
    pub fn open(min: i16) -> Self {
        Self {
            min,
            max: NO_VERSION,
        }
    }

    /// A single version.
    pub fn single(version: i16) -> Self {
        Self {
            min: version,
            max: version,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.min == NO_VERSION
    }

    pub fn is_open(&self) -> bool {
        !self.is_empty() && self.max == NO_VERSION
    }

    /// Whether `version` lies inside the range.
    pub fn contains(&self, version: i16) -> bool {
        if self.is_empty() || version < self.min {
            return false;
        }
        self.is_open() || version <= self.max
    }
}

impl FromStr for VersionRange {
    type Err = SchemaError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        if let Some((lo, hi)) = text.split_once('-') {
            let min = parse_version(text, lo)?;
            let max = parse_version(text, hi)?;
            if min > max {
                return Err(SchemaError::VersionRange {
                    text: text.to_string(),
                    reason: "lower bound exceeds upper bound",
                });
            }
            return Ok(Self::closed(min, max));
        }

        if let Some(lo) = text.strip_suffix('+') {
            return Ok(Self::open(parse_version(text, lo)?));
        }

        if text == "none" {
            return Ok(Self::EMPTY);
        }

        Ok(Self::single(parse_version(text, text)?))
    }
}

impl TryFrom<String> for VersionRange {
    type Error = SchemaError;

    fn try_from(text: String) -> Result<Self, Self::Error> {
        text.parse()
    }
}

impl fmt::Display for VersionRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            f.write_str("none")
        } else if self.is_open() {
            write!(f, "{}+", self.min)
        } else if self.min == self.max {
            write!(f, "{}", self.min)
        } else {
            write!(f, "{}-{}", self.min, self.max)
        }
    }
}

fn parse_version(text: &str, part: &str) -> Result<i16, SchemaError> {
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return Err(SchemaError::VersionRange {
            text: text.to_string(),
            reason: "version is not a non-negative integer",
        });
    }
    part.parse().map_err(|_| SchemaError::VersionRange {
        text: text.to_string(),
        reason: "version out of range",
    })
}

/// The minimal test deciding whether a version is inside a range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionCondition {
    Always,
    Never,
    AtLeast(i16),
    AtMost(i16),
    Between(i16, i16),
}

impl VersionCondition {
    /// Evaluate the condition for a concrete version.
    pub fn evaluate(&self, version: i16) -> bool {
        match *self {
            VersionCondition::Always => true,
            VersionCondition::Never => false,
            VersionCondition::AtLeast(min) => version >= min,
            VersionCondition::AtMost(max) => version <= max,
            VersionCondition::Between(min, max) => version >= min && version <= max,
        }
    }

    /// Render as a boolean expression over `var`.
    pub fn render(&self, var: &str) -> String {
        match *self {
            VersionCondition::Always => "true".to_string(),
            VersionCondition::Never => "false".to_string(),
            VersionCondition::AtLeast(min) => format!("{var} >= {min}"),
            VersionCondition::AtMost(max) => format!("{var} <= {max}"),
            VersionCondition::Between(min, max) => format!("{var} >= {min} && {var} <= {max}"),
        }
    }

    /// Render the negation, as used by early-return guards.
    pub fn render_negated(&self, var: &str) -> String {
        match *self {
            VersionCondition::Always => "false".to_string(),
            VersionCondition::Never => "true".to_string(),
            VersionCondition::AtLeast(min) => format!("{var} < {min}"),
            VersionCondition::AtMost(max) => format!("{var} > {max}"),
            VersionCondition::Between(min, max) => format!("{var} < {min} || {var} > {max}"),
        }
    }
}

/// Synthesize the smallest condition for "version is inside `range`", knowing
/// the version already satisfies `parent`.
///
/// Bounds shared with the parent are dropped, so a field valid for every
/// version of its message collapses to [`VersionCondition::Always`] and a field
/// touching one edge of the parent needs only a one-sided comparison.
pub fn implies_true(range: Option<&VersionRange>, parent: Option<&VersionRange>) -> VersionCondition {
    let Some(range) = range else {
        return VersionCondition::Never;
    };
    if range.is_empty() {
        return VersionCondition::Never;
    }

    let Some(parent) = parent else {
        if range.is_open() {
            return VersionCondition::AtLeast(range.min);
        }
        return VersionCondition::Between(range.min, range.max);
    };

    if range.is_open() || range.max == parent.max {
        if range.min == parent.min {
            return VersionCondition::Always;
        }
        return VersionCondition::AtLeast(range.min);
    }
    if range.min == parent.min {
        return VersionCondition::AtMost(range.max);
    }
    VersionCondition::Between(range.min, range.max)
}
