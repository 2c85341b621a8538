//! Typed property values.
//!
//! Every property stored on an object carries exactly one [`Value`]. The
//! variant is chosen by the property type that coerced the raw input, so a
//! number property configured as `integer` always produces
//! [`Value::Integer`], a multi-select list produces [`Value::StringList`],
//! and so on.

use crate::{Error, Result};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Canonical textual form of dates (independent of any property's display
/// pattern). Used when values are rendered as text or written to XML.
pub const CANONICAL_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Separator used by the canonical textual form of list values.
const LIST_SEPARATOR: char = '|';

/// The payload of one object property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Value {
    String(String),
    /// Unbounded text (text areas, templates).
    LargeString(String),
    Integer(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Date(NaiveDateTime),
    StringList(Vec<String>),
    /// A list kept in relational storage, one row per item.
    DbStringList(Vec<String>),
}

/// Discriminant of [`Value`], used to decode textual values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    String,
    LargeString,
    Integer,
    Long,
    Float,
    Double,
    Date,
    StringList,
    DbStringList,
}

impl ValueKind {
    /// Whether values of this kind hold several items.
    #[must_use]
    pub const fn is_list(self) -> bool {
        matches!(self, Self::StringList | Self::DbStringList)
    }
}

impl Value {
    /// Returns the discriminant of this value.
    #[must_use]
    pub const fn kind(&self) -> ValueKind {
        match self {
            Self::String(_) => ValueKind::String,
            Self::LargeString(_) => ValueKind::LargeString,
            Self::Integer(_) => ValueKind::Integer,
            Self::Long(_) => ValueKind::Long,
            Self::Float(_) => ValueKind::Float,
            Self::Double(_) => ValueKind::Double,
            Self::Date(_) => ValueKind::Date,
            Self::StringList(_) => ValueKind::StringList,
            Self::DbStringList(_) => ValueKind::DbStringList,
        }
    }

    /// Renders the canonical textual form of this value.
    ///
    /// Lists are joined with `|`, dates use [`CANONICAL_DATE_FORMAT`].
    #[must_use]
    pub fn to_text(&self) -> String {
        match self {
            Self::String(s) | Self::LargeString(s) => s.clone(),
            Self::Integer(n) => n.to_string(),
            Self::Long(n) => n.to_string(),
            Self::Float(n) => n.to_string(),
            Self::Double(n) => n.to_string(),
            Self::Date(d) => d.format(CANONICAL_DATE_FORMAT).to_string(),
            Self::StringList(items) | Self::DbStringList(items) => {
                items.join(&LIST_SEPARATOR.to_string())
            }
        }
    }

    /// Parses the canonical textual form produced by [`Value::to_text`].
    pub fn parse_as(kind: ValueKind, text: &str) -> Result<Self> {
        let number = |t: &str| t.trim().to_string();
        Ok(match kind {
            ValueKind::String => Self::String(text.to_string()),
            ValueKind::LargeString => Self::LargeString(text.to_string()),
            ValueKind::Integer => Self::Integer(
                number(text)
                    .parse()
                    .map_err(|_| Error::InvalidNumber(text.to_string()))?,
            ),
            ValueKind::Long => Self::Long(
                number(text)
                    .parse()
                    .map_err(|_| Error::InvalidNumber(text.to_string()))?,
            ),
            ValueKind::Float => Self::Float(
                number(text)
                    .parse()
                    .map_err(|_| Error::InvalidNumber(text.to_string()))?,
            ),
            ValueKind::Double => Self::Double(
                number(text)
                    .parse()
                    .map_err(|_| Error::InvalidNumber(text.to_string()))?,
            ),
            ValueKind::Date => Self::Date(
                NaiveDateTime::parse_from_str(text.trim(), CANONICAL_DATE_FORMAT)
                    .map_err(|_| Error::InvalidDate(text.to_string()))?,
            ),
            ValueKind::StringList => Self::StringList(split_list(text)),
            ValueKind::DbStringList => Self::DbStringList(split_list(text)),
        })
    }

    /// Returns the string payload of text values.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) | Self::LargeString(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the items of list values.
    #[must_use]
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Self::StringList(items) | Self::DbStringList(items) => Some(items),
            _ => None,
        }
    }

    /// Returns integral values widened to `i64`.
    #[must_use]
    pub const fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(n) => Some(*n as i64),
            Self::Long(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns any numeric value as `f64`.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Integer(n) => Some(f64::from(*n)),
            Self::Long(n) => Some(*n as f64),
            Self::Float(n) => Some(f64::from(*n)),
            Self::Double(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the date payload.
    #[must_use]
    pub const fn as_date(&self) -> Option<&NaiveDateTime> {
        match self {
            Self::Date(d) => Some(d),
            _ => None,
        }
    }

    /// Returns the value as a list of items: lists as-is, everything else
    /// as a single-item list of its text.
    #[must_use]
    pub fn items(&self) -> Vec<String> {
        match self {
            Self::StringList(items) | Self::DbStringList(items) => items.clone(),
            other => vec![other.to_text()],
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Self::Integer(n)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::Long(n)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Double(n)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(d: NaiveDateTime) -> Self {
        Self::Date(d)
    }
}

impl From<Vec<String>> for Value {
    fn from(items: Vec<String>) -> Self {
        Self::StringList(items)
    }
}

fn split_list(text: &str) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }
    text.split(LIST_SEPARATOR).map(str::to_string).collect()
}
