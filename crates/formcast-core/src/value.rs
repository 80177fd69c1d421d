//! # Value Model
//!
//! `Value` is the closed set of shapes the engine accepts as input and
//! produces as output. Decoded request bodies arrive as the JSON-like
//! variants; normalization adds the temporal variants.
//!
//! ## Missing vs Null
//!
//! `Missing` means "no key in the input" and `Null` means "key present with
//! an empty value". The two are distinct variants so a legitimate null can
//! never be confused with absence; `required` and `default` depend on the
//! difference.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::ser::{SerializeSeq, SerializeTuple};
use serde::{Serialize, Serializer};
use serde_json::Number;

use crate::error::FormcastError;
use crate::temporal;

/// String-keyed map of values. Ordered so output is deterministic.
pub type Map = BTreeMap<String, Value>;

/// A loosely-typed value.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// No input key was present.
    #[default]
    Missing,
    /// Input key present with an empty value.
    Null,
    Bool(bool),
    /// Integer or floating-point number.
    Number(Number),
    Text(String),
    Seq(Vec<Value>),
    Map(Map),
    /// An instant normalized to UTC.
    DateTime(DateTime<Utc>),
    /// An instant normalized to UTC and the source offset in seconds.
    OffsetDateTime(DateTime<Utc>, i32),
    Date(NaiveDate),
}

impl Value {
    /// Integer number value.
    pub fn int(n: i64) -> Self {
        Self::Number(n.into())
    }

    /// Floating-point number value. `None` for NaN and infinities.
    pub fn float(f: f64) -> Option<Self> {
        Number::from_f64(f).map(Self::Number)
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// True for `Null` and `Missing`, the two states defaults apply to.
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Null | Self::Missing)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&Map> {
        match self {
            Self::Map(m) => Some(m),
            _ => None,
        }
    }

    /// Short name of the variant, used in diagnostics.
    pub fn shape(&self) -> &'static str {
        match self {
            Self::Missing => "missing",
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Number(_) => "number",
            Self::Text(_) => "text",
            Self::Seq(_) => "sequence",
            Self::Map(_) => "map",
            Self::DateTime(_) | Self::OffsetDateTime(..) => "datetime",
            Self::Date(_) => "date",
        }
    }

    /// Convert to a `serde_json::Value`.
    ///
    /// # Errors
    ///
    /// Returns `FormcastError::Serialization` if serialization fails.
    pub fn to_json(&self) -> Result<serde_json::Value, FormcastError> {
        Ok(serde_json::to_value(self)?)
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => Self::Number(n),
            serde_json::Value::String(s) => Self::Text(s),
            serde_json::Value::Array(items) => {
                Self::Seq(items.into_iter().map(Self::from).collect())
            }
            serde_json::Value::Object(map) => {
                Self::Map(map.into_iter().map(|(k, v)| (k, Self::from(v))).collect())
            }
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::int(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Self::int(n.into())
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Self::Seq(items)
    }
}

impl From<Map> for Value {
    fn from(map: Map) -> Self {
        Self::Map(map)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(dt: DateTime<Utc>) -> Self {
        Self::DateTime(dt)
    }
}

impl From<NaiveDate> for Value {
    fn from(date: NaiveDate) -> Self {
        Self::Date(date)
    }
}

/// Temporal values serialize as ISO-8601 text; an offset datetime is a
/// two-element `[instant, offset_seconds]` array. `Missing` serializes as
/// null, though normalized records never contain it.
impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Missing | Self::Null => serializer.serialize_unit(),
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Number(n) => n.serialize(serializer),
            Self::Text(s) => serializer.serialize_str(s),
            Self::Seq(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Self::Map(map) => serializer.collect_map(map),
            Self::DateTime(dt) => serializer.serialize_str(&temporal::format_datetime(dt)),
            Self::OffsetDateTime(dt, offset) => {
                let mut pair = serializer.serialize_tuple(2)?;
                pair.serialize_element(&temporal::format_datetime(dt))?;
                pair.serialize_element(offset)?;
                pair.end()
            }
            Self::Date(date) => serializer.serialize_str(&temporal::format_date(date)),
        }
    }
}
