//! # Normalization Outcomes
//!
//! A successful normalization yields a [`Record`]; a failed one yields an
//! [`ErrorRecord`] holding one [`FieldError`] per offending field. Nested
//! schemas report nested error records, so callers can surface every
//! problem at once with its structure intact.
//!
//! Both serialize to plain JSON: records as objects of normalized values,
//! error records as objects whose leaves are message strings.

use std::collections::BTreeMap;
use std::fmt;

use formcast_core::{FormcastError, Map};
use serde::Serialize;

/// A normalized record: field identifier → normalized value.
pub type Record = Map;

/// Why one field failed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldError {
    /// Failure of a primitive or list field.
    Message(String),
    /// Failures inside a nested schema.
    Nested(ErrorRecord),
}

impl FieldError {
    pub fn message(msg: impl Into<String>) -> Self {
        Self::Message(msg.into())
    }

    pub fn as_message(&self) -> Option<&str> {
        match self {
            Self::Message(msg) => Some(msg),
            Self::Nested(_) => None,
        }
    }

    pub fn as_nested(&self) -> Option<&ErrorRecord> {
        match self {
            Self::Message(_) => None,
            Self::Nested(errors) => Some(errors),
        }
    }
}

impl From<String> for FieldError {
    fn from(msg: String) -> Self {
        Self::Message(msg)
    }
}

impl From<&str> for FieldError {
    fn from(msg: &str) -> Self {
        Self::Message(msg.to_string())
    }
}

impl From<ErrorRecord> for FieldError {
    fn from(errors: ErrorRecord) -> Self {
        Self::Nested(errors)
    }
}

/// Inline form: the message, or `{field: message, ...}` for nested errors.
impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Message(msg) => f.write_str(msg),
            Self::Nested(errors) => {
                f.write_str("{")?;
                for (i, (field, err)) in errors.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{field}: {err}")?;
                }
                f.write_str("}")
            }
        }
    }
}

/// Field identifier → failure. Only failed fields appear.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ErrorRecord(BTreeMap<String, FieldError>);

impl ErrorRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: impl Into<String>, error: impl Into<FieldError>) {
        self.0.insert(field.into(), error.into());
    }

    pub fn get(&self, field: &str) -> Option<&FieldError> {
        self.0.get(field)
    }

    /// Number of failed fields at this level.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldError)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn into_inner(self) -> BTreeMap<String, FieldError> {
        self.0
    }

    /// Every leaf failure as a dotted path and its message.
    pub fn flatten(&self) -> Vec<(String, &str)> {
        let mut out = Vec::new();
        self.flatten_into("", &mut out);
        out
    }

    fn flatten_into<'a>(&'a self, prefix: &str, out: &mut Vec<(String, &'a str)>) {
        for (field, err) in &self.0 {
            let path = if prefix.is_empty() {
                field.clone()
            } else {
                format!("{prefix}.{field}")
            };
            match err {
                FieldError::Message(msg) => out.push((path, msg)),
                FieldError::Nested(nested) => nested.flatten_into(&path, out),
            }
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

impl<K: Into<String>, E: Into<FieldError>> FromIterator<(K, E)> for ErrorRecord {
    fn from_iter<I: IntoIterator<Item = (K, E)>>(iter: I) -> Self {
        let mut errors = ErrorRecord::new();
        for (field, err) in iter {
            errors.insert(field, err);
        }
        errors
    }
}

/// One `path: message` line per leaf failure.
impl fmt::Display for ErrorRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (path, msg)) in self.flatten().iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "  {path}: {msg}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ErrorRecord {}
