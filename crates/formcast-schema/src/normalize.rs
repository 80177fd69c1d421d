//! # Normalization Driver
//!
//! Walks a [`Schema`], looks up each field in the input parameters, resolves
//! it, and aggregates the results. Every field is processed independently:
//! one field's failure never stops its siblings from being checked, so the
//! error record lists every offending field.
//!
//! ## Outcome
//!
//! - No failures → `Ok(record)` holding only schema fields. Input keys the
//!   schema does not name are dropped. Fields that resolved to `Missing`
//!   (no input, no default, not required) are omitted; explicit nulls stay.
//! - Any failure anywhere in the tree → `Err(errors)`. The partially built
//!   record is discarded.
//!
//! ## Resource Limits
//!
//! Recursion follows schema nesting. [`NormalizerConfig::max_depth`] caps
//! it for schemas that may be attacker-influenced. The field that crosses
//! the ceiling fails with `exceeds maximum nesting depth of N`, also when
//! the crossing happens inside a list element.

use formcast_core::{Map, Value};
use serde::{Deserialize, Serialize};

use crate::node::Schema;
use crate::record::{ErrorRecord, Record};

/// Default ceiling on list/map nesting.
pub const DEFAULT_MAX_DEPTH: usize = 32;

static MISSING: Value = Value::Missing;

/// Normalizer configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizerConfig {
    /// Maximum number of nested list/map levels below the top-level schema.
    pub max_depth: usize,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Stateless normalizer carrying its configuration.
///
/// Cheap to copy and safe to share across threads; each call allocates its
/// own output.
#[derive(Debug, Clone, Copy, Default)]
pub struct Normalizer {
    config: NormalizerConfig,
}

impl Normalizer {
    pub fn new(config: NormalizerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &NormalizerConfig {
        &self.config
    }

    /// Normalize `params` against `schema`.
    ///
    /// # Errors
    ///
    /// Returns the error record of every field that failed.
    pub fn normalize(&self, params: &Map, schema: &Schema) -> Result<Record, ErrorRecord> {
        let outcome = self.normalize_at(params, schema, 0);
        match &outcome {
            Ok(record) => tracing::debug!(
                fields = schema.len(),
                present = record.len(),
                "normalization succeeded"
            ),
            Err(errors) => tracing::debug!(
                fields = schema.len(),
                failed = errors.len(),
                "normalization rejected"
            ),
        }
        outcome
    }

    pub(crate) fn normalize_at(
        &self,
        params: &Map,
        schema: &Schema,
        depth: usize,
    ) -> Result<Record, ErrorRecord> {
        let mut record = Record::new();
        let mut errors = ErrorRecord::new();

        for (field, node) in schema.iter() {
            let value = params.get(field).unwrap_or(&MISSING);
            match self.resolve_at(value, node, depth) {
                Ok(Value::Missing) => {}
                Ok(value) => {
                    record.insert(field.to_string(), value);
                }
                Err(err) => {
                    tracing::trace!(field, depth, error = %err, "field rejected");
                    errors.insert(field, err);
                }
            }
        }

        if errors.is_empty() {
            Ok(record)
        } else {
            Err(errors)
        }
    }
}

/// Normalize `params` against `schema` with the default configuration.
///
/// # Errors
///
/// Returns the error record of every field that failed.
pub fn normalize(params: &Map, schema: &Schema) -> Result<Record, ErrorRecord> {
    Normalizer::default().normalize(params, schema)
}
