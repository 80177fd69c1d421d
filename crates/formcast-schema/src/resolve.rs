//! # Schema Node Resolver
//!
//! Dispatches one value against one node:
//!
//! 1. Null or missing input skips conversion for every shape; options
//!    decide the outcome.
//! 2. Primitives are converted, then options are applied.
//! 3. Lists require a sequence. Elements are resolved in order and the
//!    first failing element aborts the field with `expected <type> list`;
//!    the element's own message is not surfaced, except when the element
//!    crossed the nesting ceiling, which is reported as such.
//! 4. Nested maps require a map and run the full driver on it. Their
//!    error record is propagated as-is, not flattened into text.

use formcast_core::Value;

use crate::convert::convert;
use crate::message;
use crate::node::{SchemaNode, Shape};
use crate::normalize::Normalizer;
use crate::options::apply_options;
use crate::record::FieldError;

impl Normalizer {
    /// Resolve a single value against a single node.
    ///
    /// A `Value::Missing` result means the field should be omitted.
    ///
    /// # Errors
    ///
    /// Returns the field's failure description.
    pub fn resolve(&self, value: &Value, node: &SchemaNode) -> Result<Value, FieldError> {
        self.resolve_at(value, node, 0)
    }

    pub(crate) fn resolve_at(
        &self,
        value: &Value,
        node: &SchemaNode,
        depth: usize,
    ) -> Result<Value, FieldError> {
        if value.is_absent() {
            return apply_options(value.clone(), node).map_err(FieldError::Message);
        }

        match node.shape() {
            Shape::Primitive(kind) => convert(value, *kind)
                .and_then(|converted| apply_options(converted, node))
                .map_err(FieldError::Message),

            Shape::ListOf(inner) => {
                let Value::Seq(items) = value else {
                    return Err(message::expected(node).into());
                };
                self.check_depth(depth)?;

                let mut resolved = Vec::with_capacity(items.len());
                for item in items {
                    match self.resolve_at(item, inner, depth + 1) {
                        Ok(v) => resolved.push(v),
                        Err(err) if self.hit_depth_limit(&err) => {
                            return Err(message::depth_exceeded(self.config().max_depth).into())
                        }
                        Err(_) => return Err(message::expected(node).into()),
                    }
                }
                apply_options(Value::Seq(resolved), node).map_err(FieldError::Message)
            }

            Shape::Map(schema) => {
                let Value::Map(params) = value else {
                    return Err(message::expected(node).into());
                };
                self.check_depth(depth)?;

                let record = self
                    .normalize_at(params, schema, depth + 1)
                    .map_err(FieldError::Nested)?;
                apply_options(Value::Map(record), node).map_err(FieldError::Message)
            }
        }
    }

    fn check_depth(&self, depth: usize) -> Result<(), FieldError> {
        if depth >= self.config().max_depth {
            tracing::warn!(
                max_depth = self.config().max_depth,
                "schema nesting exceeds configured depth"
            );
            return Err(message::depth_exceeded(self.config().max_depth).into());
        }
        Ok(())
    }

    fn hit_depth_limit(&self, err: &FieldError) -> bool {
        let limit = message::depth_exceeded(self.config().max_depth);
        match err {
            FieldError::Message(msg) => *msg == limit,
            FieldError::Nested(record) => record.flatten().iter().any(|(_, msg)| *msg == limit),
        }
    }
}

/// Resolve a single value against a single node with the default
/// configuration.
///
/// # Errors
///
/// Returns the field's failure description.
pub fn resolve(value: &Value, node: &SchemaNode) -> Result<Value, FieldError> {
    Normalizer::default().resolve(value, node)
}
