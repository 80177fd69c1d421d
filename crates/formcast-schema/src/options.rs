//! # Option Application
//!
//! Applies a node's [`Options`] to a value that has already been through
//! conversion (or bypassed it, for null and missing input):
//!
//! ```text
//! Missing/Null ─┬─ default set ──────────────► default
//!               ├─ required, Null ───────────► "required <type>, got nil"
//!               ├─ required, Missing ────────► "required <type>"
//!               └─ otherwise ────────────────► unchanged
//! present ──────── datetime, !with_offset ───► instant only
//! ```
//!
//! A configured default satisfies `required`: the default is substituted
//! before the required check could fire. Defaults are trusted and are not
//! converted or post-processed.

use formcast_core::Value;

use crate::message;
use crate::node::{Kind, SchemaNode, Shape};

/// Apply `node`'s options to `value`.
///
/// # Errors
///
/// Returns the required-missing message when a required node has no value
/// and no default.
pub fn apply_options(value: Value, node: &SchemaNode) -> Result<Value, String> {
    let options = node.options();

    if value.is_absent() {
        if let Some(default) = &options.default {
            return Ok(default.clone());
        }
        if options.required {
            return Err(match value {
                Value::Null => message::required_nil(node),
                _ => message::required_missing(node),
            });
        }
        return Ok(value);
    }

    match (node.shape(), value) {
        (Shape::Primitive(Kind::DateTime), Value::OffsetDateTime(dt, _)) if !options.with_offset => {
            Ok(Value::DateTime(dt))
        }
        (_, value) => Ok(value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};

    fn utc(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    #[test]
    fn test_optional_absent_passthrough() {
        let node = SchemaNode::string();
        assert_eq!(apply_options(Value::Missing, &node), Ok(Value::Missing));
        assert_eq!(apply_options(Value::Null, &node), Ok(Value::Null));
    }

    #[test]
    fn test_required_missing_vs_nil() {
        let node = SchemaNode::string().required();
        assert_eq!(
            apply_options(Value::Missing, &node),
            Err("required string".to_string())
        );
        assert_eq!(
            apply_options(Value::Null, &node),
            Err("required string, got nil".to_string())
        );
    }

    #[test]
    fn test_default_replaces_absent() {
        let node = SchemaNode::number().default_value(42);
        assert_eq!(apply_options(Value::Missing, &node), Ok(Value::int(42)));
        assert_eq!(apply_options(Value::Null, &node), Ok(Value::int(42)));
    }

    #[test]
    fn test_default_heals_required() {
        let node = SchemaNode::number().required().default_value(42);
        assert_eq!(apply_options(Value::Missing, &node), Ok(Value::int(42)));
        assert_eq!(apply_options(Value::Null, &node), Ok(Value::int(42)));
    }

    #[test]
    fn test_default_not_applied_to_present_value() {
        let node = SchemaNode::number().default_value(42);
        assert_eq!(apply_options(Value::int(7), &node), Ok(Value::int(7)));
    }

    #[test]
    fn test_default_is_not_revalidated() {
        let node = SchemaNode::number().default_value("not a number");
        assert_eq!(
            apply_options(Value::Missing, &node),
            Ok(Value::from("not a number"))
        );
    }

    #[test]
    fn test_with_offset_keeps_pair() {
        let dt = utc("2020-12-30T11:00:00Z");
        let node = SchemaNode::datetime().with_offset();
        assert_eq!(
            apply_options(Value::OffsetDateTime(dt, 3600), &node),
            Ok(Value::OffsetDateTime(dt, 3600))
        );
    }

    #[test]
    fn test_without_offset_drops_offset() {
        let dt = utc("2020-12-30T11:00:00Z");
        assert_eq!(
            apply_options(Value::OffsetDateTime(dt, 3600), &SchemaNode::datetime()),
            Ok(Value::DateTime(dt))
        );
    }

    #[test]
    fn test_with_offset_ignored_on_other_kinds() {
        let node = SchemaNode::string().with_offset();
        assert_eq!(apply_options("x".into(), &node), Ok("x".into()));
    }
}
