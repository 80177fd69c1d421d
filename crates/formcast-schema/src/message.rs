//! # Error Message Formatting
//!
//! Field error strings are built from a type descriptor, never from the
//! offending value:
//!
//! | situation                        | message                          |
//! |----------------------------------|----------------------------------|
//! | value cannot be coerced          | `expected number`                |
//! | temporal text fails to parse     | `expected datetime (missing_offset)` |
//! | list or list element rejected    | `expected string list`           |
//! | required, key absent             | `required string list`           |
//! | required, explicit null          | `required string, got nil`       |

use std::fmt;

use crate::node::{Kind, SchemaNode, Shape};

/// Human-readable type descriptor of a shape: the kind name for
/// primitives, `<inner> list` for lists, `map` for nested schemas.
#[derive(Debug, Clone, Copy)]
pub struct TypeName<'a>(&'a Shape);

impl<'a> TypeName<'a> {
    pub fn new(shape: &'a Shape) -> Self {
        Self(shape)
    }
}

impl fmt::Display for TypeName<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Shape::Primitive(kind) => write!(f, "{kind}"),
            Shape::ListOf(inner) => write!(f, "{} list", inner.type_name()),
            Shape::Map(_) => f.write_str("map"),
        }
    }
}

pub(crate) fn expected(node: &SchemaNode) -> String {
    format!("expected {}", node.type_name())
}

pub(crate) fn expected_kind(kind: Kind) -> String {
    format!("expected {kind}")
}

pub(crate) fn expected_with_reason(kind: Kind, reason: impl fmt::Display) -> String {
    format!("expected {kind} ({reason})")
}

pub(crate) fn required_missing(node: &SchemaNode) -> String {
    format!("required {}", node.type_name())
}

pub(crate) fn required_nil(node: &SchemaNode) -> String {
    format!("required {}, got nil", node.type_name())
}

pub(crate) fn depth_exceeded(max_depth: usize) -> String {
    format!("exceeds maximum nesting depth of {max_depth}")
}
