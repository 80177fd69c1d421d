//! # Schema Errors
//!
//! Errors raised while *building* a schema from a document. Failures of
//! input data during normalization are not errors in this sense; they are
//! reported as an [`ErrorRecord`](crate::ErrorRecord).
//!
//! Paths are dotted field paths into the schema document, with `[]`
//! marking a list element type and `(root)` for the document itself.

use thiserror::Error;

/// Error while loading or interpreting a schema document.
#[derive(Error, Debug)]
pub enum SchemaError {
    /// A type name that is not one of the primitive kinds.
    #[error("unknown type '{name}' at '{path}'")]
    UnknownType {
        /// Path to the offending node.
        path: String,
        /// The unrecognized type name.
        name: String,
    },

    /// A list type with other than exactly one element type.
    #[error("list type at '{path}' must have exactly one element type, found {len}")]
    ListArity {
        /// Path to the offending node.
        path: String,
        /// Number of element types given.
        len: usize,
    },

    /// A known option with a value of the wrong type or in the wrong place.
    #[error("invalid option '{option}' at '{path}': {reason}")]
    InvalidOption {
        /// Path to the offending node.
        path: String,
        /// Option name.
        option: String,
        /// Why the value was rejected.
        reason: String,
    },

    /// An option key that is not recognized.
    #[error("unknown option '{option}' at '{path}'")]
    UnknownOption {
        /// Path to the offending node.
        path: String,
        /// Option name.
        option: String,
    },

    /// A node that is neither a type name, a list, nor a map.
    #[error("invalid schema node at '{path}': {reason}")]
    InvalidNode {
        /// Path to the offending node.
        path: String,
        /// Description of what was found.
        reason: String,
    },

    /// The schema document could not be read or parsed.
    #[error("schema load error for '{path}': {reason}")]
    Load {
        /// Document path or source description.
        path: String,
        /// Reason the document could not be loaded.
        reason: String,
    },
}

impl SchemaError {
    /// Replace the node path, for errors raised before the path was known.
    pub(crate) fn at(self, at: &str) -> Self {
        match self {
            Self::UnknownType { name, .. } => Self::UnknownType {
                path: at.to_string(),
                name,
            },
            other => other,
        }
    }
}
