//! # formcast-schema — Schema-Driven Normalization
//!
//! Converts an untyped, string-keyed parameter map into a strictly typed
//! record according to a declarative [`Schema`], or reports every
//! offending field in a structured [`ErrorRecord`].
//!
//! ```
//! use formcast_core::{Map, Value};
//! use formcast_schema::{normalize, Schema, SchemaNode};
//!
//! let schema = Schema::new()
//!     .field("age", SchemaNode::number().default_value(42))
//!     .field("name", SchemaNode::string().required());
//!
//! let mut params = Map::new();
//! params.insert("name".into(), Value::from("ana"));
//!
//! let record = normalize(&params, &schema).unwrap();
//! assert_eq!(record["age"], Value::int(42));
//!
//! let errors = normalize(&Map::new(), &schema).unwrap_err();
//! assert_eq!(errors.get("name").unwrap().to_string(), "required string");
//! ```
//!
//! ## Pipeline
//!
//! - [`normalize()`] — the driver: iterates schema fields and aggregates
//!   results without failing fast across fields.
//! - [`resolve()`] — dispatches one value on the node's shape, recursing into
//!   lists and nested schemas.
//! - [`convert()`] — per-primitive coercion rules.
//! - [`apply_options`] — `required`, `default`, `with_offset`.
//! - [`message`] — error text built from type descriptors.
//!
//! ## Schema Documents (`document`)
//!
//! Schemas can also be loaded from JSON or YAML with [`Schema::from_path`].
//!
//! ## Crate Policy
//!
//! - Depends only on `formcast-core` internally.
//! - Normalization is pure: no I/O, no shared state, no panics.
//! - Field failures are data ([`FieldError`]), never `Err` from a
//!   conversion step that aborts sibling fields.

pub mod convert;
pub mod document;
pub mod error;
pub mod message;
pub mod node;
pub mod normalize;
pub mod options;
pub mod record;
pub mod resolve;

pub use convert::convert;
pub use error::SchemaError;
pub use message::TypeName;
pub use node::{Kind, Options, Schema, SchemaNode, Shape};
pub use normalize::{normalize, Normalizer, NormalizerConfig, DEFAULT_MAX_DEPTH};
pub use options::apply_options;
pub use record::{ErrorRecord, FieldError, Record};
pub use resolve::resolve;
