//! # Schema Model
//!
//! A [`Schema`] maps field identifiers to [`SchemaNode`]s. Each node is a
//! closed [`Shape`] (primitive, list of one inner node, or nested schema)
//! plus an [`Options`] bag. Illegal shapes cannot be constructed, so the
//! resolver matches exhaustively and never inspects shapes at runtime.
//!
//! Schemas are immutable once built and are `Send + Sync`; one schema can
//! serve any number of concurrent normalization calls.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use formcast_core::Value;
use serde::{Deserialize, Serialize};

use crate::error::SchemaError;
use crate::message::TypeName;

/// Primitive target types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    String,
    Number,
    Boolean,
    DateTime,
    Date,
}

impl Kind {
    /// All primitive kinds.
    pub const ALL: [Kind; 5] = [
        Kind::String,
        Kind::Number,
        Kind::Boolean,
        Kind::DateTime,
        Kind::Date,
    ];

    /// The lowercase name used in schema documents and error messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            Kind::String => "string",
            Kind::Number => "number",
            Kind::Boolean => "boolean",
            Kind::DateTime => "datetime",
            Kind::Date => "date",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Kind {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Kind::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| SchemaError::UnknownType {
                path: String::new(),
                name: s.to_string(),
            })
    }
}

/// The structural part of a schema node.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Primitive(Kind),
    /// Every element of an input sequence is resolved against the inner node.
    ListOf(Box<SchemaNode>),
    /// A sub-schema normalized like the top level.
    Map(Schema),
}

/// Per-node options.
///
/// `with_offset` only has an effect on `datetime` nodes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Options {
    pub required: bool,
    /// Substituted for null or missing input. Not re-validated.
    pub default: Option<Value>,
    pub with_offset: bool,
}

/// One field's expected shape and options.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaNode {
    shape: Shape,
    options: Options,
}

impl SchemaNode {
    pub fn new(shape: Shape, options: Options) -> Self {
        Self { shape, options }
    }

    pub fn primitive(kind: Kind) -> Self {
        Shape::Primitive(kind).into()
    }

    pub fn string() -> Self {
        Self::primitive(Kind::String)
    }

    pub fn number() -> Self {
        Self::primitive(Kind::Number)
    }

    pub fn boolean() -> Self {
        Self::primitive(Kind::Boolean)
    }

    pub fn datetime() -> Self {
        Self::primitive(Kind::DateTime)
    }

    pub fn date() -> Self {
        Self::primitive(Kind::Date)
    }

    /// A list whose elements are resolved against `inner`.
    pub fn list(inner: SchemaNode) -> Self {
        Shape::ListOf(Box::new(inner)).into()
    }

    /// A nested map normalized against `schema`.
    pub fn map(schema: Schema) -> Self {
        Shape::Map(schema).into()
    }

    /// Mark the node as required.
    #[must_use]
    pub fn required(mut self) -> Self {
        self.options.required = true;
        self
    }

    /// Value used when the input is null or missing.
    #[must_use]
    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.options.default = Some(value.into());
        self
    }

    /// Keep the source offset alongside datetime values.
    #[must_use]
    pub fn with_offset(mut self) -> Self {
        self.options.with_offset = true;
        self
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// The type descriptor used in error messages.
    pub fn type_name(&self) -> TypeName<'_> {
        TypeName::new(&self.shape)
    }

    /// Nesting depth of this node: 0 for primitives, +1 per list or map level.
    pub fn depth(&self) -> usize {
        match &self.shape {
            Shape::Primitive(_) => 0,
            Shape::ListOf(inner) => 1 + inner.depth(),
            Shape::Map(schema) => 1 + schema.depth(),
        }
    }
}

impl From<Shape> for SchemaNode {
    fn from(shape: Shape) -> Self {
        Self::new(shape, Options::default())
    }
}

impl From<Kind> for SchemaNode {
    fn from(kind: Kind) -> Self {
        Self::primitive(kind)
    }
}

/// Renders the type descriptor followed by any set options, e.g.
/// `string list (required)` or `datetime (with_offset)`.
impl fmt::Display for SchemaNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.type_name())?;
        let mut flags = Vec::new();
        if self.options.required {
            flags.push("required".to_string());
        }
        if let Some(default) = &self.options.default {
            let rendered = serde_json::to_string(default).unwrap_or_else(|_| "?".into());
            flags.push(format!("default: {rendered}"));
        }
        if self.options.with_offset {
            flags.push("with_offset".to_string());
        }
        if !flags.is_empty() {
            write!(f, " ({})", flags.join(", "))?;
        }
        Ok(())
    }
}

/// Field identifier → node.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schema {
    fields: BTreeMap<String, SchemaNode>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style field insertion.
    #[must_use]
    pub fn field(mut self, name: impl Into<String>, node: impl Into<SchemaNode>) -> Self {
        self.insert(name, node);
        self
    }

    /// Insert or replace a field, returning the previous node.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        node: impl Into<SchemaNode>,
    ) -> Option<SchemaNode> {
        self.fields.insert(name.into(), node.into())
    }

    pub fn get(&self, name: &str) -> Option<&SchemaNode> {
        self.fields.get(name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Fields in identifier order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &SchemaNode)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Deepest nesting of any field (0 for a flat schema).
    pub fn depth(&self) -> usize {
        self.fields.values().map(SchemaNode::depth).max().unwrap_or(0)
    }
}

impl<K: Into<String>, N: Into<SchemaNode>> FromIterator<(K, N)> for Schema {
    fn from_iter<I: IntoIterator<Item = (K, N)>>(iter: I) -> Self {
        let mut schema = Schema::new();
        for (name, node) in iter {
            schema.insert(name, node);
        }
        schema
    }
}
