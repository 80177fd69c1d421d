//! # Schema Documents
//!
//! Builds a [`Schema`] from a JSON or YAML document so schemas can live in
//! configuration rather than code.
//!
//! ## Format
//!
//! ```yaml
//! name: string                      # primitive by name
//! tags: [string]                    # list of one element type
//! age: { type: number, default: 42 }
//! created: { type: datetime, with_offset: true, required: true }
//! address:                          # nested map
//!   street: string
//!   zip: number
//! ```
//!
//! - A string names a primitive: `string`, `number`, `boolean`, `datetime`,
//!   `date`.
//! - A one-element array is a list of that element's node.
//! - An object with a `type` key is a typed node; the other keys are
//!   options (`required`, `default`, `with_offset`). Unknown keys are
//!   rejected.
//! - Any other object is a nested map. An object in `type` position is
//!   always a nested map, so a sub-schema with a field called `type` is
//!   written `{ type: { type: string } }`.

use std::path::Path;

use formcast_core::Value;
use serde_json::Value as Json;

use crate::error::SchemaError;
use crate::node::{Kind, Options, Schema, SchemaNode, Shape};

const ROOT: &str = "(root)";

impl Schema {
    /// Build a schema from a parsed JSON document. The root must be an
    /// object mapping field names to nodes.
    ///
    /// # Errors
    ///
    /// Returns a [`SchemaError`] naming the path of the first invalid node.
    pub fn from_json(doc: &Json) -> Result<Self, SchemaError> {
        match doc {
            Json::Object(fields) => parse_fields(fields, ""),
            other => Err(SchemaError::InvalidNode {
                path: ROOT.to_string(),
                reason: format!("expected a map of fields, found {}", json_kind(other)),
            }),
        }
    }

    /// Build a schema from JSON text.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::Load` for malformed JSON, otherwise as
    /// [`Schema::from_json`].
    pub fn from_json_str(s: &str) -> Result<Self, SchemaError> {
        let doc: Json = serde_json::from_str(s).map_err(|e| SchemaError::Load {
            path: "<json>".to_string(),
            reason: format!("invalid JSON: {e}"),
        })?;
        Self::from_json(&doc)
    }

    /// Build a schema from YAML text.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::Load` for malformed YAML, otherwise as
    /// [`Schema::from_json`].
    pub fn from_yaml_str(s: &str) -> Result<Self, SchemaError> {
        let doc: Json = serde_yaml::from_str(s).map_err(|e| SchemaError::Load {
            path: "<yaml>".to_string(),
            reason: format!("invalid YAML: {e}"),
        })?;
        Self::from_json(&doc)
    }

    /// Load a schema document from a file.
    ///
    /// The format is chosen from the file extension (`.yaml`/`.yml` for
    /// YAML, anything else is read as JSON).
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::Load` if the file cannot be read or parsed,
    /// otherwise as [`Schema::from_json`].
    pub fn from_path(path: &Path) -> Result<Self, SchemaError> {
        let content = std::fs::read_to_string(path).map_err(|e| SchemaError::Load {
            path: path.display().to_string(),
            reason: format!("cannot read file: {e}"),
        })?;

        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        let parsed = match ext {
            "yaml" | "yml" => Self::from_yaml_str(&content),
            _ => Self::from_json_str(&content),
        };

        let schema = parsed.map_err(|e| match e {
            SchemaError::Load { reason, .. } => SchemaError::Load {
                path: path.display().to_string(),
                reason,
            },
            other => other,
        })?;

        tracing::debug!(
            path = %path.display(),
            fields = schema.len(),
            depth = schema.depth(),
            "loaded schema document"
        );
        Ok(schema)
    }
}

fn parse_fields(fields: &serde_json::Map<String, Json>, prefix: &str) -> Result<Schema, SchemaError> {
    let mut schema = Schema::new();
    for (name, doc) in fields {
        let path = if prefix.is_empty() {
            name.clone()
        } else {
            format!("{prefix}.{name}")
        };
        schema.insert(name.clone(), parse_node(doc, &path)?);
    }
    Ok(schema)
}

fn parse_node(doc: &Json, path: &str) -> Result<SchemaNode, SchemaError> {
    let Json::Object(obj) = doc else {
        return parse_shape(doc, path).map(SchemaNode::from);
    };
    let Some(type_doc) = obj.get("type") else {
        return parse_shape(doc, path).map(SchemaNode::from);
    };

    let shape = parse_shape(type_doc, path)?;
    let mut options = Options::default();
    for (key, value) in obj {
        match key.as_str() {
            "type" => {}
            "required" => options.required = parse_bool(value, path, key)?,
            "default" => options.default = Some(Value::from(value.clone())),
            "with_offset" => {
                if !matches!(shape, Shape::Primitive(Kind::DateTime)) {
                    return Err(SchemaError::InvalidOption {
                        path: path.to_string(),
                        option: key.clone(),
                        reason: "only applies to datetime".to_string(),
                    });
                }
                options.with_offset = parse_bool(value, path, key)?;
            }
            _ => {
                return Err(SchemaError::UnknownOption {
                    path: path.to_string(),
                    option: key.clone(),
                })
            }
        }
    }
    Ok(SchemaNode::new(shape, options))
}

fn parse_shape(doc: &Json, path: &str) -> Result<Shape, SchemaError> {
    match doc {
        Json::String(name) => name
            .parse::<Kind>()
            .map(Shape::Primitive)
            .map_err(|e| e.at(path)),
        Json::Array(items) => match items.as_slice() {
            [inner] => Ok(Shape::ListOf(Box::new(parse_node(inner, &format!("{path}[]"))?))),
            _ => Err(SchemaError::ListArity {
                path: path.to_string(),
                len: items.len(),
            }),
        },
        Json::Object(fields) => parse_fields(fields, path).map(Shape::Map),
        other => Err(SchemaError::InvalidNode {
            path: path.to_string(),
            reason: format!(
                "expected a type name, a one-element list, or a map, found {}",
                json_kind(other)
            ),
        }),
    }
}

fn parse_bool(value: &Json, path: &str, option: &str) -> Result<bool, SchemaError> {
    value.as_bool().ok_or_else(|| SchemaError::InvalidOption {
        path: path.to_string(),
        option: option.to_string(),
        reason: format!("expected boolean, found {}", json_kind(value)),
    })
}

fn json_kind(doc: &Json) -> &'static str {
    match doc {
        Json::Null => "null",
        Json::Bool(_) => "boolean",
        Json::Number(_) => "number",
        Json::String(_) => "string",
        Json::Array(_) => "array",
        Json::Object(_) => "object",
    }
}
