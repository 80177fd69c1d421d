//! Integration test: load schema documents from disk and normalize with them.

use std::io::Write as _;
use std::path::PathBuf;

use formcast_core::{Map, Value};
use formcast_schema::{normalize, Schema, SchemaError, SchemaNode};
use serde_json::json;

const SIGNUP_YAML: &str = r#"
name: { type: string, required: true }
age: { type: number, default: 18 }
langs: { type: [string], required: true }
created: { type: datetime, with_offset: true }
address:
  street: string
  zip: number
"#;

fn write_temp(dir: &tempfile::TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    let mut file = std::fs::File::create(&path).expect("create temp file");
    file.write_all(content.as_bytes()).expect("write temp file");
    path
}

fn params(json: serde_json::Value) -> Map {
    match Value::from(json) {
        Value::Map(map) => map,
        other => panic!("expected object, got {}", other.shape()),
    }
}

#[test]
fn test_yaml_and_json_documents_agree() {
    let dir = tempfile::tempdir().unwrap();
    let yaml = write_temp(&dir, "signup.yaml", SIGNUP_YAML);

    let doc: serde_json::Value = serde_yaml::from_str(SIGNUP_YAML).unwrap();
    let json = write_temp(&dir, "signup.json", &doc.to_string());

    let from_yaml = Schema::from_path(&yaml).unwrap();
    let from_json = Schema::from_path(&json).unwrap();
    assert_eq!(from_yaml, from_json);
    assert_eq!(from_yaml.len(), 5);
}

#[test]
fn test_loaded_schema_matches_builder() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_temp(&dir, "signup.yml", SIGNUP_YAML);
    let loaded = Schema::from_path(&path).unwrap();

    let built = Schema::new()
        .field("name", SchemaNode::string().required())
        .field("age", SchemaNode::number().default_value(18))
        .field("langs", SchemaNode::list(SchemaNode::string()).required())
        .field("created", SchemaNode::datetime().with_offset())
        .field(
            "address",
            SchemaNode::map(
                Schema::new()
                    .field("street", SchemaNode::string())
                    .field("zip", SchemaNode::number()),
            ),
        );
    assert_eq!(loaded, built);
}

#[test]
fn test_normalize_with_loaded_schema() {
    let schema = Schema::from_yaml_str(SIGNUP_YAML).unwrap();

    let record = normalize(
        &params(json!({
            "name": "Ana",
            "langs": ["pt", null],
            "created": "2020-12-30T12:00:00+0100",
        })),
        &schema,
    )
    .unwrap();
    assert_eq!(
        Value::Map(record).to_json().unwrap(),
        json!({
            "name": "Ana",
            "age": 18,
            "langs": ["pt", null],
            "created": ["2020-12-30T11:00:00Z", 3600],
        })
    );

    let errors = normalize(&Map::new(), &schema).unwrap_err();
    assert_eq!(
        errors.to_json().unwrap(),
        json!({"name": "required string", "langs": "required string list"})
    );
}

#[test]
fn test_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = Schema::from_path(&dir.path().join("absent.json")).unwrap_err();
    match err {
        SchemaError::Load { reason, .. } => assert!(reason.starts_with("cannot read file")),
        other => panic!("expected Load error, got: {other}"),
    }
}

#[test]
fn test_malformed_file_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_temp(&dir, "broken.json", "{\"name\": ");
    let err = Schema::from_path(&path).unwrap_err();
    match err {
        SchemaError::Load { path: reported, reason } => {
            assert_eq!(reported, path.display().to_string());
            assert!(reason.starts_with("invalid JSON"));
        }
        other => panic!("expected Load error, got: {other}"),
    }
}

#[test]
fn test_invalid_node_in_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_temp(&dir, "bad.yaml", "tags: [string, number]\n");
    let err = Schema::from_path(&path).unwrap_err();
    assert_eq!(
        err.to_string(),
        "list type at 'tags' must have exactly one element type, found 2"
    );
}
