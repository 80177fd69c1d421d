//! # Document Input
//!
//! Reads JSON or YAML documents from files or standard input into
//! `serde_json::Value`, the common currency of the other handlers.

use std::io::Read as _;
use std::path::Path;

use anyhow::Context as _;
use clap::ValueEnum;

/// Document syntax.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DocumentFormat {
    Json,
    Yaml,
}

impl DocumentFormat {
    /// `.yaml`/`.yml` files are YAML, everything else JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml" | "yml") => Self::Yaml,
            _ => Self::Json,
        }
    }
}

/// Parse document text in the given format.
///
/// # Errors
///
/// Returns an error if the text is not valid in `format`.
pub fn parse_document(content: &str, format: DocumentFormat) -> anyhow::Result<serde_json::Value> {
    match format {
        DocumentFormat::Json => serde_json::from_str(content).context("invalid JSON"),
        DocumentFormat::Yaml => serde_yaml::from_str(content).context("invalid YAML"),
    }
}

/// Read a document from `path`, or from standard input in `stdin_format`
/// when no path is given.
///
/// # Errors
///
/// Returns an error if the source cannot be read or parsed.
pub fn read_document(
    path: Option<&Path>,
    stdin_format: DocumentFormat,
) -> anyhow::Result<serde_json::Value> {
    match path {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("cannot read {}", path.display()))?;
            parse_document(&content, DocumentFormat::from_path(path))
                .with_context(|| format!("cannot parse {}", path.display()))
        }
        None => {
            let mut content = String::new();
            std::io::stdin()
                .read_to_string(&mut content)
                .context("cannot read standard input")?;
            parse_document(&content, stdin_format).context("cannot parse standard input")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_format_from_path() {
        assert_eq!(DocumentFormat::from_path(Path::new("a.yaml")), DocumentFormat::Yaml);
        assert_eq!(DocumentFormat::from_path(Path::new("a.yml")), DocumentFormat::Yaml);
        assert_eq!(DocumentFormat::from_path(Path::new("a.json")), DocumentFormat::Json);
        assert_eq!(DocumentFormat::from_path(Path::new("a")), DocumentFormat::Json);
    }

    #[test]
    fn test_parse_document() {
        assert_eq!(
            parse_document("{\"a\": 1}", DocumentFormat::Json).unwrap(),
            json!({"a": 1})
        );
        assert_eq!(
            parse_document("a: [x, null]\n", DocumentFormat::Yaml).unwrap(),
            json!({"a": ["x", null]})
        );
        assert!(parse_document("a: 1", DocumentFormat::Json).is_err());
    }
}
