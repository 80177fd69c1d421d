//! # Normalize Subcommand
//!
//! Normalizes a parameters document against a schema document and prints
//! either the typed record or the error record as JSON.
//!
//! Exit codes: `0` when the input was accepted, `2` when it was rejected
//! with an error record. Unreadable files and malformed documents are
//! reported as errors (exit `1` from `main`).

use std::io::Write;
use std::path::PathBuf;

use anyhow::{bail, Context as _};
use clap::Args;

use formcast_core::{Map, Value};
use formcast_schema::{ErrorRecord, Normalizer, NormalizerConfig, Record, Schema, DEFAULT_MAX_DEPTH};

use crate::input::{read_document, DocumentFormat};

/// Exit code when the parameters were rejected.
pub const EXIT_REJECTED: u8 = 2;

/// Arguments for the `normalize` subcommand.
#[derive(Args, Debug)]
pub struct NormalizeArgs {
    /// Schema document (JSON, or YAML with a .yaml/.yml extension).
    #[arg(long, short)]
    pub schema: PathBuf,

    /// Parameters document. Reads standard input when omitted.
    #[arg(long, short)]
    pub input: Option<PathBuf>,

    /// Syntax of standard input.
    #[arg(long, value_enum, default_value_t = DocumentFormat::Json)]
    pub stdin_format: DocumentFormat,

    /// Maximum number of nested list/map levels.
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    pub max_depth: usize,

    /// Pretty-print the JSON output.
    #[arg(long)]
    pub pretty: bool,
}

/// Execute the normalize subcommand, writing the outcome to `out`.
///
/// # Errors
///
/// Returns an error if a document cannot be read or parsed, or if the
/// parameters document is not a map.
pub fn run_normalize(args: &NormalizeArgs, out: &mut impl Write) -> anyhow::Result<u8> {
    let schema = Schema::from_path(&args.schema)
        .with_context(|| format!("cannot load schema {}", args.schema.display()))?;
    let params = params_from_json(read_document(args.input.as_deref(), args.stdin_format)?)?;

    let normalizer = Normalizer::new(NormalizerConfig {
        max_depth: args.max_depth,
    });
    let outcome = normalizer.normalize(&params, &schema);
    let (json, code) = render_outcome(&outcome)?;

    if args.pretty {
        serde_json::to_writer_pretty(&mut *out, &json)?;
    } else {
        serde_json::to_writer(&mut *out, &json)?;
    }
    writeln!(out)?;

    match &outcome {
        Ok(record) => tracing::info!(fields = record.len(), "parameters accepted"),
        Err(errors) => tracing::info!(fields = errors.len(), "parameters rejected"),
    }
    Ok(code)
}

/// Convert a parsed document into a parameter map.
///
/// # Errors
///
/// Returns an error if the document root is not an object.
pub fn params_from_json(doc: serde_json::Value) -> anyhow::Result<Map> {
    match Value::from(doc) {
        Value::Map(map) => Ok(map),
        other => bail!("parameters document must be a map, found {}", other.shape()),
    }
}

fn render_outcome(outcome: &Result<Record, ErrorRecord>) -> anyhow::Result<(serde_json::Value, u8)> {
    Ok(match outcome {
        Ok(record) => (Value::Map(record.clone()).to_json()?, 0),
        Err(errors) => (errors.to_json()?, EXIT_REJECTED),
    })
}
