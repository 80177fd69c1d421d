//! # Check Subcommand
//!
//! Loads a schema document and prints one line per field, indenting the
//! fields of nested maps under their parent.

use std::io::Write;
use std::path::PathBuf;

use clap::Args;

use formcast_schema::{Schema, SchemaNode, Shape};

/// Arguments for the `check` subcommand.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Schema document to check.
    pub schema: PathBuf,
}

/// Execute the check subcommand. Returns `1` for an invalid schema.
///
/// # Errors
///
/// Returns an error only if writing to `out` fails.
pub fn run_check(args: &CheckArgs, out: &mut impl Write) -> anyhow::Result<u8> {
    let schema = match Schema::from_path(&args.schema) {
        Ok(schema) => schema,
        Err(e) => {
            writeln!(out, "FAIL: {}: {e}", args.schema.display())?;
            return Ok(1);
        }
    };

    write_fields(out, &schema, 0)?;
    writeln!(
        out,
        "OK: {} ({} fields, depth {})",
        args.schema.display(),
        schema.len(),
        schema.depth()
    )?;
    Ok(0)
}

fn write_fields(out: &mut impl Write, schema: &Schema, indent: usize) -> std::io::Result<()> {
    for (name, node) in schema.iter() {
        writeln!(out, "{:indent$}{name}: {node}", "")?;
        if let Some(nested) = nested_schema(node) {
            write_fields(out, nested, indent + 2)?;
        }
    }
    Ok(())
}

/// The sub-schema under a map node, looking through any list wrappers.
fn nested_schema(node: &SchemaNode) -> Option<&Schema> {
    match node.shape() {
        Shape::Primitive(_) => None,
        Shape::ListOf(inner) => nested_schema(inner),
        Shape::Map(schema) => Some(schema),
    }
}
