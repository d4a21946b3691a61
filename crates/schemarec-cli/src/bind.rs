//! # Bind Subcommand
//!
//! Binds one document to a schema and prints the bound record as JSON.
//! With `--field`, prints only the value at a dotted path, which makes the
//! per-instance field set visible from the shell: a path to a field the
//! record does not expose fails.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use serde_json::Value;

use schemarec_core::SchemaRoot;
use schemarec_record::RecordSchema;

use crate::load_document;

/// Arguments for the `schemarec bind` subcommand.
#[derive(Args, Debug)]
pub struct BindArgs {
    /// Schema file, relative to the schema root.
    #[arg(value_name = "SCHEMA")]
    pub schema: PathBuf,

    /// JSON or YAML document to bind (`.yaml`/`.yml` read as YAML).
    #[arg(value_name = "DOCUMENT")]
    pub document: PathBuf,

    /// Print only the value at this dotted path (e.g. `board.0.0.piece`).
    #[arg(long, value_name = "PATH")]
    pub field: Option<String>,
}

/// Execute the bind subcommand. Returns the process exit code.
pub fn run_bind(args: &BindArgs, root: &SchemaRoot) -> Result<u8> {
    let output = bind_document(args, root)?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(0)
}

/// Compile, load, bind, and select the requested output value.
pub fn bind_document(args: &BindArgs, root: &SchemaRoot) -> Result<Value> {
    let schema = RecordSchema::from_file(root, &args.schema)
        .with_context(|| format!("failed to compile schema {}", args.schema.display()))?;

    let document = load_document(&args.document)?;
    let record = schema
        .bind_value(&document)
        .with_context(|| format!("cannot bind {}", args.document.display()))?;

    tracing::info!(
        document = %args.document.display(),
        fields = record.len(),
        "bound document"
    );

    match &args.field {
        Some(path) => {
            let value = record
                .lookup(path)
                .with_context(|| format!("no value at {path:?}"))?;
            Ok(value.to_value())
        }
        None => Ok(record.to_value()),
    }
}
