//! # Inspect Subcommand
//!
//! Compiles a schema and prints the resulting record type tree, which shows
//! which fields and patterns carry nested record or list types and which
//! field policy each record binds with.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use serde_json::{json, Value};

use schemarec_core::SchemaRoot;
use schemarec_schema::{compile_file, ListType, NestedTypes, RecordType};

/// Arguments for the `schemarec inspect` subcommand.
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Schema file, relative to the schema root.
    #[arg(value_name = "SCHEMA")]
    pub schema: PathBuf,
}

/// Execute the inspect subcommand. Returns the process exit code.
pub fn run_inspect(args: &InspectArgs, root: &SchemaRoot) -> Result<u8> {
    let summary = inspect_schema(args, root)?;
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(0)
}

/// Compile the schema and describe its type tree.
pub fn inspect_schema(args: &InspectArgs, root: &SchemaRoot) -> Result<Value> {
    let record_type = compile_file(root, &args.schema)
        .with_context(|| format!("failed to compile schema {}", args.schema.display()))?;

    tracing::info!(
        schema = %args.schema.display(),
        fields = record_type.declared_fields().count(),
        "compiled schema"
    );

    Ok(describe_record(&record_type))
}

fn describe_record(record: &RecordType) -> Value {
    let fields: serde_json::Map<String, Value> = record
        .declared_fields()
        .map(|name| {
            let types = record.field_types(name).cloned().unwrap_or_default();
            (name.to_string(), describe_nested(&types))
        })
        .collect();

    let patterns: serde_json::Map<String, Value> = record
        .pattern_fields()
        .iter()
        .map(|p| (p.pattern().to_string(), describe_nested(p.types())))
        .collect();

    json!({
        "policy": record.field_policy(),
        "allows_additional_fields": record.allows_additional_fields(),
        "fields": fields,
        "patterns": patterns,
    })
}

fn describe_list(list: &ListType) -> Value {
    json!({ "items": describe_nested(list.item_types()) })
}

fn describe_nested(types: &NestedTypes) -> Value {
    let mut out = serde_json::Map::new();
    if let Some(record) = &types.record {
        out.insert("record".to_string(), describe_record(record));
    }
    if let Some(list) = &types.list {
        out.insert("list".to_string(), describe_list(list));
    }
    Value::Object(out)
}
