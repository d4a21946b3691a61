//! # Error Hierarchy
//!
//! Structured error types for schemarec, built with `thiserror`.
//! No `Box<dyn Error>`, no `.unwrap()` outside tests.
//!
//! Schema failures (load, invalid shape, unresolvable references) are fatal
//! and surface at compile time. Binding a value never fails on a shape
//! mismatch; the only bind-time errors are caller errors at the root and
//! field lookups on names an instance does not expose.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for schemarec.
#[derive(Error, Debug)]
pub enum SchemaRecordError {
    /// A schema document could not be read or decoded.
    #[error("schema load error: {0}")]
    Load(#[from] SchemaLoadError),

    /// A schema document was decoded but cannot be compiled.
    #[error("invalid schema: {0}")]
    InvalidSchema(#[from] InvalidSchemaError),

    /// A `$ref` could not be resolved.
    #[error("reference error: {0}")]
    Reference(#[from] ReferenceError),

    /// A field lookup on a bound record failed.
    #[error("field access error: {0}")]
    FieldAccess(#[from] FieldAccessError),

    /// A value could not be bound at the record root.
    #[error("bind error: {0}")]
    Bind(#[from] BindError),
}

/// Errors while reading and decoding a schema file.
#[derive(Error, Debug)]
pub enum SchemaLoadError {
    /// The file is missing or unreadable.
    #[error("failed to read schema {path}: {source}")]
    Read {
        /// Path that was read.
        path: PathBuf,
        /// Underlying I/O failure.
        source: std::io::Error,
    },

    /// The file is not valid JSON.
    #[error("failed to parse schema {path} as JSON: {source}")]
    Parse {
        /// Path that was read.
        path: PathBuf,
        /// Underlying decode failure.
        source: serde_json::Error,
    },
}

impl SchemaLoadError {
    /// The path of the schema file that failed to load.
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::Read { path, .. } | Self::Parse { path, .. } => path,
        }
    }
}

/// Structural problems in a schema document.
#[derive(Error, Debug)]
pub enum InvalidSchemaError {
    /// The root schema's `type` does not include `object`.
    #[error("top-level of schema {schema} must be type: object (found type set {found:?})")]
    RootNotObject {
        /// Schema file or `<inline>` for in-memory documents.
        schema: String,
        /// The type names the root declared.
        found: Vec<String>,
    },

    /// The root schema has a `properties` keyword that is not a map.
    #[error("schema {schema} is type 'object' but 'properties' is not a map")]
    PropertiesNotMap {
        /// Schema file or `<inline>` for in-memory documents.
        schema: String,
    },

    /// A `patternProperties` key is not a valid regular expression.
    #[error("invalid patternProperties pattern {pattern:?}: {reason}")]
    InvalidPattern {
        /// The offending pattern string.
        pattern: String,
        /// Regex compiler message.
        reason: String,
    },

    /// A `$ref` keyword whose value is not a string.
    #[error("$ref must be a string, found {found}")]
    MalformedReference {
        /// JSON kind of the value found under `$ref`.
        found: &'static str,
    },
}

/// Failures resolving `$ref` strings.
#[derive(Error, Debug)]
pub enum ReferenceError {
    /// A pointer segment is missing from the target document.
    #[error("unable to find schema at $ref path <{pointer}> (reference {reference:?})")]
    NotFound {
        /// The full reference string.
        reference: String,
        /// The JSON Pointer portion that could not be walked.
        pointer: String,
    },

    /// A reference target was reached again while it was being compiled.
    #[error("cyclic $ref chain: {}", .chain.join(" -> "))]
    Cyclic {
        /// The chain of references, ending with the repeated one.
        chain: Vec<String>,
    },
}

/// Lookups on a bound record or one of its nested values.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldAccessError {
    /// The record does not expose this field.
    #[error("no field {field:?} on record (available: {})", .available.join(", "))]
    NoSuchField {
        /// The requested field name.
        field: String,
        /// Field names the record does expose.
        available: Vec<String>,
    },

    /// A list index past the end of a bound list.
    #[error("index {index} out of bounds for list of length {len}")]
    IndexOutOfBounds {
        /// The requested index.
        index: usize,
        /// The list length.
        len: usize,
    },

    /// A path segment applied to a value that has no children.
    #[error("cannot look up {segment:?} in a {kind} value")]
    NotTraversable {
        /// The segment that could not be applied.
        segment: String,
        /// JSON kind of the value the segment was applied to.
        kind: &'static str,
    },
}

/// Caller errors when binding at the record root.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BindError {
    /// A record can only be bound from a JSON object.
    #[error("a record must be bound from a JSON object, found {found}")]
    ExpectedObject {
        /// JSON kind of the value supplied.
        found: &'static str,
    },
}

/// Short JSON kind name of a value, used in error messages.
pub fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
