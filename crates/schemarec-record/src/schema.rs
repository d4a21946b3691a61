//! # RecordSchema
//!
//! A compiled schema ready to bind values: the entry point most callers
//! need. Compile once, then bind any number of values, from any number of
//! threads.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde_json::{Map, Value};

use schemarec_core::{json_kind, BindError, SchemaRecordError, SchemaRoot};
use schemarec_schema::{compile_document, compile_file, RecordType};

use crate::bind::bind;
use crate::instance::RecordInstance;

/// A compiled top-level object schema.
///
/// Cloning is cheap: the compiled type tree is shared.
#[derive(Debug, Clone)]
pub struct RecordSchema {
    record_type: Arc<RecordType>,
}

impl RecordSchema {
    /// Compile the schema file at `path`, relative to `root`.
    ///
    /// # Errors
    ///
    /// Any load, invalid-schema or reference failure. All `$ref`s are
    /// resolved here.
    pub fn from_file(root: &SchemaRoot, path: impl AsRef<Path>) -> Result<Self, SchemaRecordError> {
        let path = path.as_ref();
        let record_type = compile_file(root, path)?;
        tracing::debug!(schema = %root.resolve(path).display(), "record schema ready");
        Ok(Self { record_type })
    }

    /// Compile an in-memory schema. File `$ref`s resolve against `base_dir`.
    pub fn from_document(
        document: Value,
        base_dir: impl Into<PathBuf>,
    ) -> Result<Self, SchemaRecordError> {
        Ok(Self {
            record_type: compile_document(document, base_dir)?,
        })
    }

    /// Wrap an already compiled record type.
    pub fn from_record_type(record_type: Arc<RecordType>) -> Self {
        Self { record_type }
    }

    pub fn record_type(&self) -> &Arc<RecordType> {
        &self.record_type
    }

    /// Bind a map of field values.
    pub fn bind(&self, raw: &Map<String, Value>) -> RecordInstance {
        bind(&self.record_type, raw)
    }

    /// Bind a decoded JSON value, which must be an object.
    ///
    /// # Errors
    ///
    /// [`BindError::ExpectedObject`] for any other kind of value.
    pub fn bind_value(&self, raw: &Value) -> Result<RecordInstance, BindError> {
        match raw {
            Value::Object(map) => Ok(self.bind(map)),
            other => Err(BindError::ExpectedObject {
                found: json_kind(other),
            }),
        }
    }
}
