//! # Schema Context
//!
//! A [`SchemaContext`] is one decoded schema document plus the directory
//! relative references inside it resolve against. Contexts are immutable;
//! following a cross-file `$ref` creates a new one rather than changing the
//! current one.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde_json::Value;

use schemarec_core::SchemaLoadError;

/// A loaded schema document and the directory it resolves siblings from.
///
/// Cloning is cheap: the document is shared.
#[derive(Debug, Clone)]
pub struct SchemaContext {
    document: Arc<Value>,
    base_dir: PathBuf,
    source: Option<PathBuf>,
}

impl SchemaContext {
    /// Read and decode `base_dir/file_path`.
    ///
    /// The context's base directory is the canonicalized parent of the
    /// loaded file, so references keep resolving against the real location
    /// when `file_path` went through a symlink.
    ///
    /// # Errors
    ///
    /// [`SchemaLoadError::Read`] if the file is missing or unreadable,
    /// [`SchemaLoadError::Parse`] if it is not valid JSON.
    pub fn load(
        file_path: impl AsRef<Path>,
        base_dir: impl AsRef<Path>,
    ) -> Result<Self, SchemaLoadError> {
        let full_path = base_dir.as_ref().join(file_path.as_ref());

        let content =
            std::fs::read_to_string(&full_path).map_err(|source| SchemaLoadError::Read {
                path: full_path.clone(),
                source,
            })?;

        let document: Value =
            serde_json::from_str(&content).map_err(|source| SchemaLoadError::Parse {
                path: full_path.clone(),
                source,
            })?;

        let real_path = std::fs::canonicalize(&full_path).map_err(|source| {
            SchemaLoadError::Read {
                path: full_path.clone(),
                source,
            }
        })?;
        let base_dir = real_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("/"));

        tracing::debug!(
            path = %full_path.display(),
            real_path = %real_path.display(),
            "loaded schema document"
        );

        Ok(Self {
            document: Arc::new(document),
            base_dir,
            source: Some(real_path),
        })
    }

    /// Wrap an already decoded schema. Cross-file references resolve
    /// against `base_dir`.
    pub fn from_document(document: Value, base_dir: impl Into<PathBuf>) -> Self {
        Self {
            document: Arc::new(document),
            base_dir: base_dir.into(),
            source: None,
        }
    }

    /// The whole decoded document.
    pub fn document(&self) -> &Value {
        &self.document
    }

    /// Directory relative references resolve against.
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Canonical path of the file this context was loaded from, if any.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Human-readable name for diagnostics: the source path or `<inline>`.
    pub fn label(&self) -> String {
        match &self.source {
            Some(path) => path.display().to_string(),
            None => "<inline>".to_string(),
        }
    }
}
