//! Schema root configuration.
//!
//! Top-level schema paths are resolved against an explicit root directory
//! that callers thread into every compile call. There is no process-wide
//! mutable root. Override via the `SCHEMAREC_ROOT` environment variable or
//! explicit construction.

use std::path::{Path, PathBuf};

/// Environment variable consulted by [`SchemaRoot::from_env`].
pub const SCHEMA_ROOT_ENV: &str = "SCHEMAREC_ROOT";

/// The directory top-level schema paths are resolved against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaRoot {
    dir: PathBuf,
}

impl SchemaRoot {
    /// Use `dir` as the schema root.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Load the root from `SCHEMAREC_ROOT`, falling back to the current
    /// directory (or `.` if that cannot be determined).
    pub fn from_env() -> Self {
        match std::env::var_os(SCHEMA_ROOT_ENV) {
            Some(dir) if !dir.is_empty() => Self::new(dir),
            _ => Self::current_dir(),
        }
    }

    /// The process working directory as a schema root.
    pub fn current_dir() -> Self {
        Self::new(std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
    }

    /// The root directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Resolve a schema path: absolute paths are returned as-is, relative
    /// paths are joined under the root.
    pub fn resolve(&self, path: impl AsRef<Path>) -> PathBuf {
        let path = path.as_ref();
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.dir.join(path)
        }
    }
}

impl Default for SchemaRoot {
    fn default() -> Self {
        Self::current_dir()
    }
}
