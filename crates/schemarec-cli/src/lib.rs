//! # schemarec-cli — Command-Line Interface
//!
//! Provides the `schemarec` binary.
//!
//! ## Subcommands
//!
//! - `schemarec inspect SCHEMA` — compile a schema and print the record
//!   type tree as JSON.
//! - `schemarec bind SCHEMA DOCUMENT [--field PATH]` — bind a JSON or YAML
//!   document and print the bound record, or one value inside it.
//!
//! ```bash
//! schemarec --root fixtures/schemas inspect customer.json
//! schemarec --root fixtures/schemas bind gameboard.json game.yaml --field board.0.0.piece
//! ```

pub mod bind;
pub mod inspect;

use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value;

/// Read a document as JSON, or as YAML when the extension is `.yaml`/`.yml`.
pub fn load_document(path: &Path) -> Result<Value> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read document {}", path.display()))?;

    let is_yaml = matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml" | "yml")
    );

    if is_yaml {
        serde_yaml::from_str(&content)
            .with_context(|| format!("failed to parse {} as YAML", path.display()))
    } else {
        serde_json::from_str(&content)
            .with_context(|| format!("failed to parse {} as JSON", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn loads_json_and_yaml_by_extension() {
        let tmp = tempfile::tempdir().unwrap();
        let json_path = tmp.path().join("doc.json");
        let yaml_path = tmp.path().join("doc.yml");
        std::fs::write(&json_path, r#"{"latitude": 10}"#).unwrap();
        std::fs::write(&yaml_path, "latitude: 10\nname: home\n").unwrap();

        assert_eq!(load_document(&json_path).unwrap(), json!({"latitude": 10}));
        assert_eq!(
            load_document(&yaml_path).unwrap(),
            json!({"latitude": 10, "name": "home"})
        );
    }

    #[test]
    fn missing_document_names_path() {
        let err = load_document(Path::new("/nonexistent/doc.json")).unwrap_err();
        assert!(format!("{err:#}").contains("/nonexistent/doc.json"));
    }
}
