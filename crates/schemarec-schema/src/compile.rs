//! # Type Compiler
//!
//! Walks a schema document and builds the immutable [`RecordType`] /
//! [`ListType`] tree. All `$ref`s are resolved here; nothing is resolved
//! lazily at bind time.
//!
//! ## Sub-schema resolution
//!
//! Properties, pattern properties and array items share one step: a
//! sub-schema with `$ref` is replaced by the referenced fragment (resolved
//! again while it keeps pointing elsewhere), then its `type` set decides
//! whether a nested record type, a nested list type, or both are built.
//!
//! ## References
//!
//! Each reference target, keyed by source file and pointer, is compiled once
//! per [`TypeCompiler`] and shared. A target reached again while it is still
//! being compiled is a cycle and fails with [`ReferenceError::Cyclic`].

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use regex::Regex;
use serde_json::Value;

use schemarec_core::{
    json_kind, InvalidSchemaError, JsonType, ReferenceError, SchemaRecordError, SchemaRoot,
    TypeSet,
};

use crate::context::SchemaContext;
use crate::reference;
use crate::types::{ListType, NestedTypes, PatternField, RecordType};

/// Compile the object schema at `path` under `root`.
///
/// # Errors
///
/// Load failures, [`InvalidSchemaError`] for a root that is not an object
/// schema, and [`ReferenceError`] for unresolvable or cyclic references.
pub fn compile_file(
    root: &SchemaRoot,
    path: impl AsRef<Path>,
) -> Result<Arc<RecordType>, SchemaRecordError> {
    let context = SchemaContext::load(path, root.dir())?;
    TypeCompiler::new().compile_root(&context)
}

/// Compile an in-memory object schema. File references resolve against
/// `base_dir`.
pub fn compile_document(
    document: Value,
    base_dir: impl Into<PathBuf>,
) -> Result<Arc<RecordType>, SchemaRecordError> {
    let context = SchemaContext::from_document(document, base_dir);
    TypeCompiler::new().compile_root(&context)
}

/// Identity of a reference target: the file it lives in and the pointer.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct RefKey {
    source: Option<PathBuf>,
    pointer: String,
}

impl fmt::Display for RefKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.source {
            Some(path) => write!(f, "{}#{}", path.display(), self.pointer),
            None => write!(f, "#{}", self.pointer),
        }
    }
}

/// Compiles schema nodes into record and list types.
///
/// Holds the per-compilation reference cache and the stack of references
/// currently being compiled.
#[derive(Debug, Default)]
pub struct TypeCompiler {
    compiled_refs: HashMap<RefKey, NestedTypes>,
    in_progress: Vec<RefKey>,
}

impl TypeCompiler {
    /// A compiler with an empty reference cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Compile the document of `context` as a top-level record.
    ///
    /// The root's `type` must include `object`, and a `properties` keyword,
    /// if present, must be a map. Both are checked before any field is
    /// compiled.
    pub fn compile_root(
        &mut self,
        context: &SchemaContext,
    ) -> Result<Arc<RecordType>, SchemaRecordError> {
        let schema = context.document();

        let types = TypeSet::of_schema(schema);
        if !types.contains(JsonType::Object) {
            return Err(InvalidSchemaError::RootNotObject {
                schema: context.label(),
                found: types.names(),
            }
            .into());
        }

        if schema.get("properties").is_some_and(|p| !p.is_object()) {
            return Err(InvalidSchemaError::PropertiesNotMap {
                schema: context.label(),
            }
            .into());
        }

        let record = self.compile_object(schema, context)?;

        tracing::debug!(
            schema = %context.label(),
            fields = record.declared_fields().count(),
            patterns = record.pattern_fields().len(),
            references = self.compiled_refs.len(),
            "compiled record type"
        );

        Ok(Arc::new(record))
    }

    /// Compile an `object` schema node.
    pub fn compile_object(
        &mut self,
        schema: &Value,
        context: &SchemaContext,
    ) -> Result<RecordType, SchemaRecordError> {
        let additional = schema.get("additionalProperties");
        let mut record = RecordType::new(
            additional != Some(&Value::Bool(false)),
            additional.is_some(),
        );

        if let Some(properties) = keyword_map(schema, "properties", context) {
            for (name, sub_schema) in properties {
                let types = self.compile_nested(sub_schema, context)?;
                record.push_field(name.clone(), types);
            }
        }

        if let Some(patterns) = keyword_map(schema, "patternProperties", context) {
            for (pattern, sub_schema) in patterns {
                let regex = Regex::new(pattern).map_err(|e| InvalidSchemaError::InvalidPattern {
                    pattern: pattern.clone(),
                    reason: e.to_string(),
                })?;
                let types = self.compile_nested(sub_schema, context)?;
                record.push_pattern(PatternField::new(pattern.clone(), regex, types));
            }
        }

        Ok(record)
    }

    /// Compile the `items` of an `array` schema node.
    pub fn compile_array_items(
        &mut self,
        schema: &Value,
        context: &SchemaContext,
    ) -> Result<ListType, SchemaRecordError> {
        let items = match schema.get("items") {
            Some(items) => self.compile_nested(items, context)?,
            None => NestedTypes::default(),
        };
        Ok(ListType::new(items))
    }

    /// The shared sub-schema resolution step.
    fn compile_nested(
        &mut self,
        schema: &Value,
        context: &SchemaContext,
    ) -> Result<NestedTypes, SchemaRecordError> {
        let Some(node) = schema.as_object() else {
            return Ok(NestedTypes::default());
        };

        if let Some(reference) = node.get("$ref") {
            let reference = reference
                .as_str()
                .ok_or_else(|| InvalidSchemaError::MalformedReference {
                    found: json_kind(reference),
                })?;
            return self.compile_reference(reference, context);
        }

        let types = TypeSet::of_schema(schema);

        let record = if types.contains(JsonType::Object) {
            Some(Arc::new(self.compile_object(schema, context)?))
        } else {
            None
        };

        let list = if types.contains(JsonType::Array) {
            Some(Arc::new(self.compile_array_items(schema, context)?))
        } else {
            None
        };

        Ok(NestedTypes { record, list })
    }

    fn compile_reference(
        &mut self,
        reference: &str,
        context: &SchemaContext,
    ) -> Result<NestedTypes, SchemaRecordError> {
        let resolved = reference::resolve(reference, context)?;
        let key = RefKey {
            source: resolved.context.source().map(Path::to_path_buf),
            pointer: resolved.pointer.clone(),
        };

        if let Some(types) = self.compiled_refs.get(&key) {
            return Ok(types.clone());
        }

        if let Some(start) = self.in_progress.iter().position(|k| *k == key) {
            let mut chain: Vec<String> =
                self.in_progress[start..].iter().map(ToString::to_string).collect();
            chain.push(key.to_string());
            return Err(ReferenceError::Cyclic { chain }.into());
        }

        self.in_progress.push(key.clone());
        let result = self.compile_nested(&resolved.node, &resolved.context);
        self.in_progress.pop();

        let types = result?;
        self.compiled_refs.insert(key, types.clone());
        Ok(types)
    }
}

/// A map-valued keyword, or `None` when absent. A present keyword that is
/// not a map is ignored with a warning.
fn keyword_map<'v>(
    schema: &'v Value,
    keyword: &str,
    context: &SchemaContext,
) -> Option<&'v serde_json::Map<String, Value>> {
    let value = schema.get(keyword)?;
    let map = value.as_object();
    if map.is_none() {
        tracing::warn!(
            schema = %context.label(),
            keyword,
            found = json_kind(value),
            "ignoring non-map keyword"
        );
    }
    map
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn compile(schema: Value) -> Result<Arc<RecordType>, SchemaRecordError> {
        compile_document(schema, ".")
    }

    #[test]
    fn declared_fields_keep_order() {
        let record = compile(json!({
            "type": "object",
            "properties": {
                "zeta": {"type": "string"},
                "alpha": {"type": "number"},
                "mid": {}
            }
        }))
        .unwrap();
        assert_eq!(
            record.declared_fields().collect::<Vec<_>>(),
            vec!["zeta", "alpha", "mid"]
        );
        assert!(record.allows_additional_fields());
        assert!(!record.additional_fields_explicit());
    }

    #[test]
    fn additional_properties_only_false_closes() {
        let closed = compile(json!({"type": "object", "additionalProperties": false})).unwrap();
        assert!(!closed.allows_additional_fields());

        let schema_valued = compile(json!({
            "type": "object",
            "additionalProperties": {"type": "string"}
        }))
        .unwrap();
        assert!(schema_valued.allows_additional_fields());
        assert!(schema_valued.additional_fields_explicit());
    }

    #[test]
    fn root_must_be_object() {
        let err = compile(json!({"type": "array", "items": {"$ref": "#/nowhere"}})).unwrap_err();
        assert!(matches!(
            err,
            SchemaRecordError::InvalidSchema(InvalidSchemaError::RootNotObject { .. })
        ));

        let err = compile(json!({"properties": {}})).unwrap_err();
        assert!(matches!(
            err,
            SchemaRecordError::InvalidSchema(InvalidSchemaError::RootNotObject { .. })
        ));
    }

    #[test]
    fn root_union_including_object_is_accepted() {
        assert!(compile(json!({"type": ["object", "null"]})).is_ok());
    }

    #[test]
    fn root_properties_must_be_map() {
        let err = compile(json!({"type": "object", "properties": ["a", "b"]})).unwrap_err();
        assert!(matches!(
            err,
            SchemaRecordError::InvalidSchema(InvalidSchemaError::PropertiesNotMap { .. })
        ));
    }

    #[test]
    fn nested_non_map_properties_are_ignored() {
        let record = compile(json!({
            "type": "object",
            "properties": {"inner": {"type": "object", "properties": 5}}
        }))
        .unwrap();
        let inner = record.field_record_type("inner").unwrap();
        assert_eq!(inner.declared_fields().count(), 0);
    }

    #[test]
    fn nested_object_and_array_fields() {
        let record = compile(json!({
            "type": "object",
            "properties": {
                "appearance": {
                    "type": "object",
                    "properties": {"height": {"type": "integer"}}
                },
                "drives": {
                    "type": "array",
                    "items": {"type": "object", "properties": {"rpm": {}}}
                },
                "name": {"type": "string"}
            }
        }))
        .unwrap();

        let appearance = record.field_record_type("appearance").unwrap();
        assert_eq!(appearance.declared_fields().collect::<Vec<_>>(), vec!["height"]);
        assert!(record.field_list_type("appearance").is_none());

        let drives = record.field_list_type("drives").unwrap();
        assert!(drives.item_record_type().is_some());
        assert!(drives.item_list_type().is_none());

        assert!(record.field_types("name").unwrap().is_empty());
    }

    #[test]
    fn union_type_builds_both_shapes() {
        let record = compile(json!({
            "type": "object",
            "properties": {
                "wabe": {
                    "type": ["object", "array", "null"],
                    "properties": {"jaws": {}},
                    "items": {"type": "string"}
                }
            }
        }))
        .unwrap();
        assert!(record.field_record_type("wabe").is_some());
        let list = record.field_list_type("wabe").unwrap();
        assert!(list.item_types().is_empty());
    }

    #[test]
    fn array_of_arrays() {
        let record = compile(json!({
            "type": "object",
            "properties": {
                "board": {
                    "type": "array",
                    "items": {
                        "type": "array",
                        "items": {"type": "object", "properties": {"piece": {}}}
                    }
                }
            }
        }))
        .unwrap();
        let board = record.field_list_type("board").unwrap();
        let row = board.item_list_type().unwrap();
        assert!(row.item_record_type().is_some());
    }

    #[test]
    fn array_without_items_has_no_item_types() {
        let record = compile(json!({
            "type": "object",
            "properties": {"tags": {"type": "array"}, "tuple": {"type": "array", "items": [{}]}}
        }))
        .unwrap();
        assert!(record.field_list_type("tags").unwrap().item_types().is_empty());
        assert!(record.field_list_type("tuple").unwrap().item_types().is_empty());
    }

    #[test]
    fn pattern_properties_are_compiled() {
        let record = compile(json!({
            "type": "object",
            "patternProperties": {
                "^[a-z]+$": {"type": "object", "properties": {"firstName": {}}},
                "^_": {"type": "array", "items": {"type": "string"}}
            }
        }))
        .unwrap();
        assert_eq!(
            record.pattern_field_patterns().collect::<Vec<_>>(),
            vec!["^[a-z]+$", "^_"]
        );
        assert!(record.pattern_record_type("^[a-z]+$").is_some());
        assert!(record.pattern_list_type("^_").is_some());
    }

    #[test]
    fn invalid_pattern_is_invalid_schema() {
        let err = compile(json!({
            "type": "object",
            "patternProperties": {"([": {}}
        }))
        .unwrap_err();
        assert!(matches!(
            err,
            SchemaRecordError::InvalidSchema(InvalidSchemaError::InvalidPattern { .. })
        ));
    }

    #[test]
    fn local_refs_are_shared() {
        let record = compile(json!({
            "type": "object",
            "definitions": {
                "address": {
                    "type": "object",
                    "properties": {"city": {}, "state": {}}
                }
            },
            "properties": {
                "shipping_address": {"$ref": "#/definitions/address"},
                "billing_address": {"$ref": "#/definitions/address"}
            }
        }))
        .unwrap();
        let shipping = record.field_record_type("shipping_address").unwrap();
        let billing = record.field_record_type("billing_address").unwrap();
        assert_eq!(shipping, billing);
        assert!(Arc::ptr_eq(shipping, billing));
    }

    #[test]
    fn ref_chains_are_followed() {
        let record = compile(json!({
            "type": "object",
            "definitions": {
                "alias": {"$ref": "#/definitions/real"},
                "real": {"type": "object", "properties": {"x": {}}}
            },
            "properties": {"field": {"$ref": "#/definitions/alias"}}
        }))
        .unwrap();
        let field = record.field_record_type("field").unwrap();
        assert_eq!(field.declared_fields().collect::<Vec<_>>(), vec!["x"]);
    }

    #[test]
    fn ref_siblings_are_ignored() {
        let record = compile(json!({
            "type": "object",
            "definitions": {"scalar": {"type": "string"}},
            "properties": {
                "field": {"$ref": "#/definitions/scalar", "type": "object"}
            }
        }))
        .unwrap();
        assert!(record.field_types("field").unwrap().is_empty());
    }

    #[test]
    fn unresolvable_ref_fails() {
        let err = compile(json!({
            "type": "object",
            "properties": {"field": {"$ref": "#/definitions/missing"}}
        }))
        .unwrap_err();
        assert!(matches!(
            err,
            SchemaRecordError::Reference(ReferenceError::NotFound { .. })
        ));
    }

    #[test]
    fn non_string_ref_is_malformed() {
        let err = compile(json!({
            "type": "object",
            "properties": {"field": {"$ref": 42}}
        }))
        .unwrap_err();
        assert!(matches!(
            err,
            SchemaRecordError::InvalidSchema(InvalidSchemaError::MalformedReference {
                found: "number"
            })
        ));
    }

    #[test]
    fn cyclic_refs_fail() {
        let err = compile(json!({
            "type": "object",
            "definitions": {
                "node": {
                    "type": "object",
                    "properties": {"next": {"$ref": "#/definitions/node"}}
                }
            },
            "properties": {"head": {"$ref": "#/definitions/node"}}
        }))
        .unwrap_err();
        match err {
            SchemaRecordError::Reference(ReferenceError::Cyclic { chain }) => {
                assert_eq!(chain, vec!["#/definitions/node", "#/definitions/node"]);
            }
            other => panic!("expected cycle, got {other:?}"),
        }
    }

    #[test]
    fn self_reference_to_root_is_cyclic() {
        let err = compile(json!({
            "type": "object",
            "properties": {"child": {"$ref": "#"}}
        }))
        .unwrap_err();
        assert!(matches!(
            err,
            SchemaRecordError::Reference(ReferenceError::Cyclic { .. })
        ));
    }

    #[test]
    fn cross_file_refs_resolve_relative_to_foreign_file() {
        let tmp = tempfile::tempdir().unwrap();
        let shared = tmp.path().join("shared");
        std::fs::create_dir(&shared).unwrap();
        std::fs::write(
            shared.join("contact.json"),
            r#"{
                "type": "object",
                "properties": {
                    "email": {"type": "string"},
                    "phone": {"$ref": "phone.json#/definitions/phone"}
                }
            }"#,
        )
        .unwrap();
        std::fs::write(
            shared.join("phone.json"),
            r#"{"definitions": {"phone": {"type": "object", "properties": {"number": {}}}}}"#,
        )
        .unwrap();
        std::fs::write(
            tmp.path().join("card.json"),
            r#"{"type": "object", "properties": {"contact": {"$ref": "shared/contact.json"}}}"#,
        )
        .unwrap();

        let record = compile_file(&SchemaRoot::new(tmp.path()), "card.json").unwrap();
        let contact = record.field_record_type("contact").unwrap();
        let phone = contact.field_record_type("phone").unwrap();
        assert_eq!(phone.declared_fields().collect::<Vec<_>>(), vec!["number"]);
    }

    #[test]
    fn compile_file_missing_is_load_error() {
        let tmp = tempfile::tempdir().unwrap();
        let err = compile_file(&SchemaRoot::new(tmp.path()), "missing.json").unwrap_err();
        assert!(matches!(err, SchemaRecordError::Load(_)));
    }
}
