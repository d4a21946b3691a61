//! # Instance Binder
//!
//! Coerces decoded JSON into [`RecordInstance`]s following a compiled type
//! tree. Binding never fails: a value whose shape does not match any nested
//! type registered for it passes through as [`BoundValue::Raw`].
//!
//! ## Field sets
//!
//! | Policy | Exposed fields |
//! |--------|----------------|
//! | [`FieldPolicy::Open`] | the input's keys, in input order |
//! | [`FieldPolicy::Closed`] | declared fields (missing → `null`), then undeclared input keys matching a pattern |
//!
//! Under the closed policy, keys matching neither a declared name nor a
//! pattern are dropped and cannot be read back.

use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::{Map, Value};

use schemarec_schema::{FieldPolicy, ListType, NestedTypes, RecordType, TypeNode};

use crate::instance::{BoundValue, RecordInstance};

/// Bind `raw` as an instance of `record_type`.
pub fn bind(record_type: &Arc<RecordType>, raw: &Map<String, Value>) -> RecordInstance {
    let mut fields = IndexMap::with_capacity(raw.len());

    match record_type.field_policy() {
        FieldPolicy::Open => {
            for (key, value) in raw {
                let bound = coerce(record_type.types_for_key(key), value);
                fields.insert(key.clone(), bound);
            }
        }
        FieldPolicy::Closed => {
            for name in record_type.declared_fields() {
                let value = raw.get(name).unwrap_or(&Value::Null);
                fields.insert(name.to_string(), coerce(record_type.field_types(name), value));
            }

            let mut dropped = 0usize;
            for (key, value) in raw {
                if record_type.is_declared(key) {
                    continue;
                }
                match record_type.matching_pattern(key) {
                    Some(pattern) => {
                        fields.insert(key.clone(), bind_nested(pattern.types(), value));
                    }
                    None => dropped += 1,
                }
            }
            if dropped > 0 {
                tracing::trace!(dropped, "dropped keys outside the closed field set");
            }
        }
    }

    RecordInstance::new(Arc::clone(record_type), fields)
}

/// Bind one element of a sequence through `list_type`.
pub fn bind_list_item(list_type: &ListType, raw: &Value) -> BoundValue {
    bind_nested(list_type.item_types(), raw)
}

/// Apply the coercion rule for a value whose nested types are `types`.
pub fn bind_nested(types: &NestedTypes, raw: &Value) -> BoundValue {
    match (raw, types.node_for(raw)) {
        (Value::Object(map), TypeNode::Record(record_type)) => {
            BoundValue::Record(bind(record_type, map))
        }
        (Value::Array(items), TypeNode::List(list_type)) => BoundValue::List(
            items
                .iter()
                .map(|item| bind_list_item(list_type, item))
                .collect(),
        ),
        _ => BoundValue::Raw(raw.clone()),
    }
}

fn coerce(types: Option<&NestedTypes>, raw: &Value) -> BoundValue {
    match types {
        Some(types) => bind_nested(types, raw),
        None => BoundValue::Raw(raw.clone()),
    }
}
