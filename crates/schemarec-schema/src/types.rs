//! # Compiled Type Tree
//!
//! The Type Compiler turns `object` schemas into [`RecordType`]s and the
//! `items` of `array` schemas into [`ListType`]s. Both are immutable once
//! built and shared through `Arc`, so one compiled tree serves every bind
//! on every thread.
//!
//! A field's compiled shape is a [`NestedTypes`]: at most one nested record
//! type and at most one nested list type. A union such as
//! `["object", "array"]` sets both; the shape of the value being bound picks
//! which one applies (see [`NestedTypes::node_for`]).

use std::sync::Arc;

use indexmap::IndexMap;
use regex::Regex;
use serde::Serialize;
use serde_json::Value;

/// The nested types registered for one field, pattern, or list item.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NestedTypes {
    /// Set when the sub-schema's type set includes `object`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record: Option<Arc<RecordType>>,
    /// Set when the sub-schema's type set includes `array`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub list: Option<Arc<ListType>>,
}

impl NestedTypes {
    /// No nested types: values always pass through.
    pub fn is_empty(&self) -> bool {
        self.record.is_none() && self.list.is_none()
    }

    /// Pick the compiled shape that applies to `value`.
    pub fn node_for(&self, value: &Value) -> TypeNode<'_> {
        match (value, &self.record, &self.list) {
            (Value::Object(_), Some(record), _) => TypeNode::Record(record),
            (Value::Array(_), _, Some(list)) => TypeNode::List(list),
            _ => TypeNode::Scalar,
        }
    }
}

/// The compiled shape chosen for one concrete value.
#[derive(Debug, Clone, Copy)]
pub enum TypeNode<'a> {
    /// Bind the map as a record of this type.
    Record(&'a Arc<RecordType>),
    /// Bind each element of the sequence through this list type.
    List(&'a Arc<ListType>),
    /// Pass the value through unchanged.
    Scalar,
}

/// Whether a record exposes the input's own keys or a fixed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldPolicy {
    /// Field set is exactly the input's key set, in input order.
    Open,
    /// Field set is the declared fields plus input keys matching a pattern.
    Closed,
}

/// One `patternProperties` entry.
#[derive(Debug, Clone, Serialize)]
pub struct PatternField {
    pattern: String,
    #[serde(skip)]
    regex: Regex,
    #[serde(flatten)]
    types: NestedTypes,
}

impl PatternField {
    pub(crate) fn new(pattern: String, regex: Regex, types: NestedTypes) -> Self {
        Self {
            pattern,
            regex,
            types,
        }
    }

    /// The pattern as written in the schema.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Whether `key` matches the pattern (unanchored, like JSON Schema).
    pub fn is_match(&self, key: &str) -> bool {
        self.regex.is_match(key)
    }

    /// Nested types for keys matching this pattern.
    pub fn types(&self) -> &NestedTypes {
        &self.types
    }
}

impl PartialEq for PatternField {
    fn eq(&self, other: &Self) -> bool {
        self.pattern == other.pattern && self.types == other.types
    }
}

/// Compiled representation of an `object` schema.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordType {
    fields: IndexMap<String, NestedTypes>,
    allows_additional_fields: bool,
    additional_fields_explicit: bool,
    patterns: Vec<PatternField>,
}

impl RecordType {
    pub(crate) fn new(allows_additional_fields: bool, additional_fields_explicit: bool) -> Self {
        Self {
            fields: IndexMap::new(),
            allows_additional_fields,
            additional_fields_explicit,
            patterns: Vec::new(),
        }
    }

    pub(crate) fn push_field(&mut self, name: String, types: NestedTypes) {
        self.fields.insert(name, types);
    }

    pub(crate) fn push_pattern(&mut self, pattern: PatternField) {
        self.patterns.push(pattern);
    }

    /// Explicit `properties` keys in declaration order.
    pub fn declared_fields(&self) -> impl Iterator<Item = &str> + '_ {
        self.fields.keys().map(String::as_str)
    }

    /// Whether `name` is an explicit `properties` key.
    pub fn is_declared(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// `false` only when `additionalProperties` is literally `false`.
    pub fn allows_additional_fields(&self) -> bool {
        self.allows_additional_fields
    }

    /// Whether the schema stated `additionalProperties` at all.
    pub fn additional_fields_explicit(&self) -> bool {
        self.additional_fields_explicit
    }

    /// Open when additional fields are allowed and either no pattern fields
    /// exist or `additionalProperties` was stated explicitly.
    pub fn field_policy(&self) -> FieldPolicy {
        let open = self.allows_additional_fields
            && (self.patterns.is_empty() || self.additional_fields_explicit);
        if open {
            FieldPolicy::Open
        } else {
            FieldPolicy::Closed
        }
    }

    /// Nested types of a declared field.
    pub fn field_types(&self, name: &str) -> Option<&NestedTypes> {
        self.fields.get(name)
    }

    /// Nested record type of a declared field.
    pub fn field_record_type(&self, name: &str) -> Option<&Arc<RecordType>> {
        self.fields.get(name)?.record.as_ref()
    }

    /// Nested list type of a declared field.
    pub fn field_list_type(&self, name: &str) -> Option<&Arc<ListType>> {
        self.fields.get(name)?.list.as_ref()
    }

    /// `patternProperties` entries in declaration order.
    pub fn pattern_fields(&self) -> &[PatternField] {
        &self.patterns
    }

    /// `patternProperties` keys in declaration order.
    pub fn pattern_field_patterns(&self) -> impl Iterator<Item = &str> + '_ {
        self.patterns.iter().map(PatternField::pattern)
    }

    /// Nested record type registered for a pattern string.
    pub fn pattern_record_type(&self, pattern: &str) -> Option<&Arc<RecordType>> {
        self.pattern(pattern)?.types.record.as_ref()
    }

    /// Nested list type registered for a pattern string.
    pub fn pattern_list_type(&self, pattern: &str) -> Option<&Arc<ListType>> {
        self.pattern(pattern)?.types.list.as_ref()
    }

    /// First pattern, in declaration order, matching `key`.
    pub fn matching_pattern(&self, key: &str) -> Option<&PatternField> {
        self.patterns.iter().find(|p| p.is_match(key))
    }

    /// Nested types governing `key`: the declared field's, else the first
    /// matching pattern's.
    pub fn types_for_key(&self, key: &str) -> Option<&NestedTypes> {
        self.fields
            .get(key)
            .or_else(|| self.matching_pattern(key).map(PatternField::types))
    }

    fn pattern(&self, pattern: &str) -> Option<&PatternField> {
        self.patterns.iter().find(|p| p.pattern == pattern)
    }
}

/// Compiled representation of an `array` schema's `items`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ListType {
    items: NestedTypes,
}

impl ListType {
    pub(crate) fn new(items: NestedTypes) -> Self {
        Self { items }
    }

    /// Nested types of each element.
    pub fn item_types(&self) -> &NestedTypes {
        &self.items
    }

    /// Record type elements that are maps bind to.
    pub fn item_record_type(&self) -> Option<&Arc<RecordType>> {
        self.items.record.as_ref()
    }

    /// List type elements that are sequences bind through.
    pub fn item_list_type(&self) -> Option<&Arc<ListType>> {
        self.items.list.as_ref()
    }
}
