//! # Bound Values
//!
//! A [`RecordInstance`] is an ordered map from exposed field name to
//! [`BoundValue`], fixed when the binder builds it. Two instances of the
//! same [`RecordType`] may expose different field sets; the instance, not
//! the type, is the authority on which names are readable.

use std::sync::Arc;

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{Map, Value};

use schemarec_core::FieldAccessError;
use schemarec_schema::RecordType;

/// A field value after coercion.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum BoundValue {
    /// A map bound through a nested record type.
    Record(RecordInstance),
    /// A sequence bound through a nested list type, element by element.
    List(Vec<BoundValue>),
    /// Passed through unchanged: scalars, `null`, and shape mismatches.
    Raw(Value),
}

impl BoundValue {
    /// The nested record, if this value was bound as one.
    pub fn as_record(&self) -> Option<&RecordInstance> {
        match self {
            Self::Record(record) => Some(record),
            _ => None,
        }
    }

    /// The bound elements, if this value was bound through a list type.
    pub fn as_list(&self) -> Option<&[BoundValue]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// The untouched input value, if it was passed through.
    pub fn as_raw(&self) -> Option<&Value> {
        match self {
            Self::Raw(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        self.as_raw()?.as_str()
    }

    pub fn as_i64(&self) -> Option<i64> {
        self.as_raw()?.as_i64()
    }

    pub fn as_u64(&self) -> Option<u64> {
        self.as_raw()?.as_u64()
    }

    pub fn as_f64(&self) -> Option<f64> {
        self.as_raw()?.as_f64()
    }

    pub fn as_bool(&self) -> Option<bool> {
        self.as_raw()?.as_bool()
    }

    /// Whether this is a passed-through `null` (including a missing
    /// declared field).
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Raw(Value::Null))
    }

    /// JSON kind name of the value, for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Record(_) => "record",
            Self::List(_) => "list",
            Self::Raw(value) => schemarec_core::json_kind(value),
        }
    }

    /// Convert back to plain JSON. Dropped keys stay dropped.
    pub fn to_value(&self) -> Value {
        match self {
            Self::Record(record) => record.to_value(),
            Self::List(items) => Value::Array(items.iter().map(BoundValue::to_value).collect()),
            Self::Raw(value) => value.clone(),
        }
    }
}

/// A map bound to a [`RecordType`].
///
/// Serializes as a JSON object of its exposed fields, in order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RecordInstance {
    fields: IndexMap<String, BoundValue>,
    #[serde(skip)]
    record_type: Arc<RecordType>,
}

impl RecordInstance {
    pub(crate) fn new(record_type: Arc<RecordType>, fields: IndexMap<String, BoundValue>) -> Self {
        Self {
            fields,
            record_type,
        }
    }

    /// Read an exposed field.
    ///
    /// # Errors
    ///
    /// [`FieldAccessError::NoSuchField`] when this instance does not expose
    /// `name`, even if the record type declares it elsewhere.
    pub fn field(&self, name: &str) -> Result<&BoundValue, FieldAccessError> {
        self.fields
            .get(name)
            .ok_or_else(|| FieldAccessError::NoSuchField {
                field: name.to_string(),
                available: self.field_names().map(str::to_string).collect(),
            })
    }

    pub fn get(&self, name: &str) -> Option<&BoundValue> {
        self.fields.get(name)
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Exposed field names in binding order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.fields.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &BoundValue)> + '_ {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// The compiled type this instance was bound from.
    pub fn record_type(&self) -> &Arc<RecordType> {
        &self.record_type
    }

    /// Convert back to a plain JSON object of the exposed fields.
    pub fn to_value(&self) -> Value {
        let map: Map<String, Value> = self
            .fields
            .iter()
            .map(|(name, value)| (name.clone(), value.to_value()))
            .collect();
        Value::Object(map)
    }
}

impl<'a> IntoIterator for &'a RecordInstance {
    type Item = (&'a String, &'a BoundValue);
    type IntoIter = indexmap::map::Iter<'a, String, BoundValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}
