//! # JSON Type Sets
//!
//! The JSON Schema `type` keyword may be a single type name or an array of
//! names. [`TypeSet`] normalizes both forms into an ordered set so the
//! compiler can treat union types (`["object", "null"]`) additively.
//!
//! Unknown names and non-string members contribute nothing; the compiler
//! does not validate schemas.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One JSON Schema primitive type name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JsonType {
    /// `object`
    Object,
    /// `array`
    Array,
    /// `string`
    String,
    /// `number`
    Number,
    /// `integer`
    Integer,
    /// `boolean`
    Boolean,
    /// `null`
    Null,
}

impl JsonType {
    /// The keyword spelling of this type.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Object => "object",
            Self::Array => "array",
            Self::String => "string",
            Self::Number => "number",
            Self::Integer => "integer",
            Self::Boolean => "boolean",
            Self::Null => "null",
        }
    }
}

impl fmt::Display for JsonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string is not a JSON Schema type name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownJsonType(
    /// The rejected name.
    pub String,
);

impl fmt::Display for UnknownJsonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown JSON type name {:?}", self.0)
    }
}

impl std::error::Error for UnknownJsonType {}

impl FromStr for JsonType {
    type Err = UnknownJsonType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "object" => Ok(Self::Object),
            "array" => Ok(Self::Array),
            "string" => Ok(Self::String),
            "number" => Ok(Self::Number),
            "integer" => Ok(Self::Integer),
            "boolean" => Ok(Self::Boolean),
            "null" => Ok(Self::Null),
            other => Err(UnknownJsonType(other.to_string())),
        }
    }
}

/// The normalized `type` keyword of a schema node.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeSet(BTreeSet<JsonType>);

impl TypeSet {
    /// An empty set (no `type` keyword).
    pub fn empty() -> Self {
        Self::default()
    }

    /// Read the `type` keyword of a schema node. Non-object nodes and
    /// nodes without `type` yield the empty set.
    pub fn of_schema(schema: &Value) -> Self {
        schema
            .get("type")
            .map(Self::from_keyword)
            .unwrap_or_default()
    }

    /// Normalize a `type` keyword value.
    pub fn from_keyword(keyword: &Value) -> Self {
        let names: Vec<&str> = match keyword {
            Value::String(name) => vec![name.as_str()],
            Value::Array(items) => items.iter().filter_map(Value::as_str).collect(),
            _ => Vec::new(),
        };
        names
            .into_iter()
            .filter_map(|name| name.parse::<JsonType>().ok())
            .collect()
    }

    /// Whether `ty` is a member.
    pub fn contains(&self, ty: JsonType) -> bool {
        self.0.contains(&ty)
    }

    /// Whether no type names were declared.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of distinct type names.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Members in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = JsonType> + '_ {
        self.0.iter().copied()
    }

    /// Type names as strings, in canonical order.
    pub fn names(&self) -> Vec<String> {
        self.iter().map(|t| t.as_str().to_string()).collect()
    }
}

impl FromIterator<JsonType> for TypeSet {
    fn from_iter<I: IntoIterator<Item = JsonType>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
