//! # schemarec-schema — Schema Compilation
//!
//! Turns a JSON Schema document into an immutable tree of [`RecordType`]s
//! and [`ListType`]s that the binder in `schemarec-record` walks.
//!
//! ## Pipeline
//!
//! 1. [`SchemaContext`] loads a document and remembers the directory its
//!    relative references resolve against.
//! 2. [`reference::resolve`] follows a `$ref`, switching context when the
//!    reference crosses into another file.
//! 3. [`TypeCompiler`] walks `properties`, `patternProperties` and `items`,
//!    building nested types for every sub-schema whose `type` includes
//!    `object` or `array`.
//!
//! Recognized keywords: `type`, `properties`, `patternProperties`,
//! `additionalProperties`, `items`, `$ref`. Everything else is ignored;
//! no validation is performed.
//!
//! ## Usage
//!
//! ```
//! use schemarec_schema::compile_document;
//! use serde_json::json;
//!
//! let record = compile_document(
//!     json!({
//!         "type": "object",
//!         "properties": {"latitude": {"type": "number"}, "longitude": {"type": "number"}}
//!     }),
//!     ".",
//! )
//! .unwrap();
//! assert_eq!(record.declared_fields().collect::<Vec<_>>(), vec!["latitude", "longitude"]);
//! ```

pub mod compile;
pub mod context;
pub mod reference;
pub mod types;

pub use compile::{compile_document, compile_file, TypeCompiler};
pub use context::SchemaContext;
pub use reference::{ResolvedRef, SchemaRef};
pub use types::{FieldPolicy, ListType, NestedTypes, PatternField, RecordType, TypeNode};
