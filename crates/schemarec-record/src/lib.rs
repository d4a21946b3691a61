//! # schemarec-record — Binding Values to Compiled Schemas
//!
//! Binds decoded JSON values to the type trees built by `schemarec-schema`.
//!
//! - [`RecordSchema`] compiles a schema and binds values against it.
//! - [`bind()`] / [`bind_list_item`] are the binder itself.
//! - [`RecordInstance`] / [`BoundValue`] are the results: read-only,
//!   serializable, with dotted-path lookup.
//!
//! ## Example
//!
//! ```
//! use schemarec_record::RecordSchema;
//! use serde_json::json;
//!
//! let schema = RecordSchema::from_document(
//!     json!({"type": "object", "properties": {"latitude": {}, "longitude": {}}}),
//!     ".",
//! )
//! .unwrap();
//!
//! let home = schema
//!     .bind_value(&json!({"latitude": 10, "longitude": 20, "name": "home"}))
//!     .unwrap();
//! assert_eq!(home.field("name").unwrap().as_str(), Some("home"));
//!
//! let work = schema.bind_value(&json!({"latitude": 11, "longitude": 21})).unwrap();
//! assert!(work.field("name").is_err());
//! ```

pub mod bind;
pub mod instance;
pub mod path;
pub mod schema;

pub use bind::{bind, bind_list_item, bind_nested};
pub use instance::{BoundValue, RecordInstance};
pub use schema::RecordSchema;
