#![deny(missing_docs)]

//! # schemarec-core — Foundational Types for schemarec
//!
//! This crate defines the types every other crate in the workspace depends
//! on. It has no internal crate dependencies, only `serde`, `serde_json` and
//! `thiserror` from the external ecosystem.
//!
//! ## Contents
//!
//! 1. **[`SchemaRecordError`] hierarchy.** Structured errors with
//!    `thiserror`: load, invalid-schema, reference, field-access and bind
//!    failures each have their own enum.
//!
//! 2. **[`SchemaRoot`].** The explicit directory top-level schema paths are
//!    resolved against, threaded into every compile call.
//!
//! 3. **[`TypeSet`].** The JSON Schema `type` keyword normalized to a set,
//!    so union types are handled additively.

pub mod config;
pub mod error;
pub mod json_type;

// Re-export primary types at crate root for ergonomic imports.
pub use config::{SchemaRoot, SCHEMA_ROOT_ENV};
pub use error::{
    json_kind, BindError, FieldAccessError, InvalidSchemaError, ReferenceError, SchemaLoadError,
    SchemaRecordError,
};
pub use json_type::{JsonType, TypeSet, UnknownJsonType};
