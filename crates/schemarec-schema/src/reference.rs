//! # `$ref` Resolution
//!
//! A reference string has the form `[filename]#[/json-pointer]`, split at the
//! first `#`. An empty filename points into the current document; anything
//! else loads the named file relative to the current context's base
//! directory, and the returned context is the foreign file's own, so
//! references nested inside the fragment resolve relative to that file.
//!
//! Pointer segments are used as literal map keys. `~0` and `~1` escapes are
//! not decoded, so a key containing `/` cannot be addressed.

use serde_json::Value;

use schemarec_core::{ReferenceError, SchemaRecordError};

use crate::context::SchemaContext;

/// A `$ref` string split into its file and pointer parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchemaRef<'a> {
    raw: &'a str,
    file: &'a str,
    pointer: &'a str,
}

impl<'a> SchemaRef<'a> {
    /// Split a reference at its first `#`. A string without `#` names a
    /// whole file.
    pub fn parse(raw: &'a str) -> Self {
        let (file, pointer) = raw.split_once('#').unwrap_or((raw, ""));
        Self { raw, file, pointer }
    }

    /// The reference as written.
    pub fn raw(&self) -> &'a str {
        self.raw
    }

    /// The filename part; empty for same-document references.
    pub fn file(&self) -> &'a str {
        self.file
    }

    /// The JSON Pointer part (after `#`).
    pub fn pointer(&self) -> &'a str {
        self.pointer
    }

    /// Whether the reference points into the current document.
    pub fn is_local(&self) -> bool {
        self.file.is_empty()
    }
}

/// Split a JSON Pointer into map keys. A leading `/` and trailing empty
/// segments are dropped; an empty pointer addresses the whole document.
pub fn pointer_segments(pointer: &str) -> Vec<&str> {
    let mut segments: Vec<&str> = pointer.split('/').collect();
    if pointer.starts_with('/') {
        segments.remove(0);
    }
    while segments.last() == Some(&"") {
        segments.pop();
    }
    segments
}

/// Walk `segments` from `document`. `None` when a segment is missing or
/// the current node is not a map.
pub fn walk_pointer<'v>(document: &'v Value, segments: &[&str]) -> Option<&'v Value> {
    segments
        .iter()
        .try_fold(document, |node, segment| node.as_object()?.get(*segment))
}

/// The fragment a reference points to, and the context its own nested
/// references must be resolved against.
#[derive(Debug, Clone)]
pub struct ResolvedRef {
    /// The referenced schema fragment.
    pub node: Value,
    /// Same context for local references; the foreign file's otherwise.
    pub context: SchemaContext,
    /// The pointer, normalized to `/seg/seg` form.
    pub pointer: String,
}

/// Resolve `reference` against `context`.
///
/// # Errors
///
/// [`SchemaRecordError::Load`] if a referenced file cannot be loaded,
/// [`ReferenceError::NotFound`] if the pointer cannot be walked to the end.
pub fn resolve(reference: &str, context: &SchemaContext) -> Result<ResolvedRef, SchemaRecordError> {
    let parsed = SchemaRef::parse(reference);

    let target = if parsed.is_local() {
        context.clone()
    } else {
        SchemaContext::load(parsed.file(), context.base_dir())?
    };

    let segments = pointer_segments(parsed.pointer());
    let node = walk_pointer(target.document(), &segments).ok_or_else(|| {
        ReferenceError::NotFound {
            reference: reference.to_string(),
            pointer: parsed.pointer().to_string(),
        }
    })?;

    let pointer = segments
        .iter()
        .fold(String::new(), |acc, segment| format!("{acc}/{segment}"));

    tracing::trace!(
        reference,
        from = %context.label(),
        to = %target.label(),
        "resolved $ref"
    );

    Ok(ResolvedRef {
        node: node.clone(),
        context: target,
        pointer,
    })
}
