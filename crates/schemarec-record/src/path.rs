//! Dotted field paths over bound records: `board.0.0.piece`.
//!
//! Segments name fields on records and index elements of bound lists.
//! Passed-through values have no children.

use schemarec_core::FieldAccessError;

use crate::instance::{BoundValue, RecordInstance};

impl RecordInstance {
    /// Follow a dotted path starting at this record.
    ///
    /// # Errors
    ///
    /// [`FieldAccessError::NoSuchField`] for a name a record does not expose,
    /// [`FieldAccessError::IndexOutOfBounds`] for an index past a list's end,
    /// [`FieldAccessError::NotTraversable`] for a segment applied to a raw
    /// value or a non-numeric segment applied to a list.
    pub fn lookup(&self, path: &str) -> Result<&BoundValue, FieldAccessError> {
        let mut segments = path.split('.');
        let first = segments.next().unwrap_or(path);
        segments.try_fold(self.field(first)?, step)
    }
}

fn step<'a>(value: &'a BoundValue, segment: &str) -> Result<&'a BoundValue, FieldAccessError> {
    match value {
        BoundValue::Record(record) => record.field(segment),
        BoundValue::List(items) => {
            let index: usize = segment
                .parse()
                .map_err(|_| FieldAccessError::NotTraversable {
                    segment: segment.to_string(),
                    kind: value.kind(),
                })?;
            items.get(index).ok_or(FieldAccessError::IndexOutOfBounds {
                index,
                len: items.len(),
            })
        }
        BoundValue::Raw(_) => Err(FieldAccessError::NotTraversable {
            segment: segment.to_string(),
            kind: value.kind(),
        }),
    }
}
