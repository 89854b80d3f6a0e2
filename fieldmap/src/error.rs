//! Error types for field reads.

use thiserror::Error;

use crate::FieldKind;

/// Result type for a single field read.
pub type AccessResult<T> = Result<T, AccessError>;

/// Errors raised while reading one field of a source object.
///
/// These never escape a [`Mapper`](crate::Mapper): the mapper logs them and
/// records the field as [`Value::Null`](crate::Value::Null).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessError {
    /// The descriptor was registered for a different type than the source.
    #[error("source is not a {expected}")]
    SourceMismatch { expected: &'static str },

    /// The raw value does not have the field's declared primitive kind.
    #[error("field `{field}` does not hold a {expected} value")]
    KindMismatch {
        field: &'static str,
        expected: FieldKind,
    },

    /// A computed accessor could not produce a value.
    #[error("field `{field}` is unavailable: {reason}")]
    Unavailable { field: &'static str, reason: String },
}
