//! Error types for paygate-types

use thiserror::Error;

/// Result type for field assembly.
pub type FieldResult<T> = Result<T, FieldError>;

/// Errors raised while assembling a [`FieldSet`](crate::FieldSet).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FieldError {
    /// A field with this name is already present.
    #[error("duplicate field: {name}")]
    DuplicateField { name: String },

    /// Field names must be non-empty.
    #[error("field name must not be empty")]
    EmptyName,
}
