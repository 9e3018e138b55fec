//! Field error types.

use thiserror::Error;

/// Errors surfaced by field hydration, type lookup, and policy loading.
///
/// Rendering itself never fails: blank content renders as an empty
/// string and the converter and sanitizer are total over `&str`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FieldError {
    #[error("unknown field type: {name}")]
    UnknownType { name: String },

    #[error("field content is not valid UTF-8 (at byte {valid_up_to})")]
    InvalidEncoding { valid_up_to: usize },

    #[error("unknown output mode '{0}' (expected 'xhtml' or 'html4')")]
    InvalidOutputMode(String),

    #[error("invalid sanitize policy: {0}")]
    InvalidPolicy(String),
}

impl FieldError {
    pub(crate) fn unknown_type(name: &str) -> Self {
        Self::UnknownType {
            name: name.to_string(),
        }
    }
}

/// Result type alias using FieldError.
pub type FieldResult<T> = Result<T, FieldError>;
