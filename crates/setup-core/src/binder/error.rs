//! Errors raised while editing or collecting fields.

use thiserror::Error;

use super::field::{FieldKey, FieldKind};

/// An edit that cannot be applied to the field set.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum BindError {
    #[error("no field named {0}")]
    UnknownField(FieldKey),

    /// Text was typed into a choice field, or a choice was made on a text field.
    #[error("{field} is a {kind} field")]
    WrongKind { field: FieldKey, kind: FieldKind },

    #[error("'{choice}' is not one of the options for {field}")]
    InvalidChoice { field: FieldKey, choice: String },
}

/// A field whose state cannot be converted back into a typed value.
///
/// Blocks the save; the user corrects the named field and retries.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CollectError {
    #[error("{field}: '{text}' is not a number")]
    InvalidNumber { field: FieldKey, text: String },

    #[error("{field}: no model selected")]
    NoSelection { field: FieldKey },
}

impl CollectError {
    /// The field the user has to correct.
    pub fn field(&self) -> &FieldKey {
        match self {
            CollectError::InvalidNumber { field, .. } | CollectError::NoSelection { field } => {
                field
            }
        }
    }
}
