//! Unified error type definition

use serde::Serialize;
use thiserror::Error;

// Re-export library error type
pub use ingredient_admin_store::StoreError;

use crate::types::FormField;

/// Core layer error type
#[derive(Error, Debug, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum CoreError {
    /// Required fields are empty (after trimming)
    #[error("Missing required fields: {}", join_fields(.0))]
    MissingRequiredFields(Vec<FormField>),

    /// Slug is derived from the name while creating
    #[error("Slug is read-only while creating an ingredient")]
    SlugReadOnly,

    /// Record not found
    #[error("Ingredient not found: {0}")]
    RecordNotFound(String),

    /// Validation error
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Store error (converting from library)
    #[error("{0}")]
    Store(#[from] StoreError),
}

fn join_fields(fields: &[FormField]) -> String {
    fields
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

impl CoreError {
    /// Whether it is expected behavior (user input, missing record, rejected
    /// write), used for log classification.
    ///
    /// `true` should be logged at `warn`, `false` at `error`.
    /// **Update this method when adding variants.**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::MissingRequiredFields(_)
            | Self::SlugReadOnly
            | Self::RecordNotFound(_)
            | Self::ValidationError(_) => true,
            Self::Store(e) => e.is_expected(),
        }
    }
}

/// Core layer Result type alias
pub type CoreResult<T> = std::result::Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_lists_every_field() {
        let e = CoreError::MissingRequiredFields(vec![FormField::Name, FormField::Benefits]);
        assert_eq!(e.to_string(), "Missing required fields: name, benefits");
    }

    #[test]
    fn store_error_is_transparent() {
        let e: CoreError = StoreError::RecordExists {
            constraint: Some("ingredients_slug_key".to_string()),
            raw_message: None,
        }
        .into();
        assert_eq!(
            e.to_string(),
            "Record already exists (violates 'ingredients_slug_key')"
        );
        assert!(e.is_expected());
    }

    #[test]
    fn transport_failures_are_unexpected() {
        let e = CoreError::Store(StoreError::Timeout {
            detail: "30s".to_string(),
        });
        assert!(!e.is_expected());
    }

    #[test]
    fn serializes_with_code_and_details() {
        let json = serde_json::to_value(CoreError::RecordNotFound("42".to_string())).unwrap();
        assert_eq!(json["code"], "RecordNotFound");
        assert_eq!(json["details"], "42");
    }
}
