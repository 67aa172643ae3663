//! Client-side request validation errors.

use thiserror::Error;

/// Errors raised before any I/O when request options are incomplete.
///
/// Write models and operation options check required fields and reject
/// empty identifiers so obviously broken requests fail fast.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field was not supplied.
    #[error("Missing required field: {field}")]
    MissingField {
        /// The name of the missing field.
        field: &'static str,
    },

    /// A field that must not be empty was set to an empty string.
    #[error("Field must not be empty: {field}")]
    EmptyValue {
        /// The name of the empty field.
        field: &'static str,
    },

    /// A field carries a value the API cannot accept.
    #[error("Invalid value for {field}: {message}")]
    InvalidValue {
        /// The name of the invalid field.
        field: &'static str,
        /// Why the value was rejected.
        message: String,
    },
}

impl ValidationError {
    /// Creates a missing field error.
    pub fn missing_field(field: &'static str) -> Self {
        Self::MissingField { field }
    }

    /// Creates an invalid value error.
    pub fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            field,
            message: message.into(),
        }
    }
}

/// Fails with [`ValidationError::EmptyValue`] when `value` is empty.
pub(crate) fn require_non_empty(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::EmptyValue { field });
    }
    Ok(())
}

/// Fails with [`ValidationError::MissingField`] when `value` is `None`,
/// and with [`ValidationError::EmptyValue`] when it is an empty string.
pub(crate) fn require_present<'a>(
    field: &'static str,
    value: Option<&'a str>,
) -> Result<&'a str, ValidationError> {
    let value = value.ok_or(ValidationError::MissingField { field })?;
    require_non_empty(field, value)?;
    Ok(value)
}
