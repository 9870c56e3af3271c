//! Error types for the common domain module.

use std::error::Error;
use std::fmt;

// =============================================================================
// ValidationError
// =============================================================================

/// Validation error variants for domain value objects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field was empty.
    EmptyValue {
        /// The name of the field that was empty.
        field: String,
    },
    /// A value was outside the valid range.
    OutOfRange {
        /// The name of the field that was out of range.
        field: String,
        /// The minimum allowed value.
        min: String,
        /// The maximum allowed value.
        max: String,
        /// The actual value that was provided.
        actual: String,
    },
    /// A value had an invalid format.
    InvalidFormat {
        /// The name of the field with invalid format.
        field: String,
        /// Description of the expected format.
        expected: String,
    },
}

impl ValidationError {
    /// Returns the name of the field that caused the error.
    #[must_use]
    pub fn field(&self) -> &str {
        match self {
            Self::EmptyValue { field }
            | Self::OutOfRange { field, .. }
            | Self::InvalidFormat { field, .. } => field,
        }
    }

    /// Creates an empty value error.
    pub fn empty_value(field: impl Into<String>) -> Self {
        Self::EmptyValue {
            field: field.into(),
        }
    }

    /// Creates an out of range error.
    pub fn out_of_range(
        field: impl Into<String>,
        min: impl ToString,
        max: impl ToString,
        actual: impl ToString,
    ) -> Self {
        Self::OutOfRange {
            field: field.into(),
            min: min.to_string(),
            max: max.to_string(),
            actual: actual.to_string(),
        }
    }

    /// Creates an invalid format error.
    pub fn invalid_format(field: impl Into<String>, expected: impl Into<String>) -> Self {
        Self::InvalidFormat {
            field: field.into(),
            expected: expected.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyValue { field } => {
                write!(formatter, "'{}' must not be empty", field)
            }
            Self::OutOfRange {
                field,
                min,
                max,
                actual,
            } => {
                write!(
                    formatter,
                    "'{}' must be between {} and {}, but was {}",
                    field, min, max, actual
                )
            }
            Self::InvalidFormat { field, expected } => {
                write!(formatter, "'{}' has invalid format: expected {}", field, expected)
            }
        }
    }
}

impl Error for ValidationError {}

// =============================================================================
// DomainError
// =============================================================================

/// Top-level error for domain operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value object failed validation.
    Validation(ValidationError),
}

impl fmt::Display for DomainError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation(error) => write!(formatter, "{}", error),
        }
    }
}

impl Error for DomainError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(error) => Some(error),
        }
    }
}

impl From<ValidationError> for DomainError {
    fn from(error: ValidationError) -> Self {
        Self::Validation(error)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    mod validation_error {
        use super::*;

        #[rstest]
        fn empty_value_display() {
            let error = ValidationError::empty_value("robot_id");
            assert_eq!(format!("{}", error), "'robot_id' must not be empty");
        }

        #[rstest]
        fn out_of_range_display() {
            let error = ValidationError::out_of_range("capacity", 0, 100, -3);
            assert_eq!(
                format!("{}", error),
                "'capacity' must be between 0 and 100, but was -3"
            );
        }

        #[rstest]
        fn invalid_format_display() {
            let error = ValidationError::invalid_format("shipped_status", "shipping|delivering|delivered");
            assert_eq!(
                format!("{}", error),
                "'shipped_status' has invalid format: expected shipping|delivering|delivered"
            );
        }

        #[rstest]
        #[case(ValidationError::empty_value("a"), "a")]
        #[case(ValidationError::out_of_range("b", 0, 1, 2), "b")]
        #[case(ValidationError::invalid_format("c", "x"), "c")]
        fn field_returns_field_name(#[case] error: ValidationError, #[case] expected: &str) {
            assert_eq!(error.field(), expected);
        }
    }

    mod domain_error {
        use super::*;
        use std::error::Error;

        #[rstest]
        fn wraps_validation_error() {
            let error: DomainError = ValidationError::empty_value("field").into();
            assert!(matches!(error, DomainError::Validation(_)));
        }

        #[rstest]
        fn source_is_validation_error() {
            let error: DomainError = ValidationError::empty_value("field").into();
            assert!(error.source().is_some());
        }
    }
}
