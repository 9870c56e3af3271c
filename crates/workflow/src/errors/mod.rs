use std::error::Error;
use std::fmt;

use robomart_domain::common::ValidationError;

use crate::ports::StoreError;

// =============================================================================
// WorkflowError
// =============================================================================

/// Error surfaced by workflow operations.
///
/// `Conflict` is internal to the transaction retry loop and only escapes
/// when the retry budget is exhausted; callers otherwise observe the
/// remaining variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkflowError {
    InvalidArgument {
        message: String,
    },

    NotFound {
        entity_type: String,
        identifier: String,
    },

    Conflict {
        reason: String,
    },

    Storage {
        operation: String,
        message: String,
    },

    Timeout {
        operation: String,
    },
}

// =============================================================================
// Factory Methods
// =============================================================================

impl WorkflowError {
    #[must_use]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn not_found(entity_type: impl Into<String>, identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: entity_type.into(),
            identifier: identifier.into(),
        }
    }

    #[must_use]
    pub fn conflict(reason: impl Into<String>) -> Self {
        Self::Conflict {
            reason: reason.into(),
        }
    }

    #[must_use]
    pub fn storage(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Storage {
            operation: operation.into(),
            message: message.into(),
        }
    }

    #[must_use]
    pub fn timeout(operation: impl Into<String>) -> Self {
        Self::Timeout {
            operation: operation.into(),
        }
    }
}

// =============================================================================
// Query Methods
// =============================================================================

impl WorkflowError {
    #[must_use]
    pub const fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument { .. })
    }

    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    #[must_use]
    pub const fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict { .. })
    }

    #[must_use]
    pub const fn is_storage(&self) -> bool {
        matches!(self, Self::Storage { .. })
    }

    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}

// =============================================================================
// Display and Error Implementations
// =============================================================================

impl fmt::Display for WorkflowError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidArgument { message } => {
                write!(formatter, "Invalid argument: {}", message)
            }
            Self::NotFound {
                entity_type,
                identifier,
            } => {
                write!(
                    formatter,
                    "{} with identifier '{}' not found",
                    entity_type, identifier
                )
            }
            Self::Conflict { reason } => {
                write!(formatter, "Conflict: {}", reason)
            }
            Self::Storage { operation, message } => {
                write!(formatter, "Storage {} failed: {}", operation, message)
            }
            Self::Timeout { operation } => {
                write!(formatter, "Operation '{}' timed out", operation)
            }
        }
    }
}

impl Error for WorkflowError {}

// =============================================================================
// From Implementations
// =============================================================================

impl From<ValidationError> for WorkflowError {
    fn from(error: ValidationError) -> Self {
        Self::invalid_argument(error.to_string())
    }
}

impl From<StoreError> for WorkflowError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::Storage { operation, message } => Self::Storage { operation, message },
            StoreError::Conflict { operation, message } => Self::Conflict {
                reason: format!("{}: {}", operation, message),
            },
            StoreError::NotFound {
                entity_type,
                identifier,
            } => Self::NotFound {
                entity_type,
                identifier,
            },
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    mod factory_methods {
        use super::*;

        #[rstest]
        fn invalid_argument_creates_error() {
            let error = WorkflowError::invalid_argument("capacity must be non-negative");
            assert!(error.is_invalid_argument());
        }

        #[rstest]
        fn not_found_creates_error() {
            let error = WorkflowError::not_found("Order", "42");
            assert!(error.is_not_found());
        }

        #[rstest]
        fn timeout_creates_error() {
            let error = WorkflowError::timeout("generate_delivery_plan");
            assert!(error.is_timeout());
        }
    }

    mod display {
        use super::*;

        #[rstest]
        fn invalid_argument_display() {
            let error = WorkflowError::invalid_argument("bad input");
            assert_eq!(format!("{}", error), "Invalid argument: bad input");
        }

        #[rstest]
        fn not_found_display() {
            let error = WorkflowError::not_found("Order", "42");
            assert_eq!(format!("{}", error), "Order with identifier '42' not found");
        }

        #[rstest]
        fn conflict_display() {
            let error = WorkflowError::conflict("concurrent writer");
            assert_eq!(format!("{}", error), "Conflict: concurrent writer");
        }

        #[rstest]
        fn storage_display() {
            let error = WorkflowError::storage("fetch_shipping", "connection reset");
            assert_eq!(
                format!("{}", error),
                "Storage fetch_shipping failed: connection reset"
            );
        }

        #[rstest]
        fn timeout_display() {
            let error = WorkflowError::timeout("generate_delivery_plan");
            assert_eq!(
                format!("{}", error),
                "Operation 'generate_delivery_plan' timed out"
            );
        }
    }

    mod from_trait {
        use super::*;

        #[rstest]
        fn validation_error_becomes_invalid_argument() {
            let error: WorkflowError = ValidationError::empty_value("robot_id").into();
            assert!(error.is_invalid_argument());
        }

        #[rstest]
        fn store_storage_becomes_storage() {
            let error: WorkflowError = StoreError::storage("begin", "io error").into();
            assert!(error.is_storage());
        }

        #[rstest]
        fn store_conflict_becomes_conflict() {
            let error: WorkflowError = StoreError::conflict("commit", "deadlock").into();
            assert!(error.is_conflict());
        }

        #[rstest]
        fn store_not_found_becomes_not_found() {
            let error: WorkflowError = StoreError::not_found("Order", "9").into();
            assert!(error.is_not_found());
        }
    }
}
