//! Error mapping from driver errors to the workflow's store errors.

use robomart_workflow::ports::StoreError;
use thiserror::Error;

// =============================================================================
// InfraError
// =============================================================================

/// Infrastructure-local failures that occur outside a port call, e.g.
/// while building a connection pool.
#[derive(Debug, Clone, Error)]
pub enum InfraError {
    #[error("Database error: {message}")]
    Database { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl InfraError {
    #[must_use]
    pub fn database(message: impl Into<String>) -> Self {
        Self::Database {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}

impl From<sqlx::Error> for InfraError {
    fn from(error: sqlx::Error) -> Self {
        Self::Database {
            message: error.to_string(),
        }
    }
}

// =============================================================================
// sqlx -> StoreError mapping
// =============================================================================

// MySQL error numbers the isolation layer uses to abort a transaction.
const ER_LOCK_DEADLOCK: u16 = 1213;
const ER_LOCK_WAIT_TIMEOUT: u16 = 1205;

/// Returns true when the driver error is a transaction conflict the
/// coordinator may retry.
#[must_use]
pub fn is_conflict(error: &sqlx::Error) -> bool {
    error
        .as_database_error()
        .and_then(|database_error| {
            database_error
                .try_downcast_ref::<sqlx::mysql::MySqlDatabaseError>()
                .map(|mysql_error| {
                    matches!(mysql_error.number(), ER_LOCK_DEADLOCK | ER_LOCK_WAIT_TIMEOUT)
                })
        })
        .unwrap_or(false)
}

/// Maps a driver error to the port error type, classifying retryable
/// conflicts.
#[must_use]
pub fn map_sqlx_error(operation: &str, error: sqlx::Error) -> StoreError {
    if is_conflict(&error) {
        StoreError::conflict(operation, error.to_string())
    } else {
        StoreError::storage(operation, error.to_string())
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    mod infra_error {
        use super::*;

        #[rstest]
        fn database_display() {
            let error = InfraError::database("connection refused");
            assert_eq!(format!("{}", error), "Database error: connection refused");
        }

        #[rstest]
        fn configuration_display() {
            let error = InfraError::configuration("missing DATABASE_URL");
            assert_eq!(
                format!("{}", error),
                "Configuration error: missing DATABASE_URL"
            );
        }
    }

    mod sqlx_mapping {
        use super::*;

        #[rstest]
        fn row_not_found_maps_to_storage() {
            let mapped = map_sqlx_error("fetch_shipping", sqlx::Error::RowNotFound);
            assert!(!mapped.is_conflict());
        }

        #[rstest]
        fn pool_timeout_maps_to_storage() {
            let mapped = map_sqlx_error("begin", sqlx::Error::PoolTimedOut);
            assert!(matches!(mapped, StoreError::Storage { .. }));
        }

        #[rstest]
        fn non_database_errors_are_not_conflicts() {
            assert!(!is_conflict(&sqlx::Error::RowNotFound));
            assert!(!is_conflict(&sqlx::Error::PoolTimedOut));
        }
    }
}
