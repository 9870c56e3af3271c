use sqlx::mysql::MySqlPoolOptions;

use super::{MySqlPool, MySqlPoolConfig};
use crate::errors::InfraError;

// =============================================================================
// MySqlPoolFactory
// =============================================================================

/// Builds [`MySqlPool`] instances from a [`MySqlPoolConfig`].
pub struct MySqlPoolFactory;

impl MySqlPoolFactory {
    /// Creates a connection pool, establishing the minimum number of
    /// connections eagerly.
    ///
    /// # Errors
    ///
    /// Returns [`InfraError::Configuration`] for an empty URL and
    /// [`InfraError::Database`] when the pool cannot be established.
    pub async fn create_pool(config: &MySqlPoolConfig) -> Result<MySqlPool, InfraError> {
        if config.url.is_empty() {
            return Err(InfraError::configuration("database URL must not be empty"));
        }

        let pool = MySqlPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(config.connect_timeout)
            .idle_timeout(config.idle_timeout)
            .connect(&config.url)
            .await?;

        tracing::info!(
            max_connections = config.max_connections,
            "MySQL connection pool established"
        );

        Ok(MySqlPool::new(pool))
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn empty_url_is_a_configuration_error() {
        let config = MySqlPoolConfig::default();

        let error = MySqlPoolFactory::create_pool(&config).await.unwrap_err();

        assert!(matches!(error, InfraError::Configuration { .. }));
    }
}
