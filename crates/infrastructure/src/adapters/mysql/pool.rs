use std::sync::Arc;

// =============================================================================
// MySqlPool
// =============================================================================

/// Shared handle to the underlying `sqlx` connection pool.
#[derive(Clone)]
pub struct MySqlPool {
    inner: Arc<sqlx::MySqlPool>,
}

impl MySqlPool {
    #[must_use]
    pub fn new(pool: sqlx::MySqlPool) -> Self {
        Self {
            inner: Arc::new(pool),
        }
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.inner.is_closed()
    }

    pub async fn close(&self) {
        self.inner.close().await;
    }

    #[must_use]
    pub fn as_inner(&self) -> &sqlx::MySqlPool {
        &self.inner
    }
}

impl From<sqlx::MySqlPool> for MySqlPool {
    fn from(pool: sqlx::MySqlPool) -> Self {
        Self::new(pool)
    }
}

impl AsRef<sqlx::MySqlPool> for MySqlPool {
    fn as_ref(&self) -> &sqlx::MySqlPool {
        &self.inner
    }
}

impl std::fmt::Debug for MySqlPool {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("MySqlPool")
            .field("is_closed", &self.is_closed())
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Tests
// =============================================================================
