//! MySQL lookup of registered users for the authentication layer.

use async_trait::async_trait;
use robomart_domain::order::UserId;
use robomart_workflow::ports::{StoreError, UserDirectory, UserRecord};
use sqlx::Row;

use super::MySqlPool;
use crate::errors::map_sqlx_error;

// =============================================================================
// MySqlUserDirectory
// =============================================================================

#[derive(Clone)]
pub struct MySqlUserDirectory {
    pool: MySqlPool,
}

impl MySqlUserDirectory {
    #[must_use]
    pub const fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserDirectory for MySqlUserDirectory {
    async fn find_by_user_name(&self, user_name: &str) -> Result<Option<UserRecord>, StoreError> {
        let row = sqlx::query(
            "SELECT user_id, user_name, password_hash FROM users WHERE user_name = ?",
        )
        .bind(user_name)
        .fetch_optional(self.pool.as_inner())
        .await
        .map_err(|error| map_sqlx_error("find_by_user_name", error))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let user_id: i64 = row
            .try_get("user_id")
            .map_err(|error| map_sqlx_error("find_by_user_name", error))?;
        let user_name: String = row
            .try_get("user_name")
            .map_err(|error| map_sqlx_error("find_by_user_name", error))?;
        let password_hash: String = row
            .try_get("password_hash")
            .map_err(|error| map_sqlx_error("find_by_user_name", error))?;

        Ok(Some(UserRecord {
            user_id: UserId::new(user_id)
                .map_err(|error| StoreError::storage("find_by_user_name", error.to_string()))?,
            user_name,
            password_hash,
        }))
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
    fn directory_is_clone_send_sync() {
        fn assert_bounds<T: Clone + Send + Sync>() {}
        assert_bounds::<MySqlUserDirectory>();
    }
}
