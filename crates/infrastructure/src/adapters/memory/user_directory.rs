//! In-memory user directory for tests and local development.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use robomart_domain::order::UserId;
use robomart_workflow::ports::{StoreError, UserDirectory, UserRecord};

// =============================================================================
// InMemoryUserDirectory
// =============================================================================

#[derive(Clone, Default)]
pub struct InMemoryUserDirectory {
    users: Arc<Mutex<HashMap<String, UserRecord>>>,
}

impl InMemoryUserDirectory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_user(&self, user_id: UserId, user_name: impl Into<String>, password_hash: impl Into<String>) {
        let user_name = user_name.into();
        self.users.lock().expect("directory lock poisoned").insert(
            user_name.clone(),
            UserRecord {
                user_id,
                user_name,
                password_hash: password_hash.into(),
            },
        );
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn find_by_user_name(&self, user_name: &str) -> Result<Option<UserRecord>, StoreError> {
        Ok(self
            .users
            .lock()
            .expect("directory lock poisoned")
            .get(user_name)
            .cloned())
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
    async fn finds_registered_users() {
        let directory = InMemoryUserDirectory::new();
        directory.add_user(UserId::new(1).unwrap(), "alice", "digest");

        let record = directory.find_by_user_name("alice").await.unwrap().unwrap();

        assert_eq!(record.user_id.value(), 1);
        assert_eq!(record.password_hash, "digest");
    }

    #[rstest]
    #[tokio::test]
    async fn unknown_user_is_none() {
        let directory = InMemoryUserDirectory::new();

        assert!(directory.find_by_user_name("bob").await.unwrap().is_none());
    }
}
