use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::user::models::LoginName;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::CredentialStore;
use crate::user::errors::StoreError;

#[derive(Default)]
struct Records {
    users: HashMap<UserId, User>,
    /// login name -> id, the uniqueness index
    login_index: HashMap<String, UserId>,
}

/// Process-local CredentialStore.
///
/// The existence check and the write happen under one write lock, which gives
/// the same compare-and-insert guarantee as a database unique index within a
/// single process.
#[derive(Default)]
pub struct InMemoryCredentialStore {
    records: RwLock<Records>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub async fn len(&self) -> usize {
        self.records.read().await.users.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn initialize(&self) -> Result<(), StoreError> {
        tracing::debug!(store = "memory", "Credential store initialized");
        Ok(())
    }

    async fn insert(&self, user: NewUser) -> Result<User, StoreError> {
        let mut records = self.records.write().await;

        if records.login_index.contains_key(user.login_name.as_str()) {
            return Err(StoreError::DuplicateKey(user.login_name.to_string()));
        }

        let user = user.into_user(UserId::new());
        records
            .login_index
            .insert(user.login_name.as_str().to_string(), user.id);
        records.users.insert(user.id, user.clone());

        Ok(user)
    }

    async fn find_by_login_name(&self, login_name: &LoginName) -> Result<Option<User>, StoreError> {
        let records = self.records.read().await;

        Ok(records
            .login_index
            .get(login_name.as_str())
            .and_then(|id| records.users.get(id))
            .cloned())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, StoreError> {
        Ok(self.records.read().await.users.get(id).cloned())
    }
}
