use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::user::models::LoginName;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::StoreError;
use crate::user::errors::UserError;
use crate::user::ports::CredentialStore;
use crate::user::ports::UserDirectoryPort;

/// Registration and authentication over a [`CredentialStore`].
///
/// Holds no mutable state of its own; the store is the only shared resource.
pub struct UserDirectory<S>
where
    S: CredentialStore,
{
    store: Arc<S>,
    password_hasher: auth::PasswordHasher,
}

impl<S> UserDirectory<S>
where
    S: CredentialStore,
{
    /// Create a new user directory over the given store.
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            password_hasher: auth::PasswordHasher::new(),
        }
    }
}

#[async_trait]
impl<S> UserDirectoryPort for UserDirectory<S>
where
    S: CredentialStore,
{
    async fn register(&self, command: RegisterUserCommand) -> Result<User, UserError> {
        let RegisterUserCommand {
            login_name,
            password,
            roles,
            email,
        } = command;

        // Fast path only; the store's unique index decides races below.
        if self.store.find_by_login_name(&login_name).await?.is_some() {
            return Err(UserError::AlreadyExists(login_name.to_string()));
        }

        let password_hash = self.password_hasher.hash(password.as_str())?;
        drop(password);

        let new_user = NewUser {
            login_name,
            password_hash,
            roles,
            email,
            created_at: Some(Utc::now()),
        };

        match self.store.insert(new_user).await {
            Ok(user) => {
                tracing::info!(
                    user_id = %user.id,
                    login_name = %user.login_name,
                    roles = %user.roles,
                    "User registered"
                );
                Ok(user.redacted())
            }
            Err(StoreError::DuplicateKey(login_name)) => {
                tracing::warn!(
                    login_name = %login_name,
                    "Registration lost uniqueness race"
                );
                Err(UserError::AlreadyExists(login_name))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn authenticate(
        &self,
        login_name: &str,
        password: &str,
    ) -> Result<Option<User>, UserError> {
        let Ok(login_name) = LoginName::new(login_name.to_string()) else {
            self.password_hasher.verify_decoy(password);
            return Ok(None);
        };

        let Some(user) = self.store.find_by_login_name(&login_name).await? else {
            self.password_hasher.verify_decoy(password);
            return Ok(None);
        };

        match self.password_hasher.verify(password, &user.password_hash) {
            Ok(true) => Ok(Some(user.redacted())),
            Ok(false) => Ok(None),
            Err(e) => {
                tracing::error!(user_id = %user.id, error = %e, "Stored password hash is unusable");
                Ok(None)
            }
        }
    }

    async fn get_by_login_name(&self, login_name: &LoginName) -> Result<Option<User>, UserError> {
        Ok(self
            .store
            .find_by_login_name(login_name)
            .await?
            .map(User::redacted))
    }

    async fn get_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        Ok(self.store.find_by_id(id).await?.map(User::redacted))
    }
}
