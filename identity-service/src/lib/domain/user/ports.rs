use async_trait::async_trait;

use crate::domain::user::models::LoginName;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::StoreError;
use crate::user::errors::UserError;

/// Port for user directory operations consumed by the gateway.
///
/// Every record returned across this port has its stored secret cleared.
#[async_trait]
pub trait UserDirectoryPort: Send + Sync + 'static {
    /// Register a new identity.
    ///
    /// # Arguments
    /// * `command` - Validated login name, plaintext password, roles and email
    ///
    /// # Returns
    /// Stored record (redacted)
    ///
    /// # Errors
    /// * `AlreadyExists` - Login name is taken, including when a concurrent
    ///   registration wins the store's uniqueness constraint
    /// * `Password` - Hashing failed
    /// * `Store` - Store operation failed
    async fn register(&self, command: RegisterUserCommand) -> Result<User, UserError>;

    /// Check a login name and plaintext password.
    ///
    /// Unknown login names and wrong passwords both yield `None`.
    ///
    /// # Errors
    /// * `Store` - Store operation failed
    async fn authenticate(&self, login_name: &str, password: &str)
        -> Result<Option<User>, UserError>;

    /// Retrieve a record by login name.
    async fn get_by_login_name(&self, login_name: &LoginName) -> Result<Option<User>, UserError>;

    /// Retrieve a record by identifier.
    async fn get_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;
}

/// Persistence operations for identity records.
///
/// Implementations own the login name uniqueness constraint; it is the only
/// guard against two concurrent registrations of the same name.
#[async_trait]
pub trait CredentialStore: Send + Sync + 'static {
    /// Establish the storage layout and the unique login name index.
    ///
    /// Safe to call more than once.
    ///
    /// # Errors
    /// * `Database` - Store operation failed
    async fn initialize(&self) -> Result<(), StoreError>;

    /// Persist a new record, assigning its identifier.
    ///
    /// # Arguments
    /// * `user` - Record to insert; `created_at` is stamped if unset
    ///
    /// # Returns
    /// Stored record with identifier
    ///
    /// # Errors
    /// * `DuplicateKey` - Login name already present; nothing is written
    /// * `Database` - Store operation failed
    async fn insert(&self, user: NewUser) -> Result<User, StoreError>;

    /// Retrieve record by login name (exact, case-sensitive).
    ///
    /// # Errors
    /// * `Database` - Store operation failed
    /// * `CorruptRecord` - Stored row no longer passes validation
    async fn find_by_login_name(&self, login_name: &LoginName) -> Result<Option<User>, StoreError>;

    /// Retrieve record by identifier.
    ///
    /// # Errors
    /// * `Database` - Store operation failed
    /// * `CorruptRecord` - Stored row no longer passes validation
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, StoreError>;
}
