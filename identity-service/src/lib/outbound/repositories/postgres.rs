use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::LoginName;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::Roles;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::CredentialStore;
use crate::user::errors::StoreError;

/// Name of the unique constraint guarding `users.login_name`.
const LOGIN_NAME_CONSTRAINT: &str = "users_login_name_key";

/// PostgreSQL implementation of CredentialStore.
///
/// Uniqueness of login names is enforced by the `users_login_name_key`
/// constraint created in the migrations; a violating insert is reported as
/// `DuplicateKey` and leaves no row behind.
pub struct PostgresCredentialStore {
    pool: PgPool,
}

impl PostgresCredentialStore {
    /// Create a new PostgreSQL credential store.
    ///
    /// # Arguments
    /// * `pool` - PostgreSQL connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    login_name: String,
    password_hash: String,
    roles: String,
    email: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = StoreError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let corrupt = |field: &str, e: String| {
            StoreError::CorruptRecord(format!("user {} has invalid {}: {}", row.id, field, e))
        };

        Ok(User {
            id: UserId(row.id),
            login_name: LoginName::new(row.login_name.clone())
                .map_err(|e| corrupt("login_name", e.to_string()))?,
            password_hash: row.password_hash.clone(),
            roles: Roles::parse(&row.roles).map_err(|e| corrupt("roles", e.to_string()))?,
            email: EmailAddress::new(row.email.clone())
                .map_err(|e| corrupt("email", e.to_string()))?,
            created_at: row.created_at,
        })
    }
}

#[async_trait]
impl CredentialStore for PostgresCredentialStore {
    async fn initialize(&self) -> Result<(), StoreError> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| StoreError::Database(e.to_string()))?;

        tracing::info!(database = "postgresql", "Credential store initialized");
        Ok(())
    }

    async fn insert(&self, user: NewUser) -> Result<User, StoreError> {
        let user = user.into_user(UserId::new());

        sqlx::query(
            r#"
            INSERT INTO users (id, login_name, password_hash, roles, email, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(user.id.0)
        .bind(user.login_name.as_str())
        .bind(&user.password_hash)
        .bind(user.roles.to_delimited())
        .bind(user.email.as_str())
        .bind(user.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() && db_err.constraint() == Some(LOGIN_NAME_CONSTRAINT)
                {
                    return StoreError::DuplicateKey(user.login_name.to_string());
                }
            }
            StoreError::Database(e.to_string())
        })?;

        Ok(user)
    }

    async fn find_by_login_name(&self, login_name: &LoginName) -> Result<Option<User>, StoreError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, login_name, password_hash, roles, email, created_at
            FROM users
            WHERE login_name = $1
            "#,
        )
        .bind(login_name.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StoreError::Database(e.to_string()))?;

        row.map(User::try_from).transpose()
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, StoreError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, login_name, password_hash, roles, email, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StoreError::Database(e.to_string()))?;

        row.map(User::try_from).transpose()
    }
}
