use thiserror::Error;

/// Error for UserId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UserIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error for LoginName validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LoginNameError {
    #[error("Login name is required")]
    Empty,

    #[error("Login name too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Error for Password validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordInputError {
    #[error("Password too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("Invalid email format: {0}")]
    InvalidFormat(String),
}

/// Error for role label validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RoleError {
    #[error("Role '{role}' too long: maximum {max} characters, got {actual}")]
    TooLong {
        role: String,
        max: usize,
        actual: usize,
    },
}

/// Failure reported by a credential store adapter
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("Duplicate key for login name: {0}")]
    DuplicateKey(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Stored record is unreadable: {0}")]
    CorruptRecord(String),
}

/// Top-level error for all user directory operations
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UserError {
    // Value object validation errors (automatically converted via #[from])
    #[error("Invalid user ID: {0}")]
    InvalidUserId(#[from] UserIdError),

    #[error("Invalid login name: {0}")]
    InvalidLoginName(#[from] LoginNameError),

    #[error("Invalid password: {0}")]
    InvalidPassword(#[from] PasswordInputError),

    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    #[error("Invalid roles: {0}")]
    InvalidRoles(#[from] RoleError),

    #[error("Password error: {0}")]
    Password(#[from] auth::PasswordError),

    #[error("Token error: {0}")]
    Token(#[from] auth::TokenError),

    // Domain-level errors
    #[error("Login name already exists: {0}")]
    AlreadyExists(String),

    #[error("Invalid credentials")]
    AuthenticationFailed,

    #[error("User not found: {0}")]
    NotFound(String),

    // Infrastructure errors
    #[error("Store error: {0}")]
    Store(String),
}

impl From<StoreError> for UserError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateKey(login_name) => UserError::AlreadyExists(login_name),
            StoreError::Database(message) | StoreError::CorruptRecord(message) => {
                UserError::Store(message)
            }
        }
    }
}
