use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::user::errors::EmailError;
use crate::user::errors::LoginNameError;
use crate::user::errors::PasswordInputError;
use crate::user::errors::RoleError;
use crate::user::errors::UserError;
use crate::user::errors::UserIdError;

/// Identity record.
///
/// `password_hash` holds the stored secret and is cleared by [`User::redacted`]
/// before a record leaves the directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub login_name: LoginName,
    pub password_hash: String,
    pub roles: Roles,
    pub email: EmailAddress,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Drop the stored secret.
    pub fn redacted(mut self) -> Self {
        self.password_hash.clear();
        self
    }
}

/// Identity record before the store has assigned an identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub login_name: LoginName,
    pub password_hash: String,
    pub roles: Roles,
    pub email: EmailAddress,
    /// Stamped by the store on insert when `None`
    pub created_at: Option<DateTime<Utc>>,
}

impl NewUser {
    /// Attach a store-assigned identifier, stamping the creation time if unset.
    pub fn into_user(self, id: UserId) -> User {
        User {
            id,
            login_name: self.login_name,
            password_hash: self.password_hash,
            roles: self.roles,
            email: self.email,
            created_at: self.created_at.unwrap_or_else(Utc::now),
        }
    }
}

/// User unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(pub Uuid);

impl UserId {
    /// Generate a new random user ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a user ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, UserIdError> {
        Uuid::parse_str(s)
            .map(UserId)
            .map_err(|e| UserIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Login name value type
///
/// Required, at most 50 characters, compared case-sensitively.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LoginName(String);

impl LoginName {
    pub const MAX_LENGTH: usize = 50;

    /// Create a new valid login name.
    ///
    /// # Errors
    /// * `Empty` - Blank or whitespace-only input
    /// * `TooLong` - Longer than 50 characters
    pub fn new(login_name: String) -> Result<Self, LoginNameError> {
        if login_name.trim().is_empty() {
            return Err(LoginNameError::Empty);
        }

        let length = login_name.chars().count();
        if length > Self::MAX_LENGTH {
            return Err(LoginNameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            });
        }

        Ok(Self(login_name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LoginName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Plaintext password as supplied at registration
///
/// At most 255 characters; empty is accepted. `Debug` never shows the value.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    pub const MAX_LENGTH: usize = 255;

    /// # Errors
    /// * `TooLong` - Longer than 255 characters
    pub fn new(password: String) -> Result<Self, PasswordInputError> {
        let length = password.chars().count();
        if length > Self::MAX_LENGTH {
            return Err(PasswordInputError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            });
        }

        Ok(Self(password))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(<redacted>)")
    }
}

/// Email address type
///
/// Validates email format using RFC 5322 compliant parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated email address.
    ///
    /// # Errors
    /// * `InvalidFormat` - Email does not conform to RFC 5322
    pub fn new(email: String) -> Result<Self, EmailError> {
        email_address::EmailAddress::from_str(&email)
            .map(|_| EmailAddress(email))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Set of role labels held by a record.
///
/// Parsed from the comma-delimited form used on the way in, kept in first-seen
/// order without duplicates, and stored back as `"A,B"`. May be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roles(Vec<String>);

impl Roles {
    pub const MAX_LABEL_LENGTH: usize = 20;

    /// Parse a delimited role string such as `"Admin, Moderator"`.
    ///
    /// # Errors
    /// * `TooLong` - A label exceeds 20 characters
    pub fn parse(raw: &str) -> Result<Self, RoleError> {
        let mut labels: Vec<String> = Vec::new();

        for label in auth::jwt::split_roles(raw) {
            let length = label.chars().count();
            if length > Self::MAX_LABEL_LENGTH {
                return Err(RoleError::TooLong {
                    role: label,
                    max: Self::MAX_LABEL_LENGTH,
                    actual: length,
                });
            }
            if !labels.contains(&label) {
                labels.push(label);
            }
        }

        Ok(Self(labels))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, role: &str) -> bool {
        self.0.iter().any(|r| r == role)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Canonical stored form, e.g. `"Admin,Moderator"`.
    pub fn to_delimited(&self) -> String {
        self.0.join(",")
    }
}

impl fmt::Display for Roles {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_delimited())
    }
}

/// Command to register a new user with domain types
#[derive(Debug)]
pub struct RegisterUserCommand {
    pub login_name: LoginName,
    pub password: Password,
    pub roles: Roles,
    pub email: EmailAddress,
}

impl RegisterUserCommand {
    /// Construct a new register command.
    ///
    /// # Arguments
    /// * `login_name` - Validated login name
    /// * `password` - Validated plaintext password (hashed and dropped by the directory)
    /// * `roles` - Parsed role set
    /// * `email` - Validated email address
    pub fn new(login_name: LoginName, password: Password, roles: Roles, email: EmailAddress) -> Self {
        Self {
            login_name,
            password,
            roles,
            email,
        }
    }

    /// Validate raw boundary inputs into a command.
    ///
    /// # Errors
    /// * `InvalidLoginName` / `InvalidPassword` / `InvalidRoles` / `InvalidEmail` -
    ///   Field fails validation
    pub fn parse(
        login_name: &str,
        password: &str,
        roles: &str,
        email: &str,
    ) -> Result<Self, UserError> {
        Ok(Self::new(
            LoginName::new(login_name.to_string())?,
            Password::new(password.to_string())?,
            Roles::parse(roles)?,
            EmailAddress::new(email.to_string())?,
        ))
    }
}
