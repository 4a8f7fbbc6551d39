use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Delimiter between role labels in a stored role string.
pub const ROLE_DELIMITER: char = ',';

/// Claim set carried by every issued token.
///
/// Standard RFC 7519 claims plus the identity (`name`, `email`) and one entry
/// in `roles` per role label. `roles` is omitted from the wire form when empty.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject: record identifier, or login name when no identifier exists
    pub sub: String,

    /// Login name
    pub name: String,

    /// Contact address, empty string when unknown
    #[serde(default)]
    pub email: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub roles: Vec<String>,

    /// JWT ID (unique token identifier)
    pub jti: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Not before (Unix timestamp), equal to `iat`
    pub nbf: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    pub iss: String,

    pub aud: String,
}

impl Claims {
    /// Whether the claim set carries the given role (exact, case-sensitive).
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }

    /// Whether the claim set carries at least one of the given roles.
    ///
    /// Accepts the same comma-delimited form used for stored roles, e.g.
    /// `"Admin,Readonly,Moderator"`.
    pub fn has_any_role(&self, allowed: &str) -> bool {
        split_roles(allowed).iter().any(|role| self.has_role(role))
    }

    /// Check if token is expired.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp < current_timestamp
    }

    pub fn issued_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.iat, 0)
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }
}

/// Split a delimited role string into trimmed, non-empty labels.
///
/// Order is preserved. `"Admin, Moderator"` yields `["Admin", "Moderator"]`;
/// blank input yields no labels.
pub fn split_roles(raw: &str) -> Vec<String> {
    raw.split(ROLE_DELIMITER)
        .map(str::trim)
        .filter(|role| !role.is_empty())
        .map(str::to_string)
        .collect()
}
