use std::fmt;

use chrono::Duration;

/// Immutable signing configuration shared by [`TokenIssuer`] and [`TokenVerifier`].
///
/// Built once at startup and handed to constructors; nothing reads it from
/// ambient state afterwards.
///
/// [`TokenIssuer`]: super::TokenIssuer
/// [`TokenVerifier`]: super::TokenVerifier
#[derive(Clone)]
pub struct TokenSettings {
    secret: String,
    issuer: String,
    audience: String,
    lifetime: Duration,
}

impl TokenSettings {
    /// Lifetime used when none is configured.
    pub const DEFAULT_LIFETIME_MINUTES: i64 = 60;

    /// Create settings with the default one hour lifetime.
    ///
    /// # Arguments
    /// * `secret` - Symmetric HMAC key material (empty means unconfigured)
    /// * `issuer` - Value written to and required in the `iss` claim
    /// * `audience` - Value written to and required in the `aud` claim
    pub fn new(
        secret: impl Into<String>,
        issuer: impl Into<String>,
        audience: impl Into<String>,
    ) -> Self {
        Self {
            secret: secret.into(),
            issuer: issuer.into(),
            audience: audience.into(),
            lifetime: Duration::minutes(Self::DEFAULT_LIFETIME_MINUTES),
        }
    }

    /// Override the fixed token lifetime.
    pub fn with_lifetime(mut self, lifetime: Duration) -> Self {
        self.lifetime = lifetime;
        self
    }

    /// Whether a signing secret is present and the lifetime is positive.
    pub fn is_configured(&self) -> bool {
        !self.secret.is_empty() && self.lifetime > Duration::zero()
    }

    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    pub fn audience(&self) -> &str {
        &self.audience
    }

    pub fn lifetime(&self) -> Duration {
        self.lifetime
    }

    pub(crate) fn secret(&self) -> &[u8] {
        self.secret.as_bytes()
    }
}

impl fmt::Debug for TokenSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenSettings")
            .field("secret", &"<redacted>")
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .field("lifetime", &self.lifetime)
            .finish()
    }
}
