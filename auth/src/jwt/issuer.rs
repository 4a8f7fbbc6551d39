use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use super::claims::split_roles;
use super::claims::Claims;
use super::errors::TokenError;
use super::handler::JwtHandler;
use super::settings::TokenSettings;

/// Identity facts a token is minted for.
///
/// Borrowed view so callers can adapt their own record type without cloning.
#[derive(Debug, Clone, Copy)]
pub struct TokenSubject<'a> {
    /// Store-assigned identifier, if the record has one
    pub id: Option<&'a str>,
    pub login_name: &'a str,
    pub email: Option<&'a str>,
    /// Delimited role string, e.g. `"Admin, Moderator"`
    pub roles: &'a str,
}

/// A freshly signed token and the metadata callers report back to clients.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub token: String,
    pub token_id: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl IssuedToken {
    /// Lifetime in whole seconds.
    pub fn expires_in(&self) -> i64 {
        (self.expires_at - self.issued_at).num_seconds()
    }
}

/// Builds signed, time-bounded tokens carrying identity and role claims.
pub struct TokenIssuer {
    settings: TokenSettings,
    handler: JwtHandler,
}

impl TokenIssuer {
    pub fn new(settings: TokenSettings) -> Self {
        let handler = JwtHandler::new(&settings);
        Self { settings, handler }
    }

    pub fn settings(&self) -> &TokenSettings {
        &self.settings
    }

    /// Issue a token valid from now for the configured lifetime.
    ///
    /// # Errors
    /// * `Misconfigured` - No signing secret, or a lifetime that is not positive
    ///   or overflows the expiry; checked before any claim is built
    /// * `Signing` - The claim set could not be signed
    pub fn issue(&self, subject: &TokenSubject<'_>) -> Result<IssuedToken, TokenError> {
        self.issue_at(subject, Utc::now())
    }

    /// Issue a token as if the current instant were `issued_at`.
    pub fn issue_at(
        &self,
        subject: &TokenSubject<'_>,
        issued_at: DateTime<Utc>,
    ) -> Result<IssuedToken, TokenError> {
        if !self.settings.is_configured() {
            return Err(TokenError::Misconfigured);
        }

        let expires_at = issued_at
            .checked_add_signed(self.settings.lifetime())
            .ok_or(TokenError::Misconfigured)?;
        let token_id = Uuid::new_v4().to_string();

        let claims = Claims {
            sub: subject
                .id
                .filter(|id| !id.is_empty())
                .unwrap_or(subject.login_name)
                .to_string(),
            name: subject.login_name.to_string(),
            email: subject.email.unwrap_or_default().to_string(),
            roles: split_roles(subject.roles),
            jti: token_id.clone(),
            iat: issued_at.timestamp(),
            nbf: issued_at.timestamp(),
            exp: expires_at.timestamp(),
            iss: self.settings.issuer().to_string(),
            aud: self.settings.audience().to_string(),
        };

        let token = self
            .handler
            .encode(&claims)
            .map_err(|e| TokenError::Signing(e.to_string()))?;

        tracing::debug!(
            subject = %claims.sub,
            token_id = %token_id,
            roles = claims.roles.len(),
            expires_at = %expires_at,
            "Token issued"
        );

        Ok(IssuedToken {
            token,
            token_id,
            issued_at,
            expires_at,
        })
    }
}
