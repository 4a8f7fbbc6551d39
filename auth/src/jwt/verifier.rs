use chrono::Utc;

use super::claims::Claims;
use super::errors::JwtError;
use super::errors::TokenError;
use super::handler::JwtHandler;
use super::settings::TokenSettings;

/// Stateless validation of bearer tokens.
///
/// No token registry is consulted: validity is the signature plus the embedded
/// issuer, audience and `[iat, exp]` window. Role-based authorization is left
/// to the caller, driven by the returned claims.
pub struct TokenVerifier {
    settings: TokenSettings,
    handler: JwtHandler,
}

impl TokenVerifier {
    pub fn new(settings: TokenSettings) -> Self {
        let handler = JwtHandler::new(&settings);
        Self { settings, handler }
    }

    /// Validate a token and recover its claims.
    ///
    /// # Errors
    /// * `Misconfigured` - No signing secret to check against
    /// * `Invalid` - Malformed, wrong signature, wrong issuer or audience,
    ///   expired or not yet valid
    pub fn validate(&self, token: &str) -> Result<Claims, TokenError> {
        if !self.settings.is_configured() {
            return Err(TokenError::Misconfigured);
        }

        self.inspect(token).map_err(|reason| {
            tracing::debug!(reason = %reason, "Token rejected");
            TokenError::Invalid
        })
    }

    /// Validate a token, keeping the precise rejection reason.
    ///
    /// Intended for diagnostics; callers facing clients should use
    /// [`validate`](Self::validate).
    pub fn inspect(&self, token: &str) -> Result<Claims, JwtError> {
        if token.trim().is_empty() {
            return Err(JwtError::Malformed("empty token".to_string()));
        }

        let claims: Claims = self.handler.decode(token)?;

        if claims.iat > Utc::now().timestamp() {
            return Err(JwtError::NotYetValid);
        }

        Ok(claims)
    }
}
