use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;
use serde::Deserialize;
use serde::Serialize;

use super::errors::JwtError;
use super::settings::TokenSettings;

/// JWT codec bound to one set of [`TokenSettings`].
///
/// Signs with HS256 and decodes with a pinned validation policy: signature,
/// `iss`, `aud`, `exp` and `nbf` are all checked with zero leeway, and the
/// registered claims `sub`, `iss`, `aud`, `exp`, `nbf` must be present.
pub struct JwtHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    validation: Validation,
}

impl JwtHandler {
    /// Build a handler from signing settings.
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - An empty secret still produces a handler; callers check
    ///   [`TokenSettings::is_configured`] before use
    pub fn new(settings: &TokenSettings) -> Self {
        let algorithm = Algorithm::HS256;

        let mut validation = Validation::new(algorithm);
        validation.leeway = 0;
        validation.validate_exp = true;
        validation.validate_nbf = true;
        validation.set_issuer(&[settings.issuer()]);
        validation.set_audience(&[settings.audience()]);
        validation.set_required_spec_claims(&["sub", "iss", "aud", "exp", "nbf"]);

        Self {
            encoding_key: EncodingKey::from_secret(settings.secret()),
            decoding_key: DecodingKey::from_secret(settings.secret()),
            algorithm,
            validation,
        }
    }

    /// Encode claims into a signed token.
    ///
    /// # Errors
    /// * `EncodingFailed` - Claims could not be serialized or signed
    pub fn encode<T: Serialize>(&self, claims: &T) -> Result<String, JwtError> {
        let header = Header::new(self.algorithm);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }

    /// Decode a token, enforcing the full validation policy.
    ///
    /// # Errors
    /// * `SignatureMismatch` - Signed with another key
    /// * `IssuerMismatch` / `AudienceMismatch` - Claim differs from settings
    /// * `TokenExpired` / `NotYetValid` - Outside the `[nbf, exp]` window
    /// * `MissingClaim` - A required registered claim is absent
    /// * `Malformed` - Anything else (bad encoding, wrong algorithm, bad JSON)
    pub fn decode<T: for<'de> Deserialize<'de>>(&self, token: &str) -> Result<T, JwtError> {
        decode::<T>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature => JwtError::SignatureMismatch,
                ErrorKind::InvalidIssuer => JwtError::IssuerMismatch,
                ErrorKind::InvalidAudience => JwtError::AudienceMismatch,
                ErrorKind::ExpiredSignature => JwtError::TokenExpired,
                ErrorKind::ImmatureSignature => JwtError::NotYetValid,
                ErrorKind::MissingRequiredClaim(claim) => JwtError::MissingClaim(claim.clone()),
                _ => JwtError::Malformed(e.to_string()),
            })
    }
}
