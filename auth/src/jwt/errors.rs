use thiserror::Error;

/// Caller-facing outcome of a failed token operation.
///
/// Validation failures all collapse into `Invalid`; the precise reason is
/// only available as a [`JwtError`] in diagnostics.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token signing is not configured")]
    Misconfigured,

    #[error("Token is invalid")]
    Invalid,

    #[error("Failed to sign token: {0}")]
    Signing(String),
}

/// Diagnostic reason behind a JWT encode or decode failure.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum JwtError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Token is malformed: {0}")]
    Malformed(String),

    #[error("Token signature does not match")]
    SignatureMismatch,

    #[error("Token issuer does not match")]
    IssuerMismatch,

    #[error("Token audience does not match")]
    AudienceMismatch,

    #[error("Token is expired")]
    TokenExpired,

    #[error("Token is not yet valid")]
    NotYetValid,

    #[error("Missing required claim: {0}")]
    MissingClaim(String),
}
