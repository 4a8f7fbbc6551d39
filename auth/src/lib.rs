//! Credential primitives
//!
//! Stateless building blocks for issuing and checking credentials:
//! - Password hashing (Argon2id, per-digest random salt)
//! - Signed, time-bounded bearer tokens (HS256 JWT) with identity and role claims
//! - Token validation against a fixed signing key, issuer and audience
//!
//! Nothing here performs I/O or holds mutable state; every type is built from
//! immutable settings and is safe to share across tasks.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let digest = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &digest).unwrap());
//! assert!(!hasher.verify("not_my_password", &digest).unwrap());
//! ```
//!
//! ## Issue and Validate
//! ```
//! use auth::{TokenIssuer, TokenSettings, TokenSubject, TokenVerifier};
//!
//! let settings = TokenSettings::new("secret_key_at_least_32_bytes_long!", "games-api", "games-clients");
//! let issuer = TokenIssuer::new(settings.clone());
//! let verifier = TokenVerifier::new(settings);
//!
//! let issued = issuer
//!     .issue(&TokenSubject {
//!         id: Some("65f0c0ffee"),
//!         login_name: "alice",
//!         email: Some("a@x.com"),
//!         roles: "Admin, Moderator",
//!     })
//!     .unwrap();
//!
//! let claims = verifier.validate(&issued.token).unwrap();
//! assert_eq!(claims.sub, "65f0c0ffee");
//! assert!(claims.has_any_role("Admin,Readonly"));
//! ```

pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use jwt::Claims;
pub use jwt::IssuedToken;
pub use jwt::JwtError;
pub use jwt::TokenError;
pub use jwt::TokenIssuer;
pub use jwt::TokenSettings;
pub use jwt::TokenSubject;
pub use jwt::TokenVerifier;
pub use password::PasswordError;
pub use password::PasswordHasher;
