use std::sync::OnceLock;

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::PasswordHash;
use argon2::password_hash::PasswordHasher as Argon2PasswordHasher;
use argon2::password_hash::PasswordVerifier;
use argon2::password_hash::SaltString;
use argon2::Argon2;

use super::errors::PasswordError;

/// One-way, verifiable transform of a plaintext secret.
///
/// Produces Argon2id digests in PHC string format with a fresh random salt per
/// call, so two hashes of the same plaintext never compare equal. Verification
/// re-derives the digest from the salt embedded in the stored string.
pub struct PasswordHasher {
    argon2: Argon2<'static>,
    decoy: OnceLock<Option<String>>,
}

impl PasswordHasher {
    /// Create a new password hasher with the Argon2id defaults.
    pub fn new() -> Self {
        Self {
            argon2: Argon2::default(),
            decoy: OnceLock::new(),
        }
    }

    /// Hash a plaintext password for storage.
    ///
    /// Empty plaintexts are accepted; callers enforce their own policy.
    ///
    /// # Arguments
    /// * `plaintext` - Password as supplied by the user
    ///
    /// # Returns
    /// PHC string (algorithm, parameters, salt and digest)
    ///
    /// # Errors
    /// * `HashingFailed` - Salt generation or hashing failed
    pub fn hash(&self, plaintext: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);

        self.argon2
            .hash_password(plaintext.as_bytes(), &salt)
            .map(|digest| digest.to_string())
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Verify a plaintext against a stored digest.
    ///
    /// # Arguments
    /// * `plaintext` - Candidate password
    /// * `digest` - Stored PHC string
    ///
    /// # Returns
    /// True on match, false otherwise
    ///
    /// # Errors
    /// * `VerificationFailed` - Stored digest is not a parseable PHC string
    pub fn verify(&self, plaintext: &str, digest: &str) -> Result<bool, PasswordError> {
        let parsed = PasswordHash::new(digest).map_err(|e| {
            PasswordError::VerificationFailed(format!("Invalid password hash: {}", e))
        })?;

        Ok(self
            .argon2
            .verify_password(plaintext.as_bytes(), &parsed)
            .is_ok())
    }

    /// Spend the same work as a real verification and discard the outcome.
    ///
    /// Used on lookup misses so that an unknown login name costs as much as a
    /// wrong password.
    pub fn verify_decoy(&self, plaintext: &str) {
        let decoy = self
            .decoy
            .get_or_init(|| self.hash("decoy-credential-never-matches").ok());

        if let Some(digest) = decoy {
            let _ = self.verify(plaintext, digest);
        }
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}
