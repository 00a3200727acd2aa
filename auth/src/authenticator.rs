use std::sync::OnceLock;

use crate::jwt::Claims;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Plaintext hashed once to give absent-user logins a digest to verify against.
const DUMMY_PASSWORD: &str = "dummy-password-for-timing-equalisation";

/// Authentication coordinator combining password verification and JWT handling.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    jwt_handler: JwtHandler,
    dummy_hash: OnceLock<String>,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),
}

impl Authenticator {
    /// Create a new authenticator with the default 60 minute token lifetime.
    ///
    /// # Arguments
    /// * `jwt_secret` - Secret key for JWT signing
    pub fn new(jwt_secret: &[u8]) -> Self {
        Self::with_jwt_handler(JwtHandler::new(jwt_secret))
    }

    /// Create an authenticator around a preconfigured JWT handler.
    pub fn with_jwt_handler(jwt_handler: JwtHandler) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            jwt_handler,
            dummy_hash: OnceLock::new(),
        }
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify a password against the stored hash of a possibly absent user.
    ///
    /// When `stored_hash` is `None` the password is checked against a dummy
    /// digest, so both failure branches cost one Argon2 verification and
    /// report the same `InvalidCredentials` error.
    ///
    /// # Errors
    /// * `InvalidCredentials` - User is absent or password does not match
    /// * `PasswordError` - Stored hash is unreadable
    pub fn verify_credentials(
        &self,
        password: &str,
        stored_hash: Option<&str>,
    ) -> Result<(), AuthenticationError> {
        let is_valid = match stored_hash {
            Some(hash) => self.password_hasher.verify(password, hash)?,
            None => {
                let dummy = self.dummy_hash()?;
                self.password_hasher.verify(password, dummy)?;
                false
            }
        };

        if !is_valid {
            return Err(AuthenticationError::InvalidCredentials);
        }

        Ok(())
    }

    /// Mint a fresh bearer token for a subject.
    ///
    /// # Errors
    /// * `JwtError` - Token generation failed
    pub fn issue_token(&self, subject: &str) -> Result<String, JwtError> {
        self.jwt_handler.mint(subject)
    }

    /// Verify the signature and expiry of a bearer token.
    ///
    /// # Returns
    /// Decoded claims
    ///
    /// # Errors
    /// * `Malformed` / `BadSignature` - Token failed cryptographic checks
    /// * `TokenExpired` - `exp` is not in the future
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        let claims = self.jwt_handler.parse_and_verify(token)?;

        if self.jwt_handler.is_expired(claims.exp) {
            return Err(JwtError::TokenExpired);
        }

        Ok(claims)
    }

    /// Underlying JWT handler.
    pub fn jwt_handler(&self) -> &JwtHandler {
        &self.jwt_handler
    }

    fn dummy_hash(&self) -> Result<&str, PasswordError> {
        if let Some(hash) = self.dummy_hash.get() {
            return Ok(hash);
        }
        let hash = self.password_hasher.hash(DUMMY_PASSWORD)?;
        Ok(self.dummy_hash.get_or_init(|| hash))
    }
}
