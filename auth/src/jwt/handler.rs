use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::claims::DEFAULT_TOKEN_LIFETIME_SECONDS;
use super::errors::JwtError;

/// JWT token handler for minting and parsing bearer tokens.
///
/// Purely cryptographic: it never consults any token registry.
/// Uses HS256 (HMAC with SHA-256) with a process-wide secret.
pub struct JwtHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    lifetime_seconds: i64,
}

impl JwtHandler {
    /// Create a new JWT handler with a secret key.
    ///
    /// # Arguments
    /// * `secret` - Secret key for signing tokens (should be stored securely)
    ///
    /// # Returns
    /// JwtHandler instance configured with HS256 and a 60 minute token lifetime
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Store secrets in environment variables or secure vaults, never in code
    pub fn new(secret: &[u8]) -> Self {
        Self::with_lifetime(secret, DEFAULT_TOKEN_LIFETIME_SECONDS)
    }

    /// Create a JWT handler with a custom token lifetime.
    pub fn with_lifetime(secret: &[u8], lifetime_seconds: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
            lifetime_seconds,
        }
    }

    /// Mint a signed token for a subject, issued now.
    ///
    /// # Arguments
    /// * `subject` - Token subject (user email)
    ///
    /// # Returns
    /// Compact three-segment JWT string
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn mint(&self, subject: &str) -> Result<String, JwtError> {
        self.mint_at(subject, Utc::now().timestamp())
    }

    /// Mint a signed token for a subject issued at an explicit instant.
    pub fn mint_at(&self, subject: &str, issued_at: i64) -> Result<String, JwtError> {
        let claims = Claims::for_subject(subject, issued_at, self.lifetime_seconds);
        self.encode(&claims)
    }

    /// Encode claims into a JWT token.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn encode(&self, claims: &Claims) -> Result<String, JwtError> {
        let header = Header::new(self.algorithm);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }

    /// Decode a token and verify its signature.
    ///
    /// Expiry is not checked here; see [`JwtHandler::is_expired`].
    ///
    /// # Arguments
    /// * `token` - JWT token string to decode
    ///
    /// # Returns
    /// Decoded claims
    ///
    /// # Errors
    /// * `BadSignature` - Signature does not match the recomputed HMAC
    /// * `Malformed` - Token structure, encoding, header or claims are invalid
    pub fn parse_and_verify(&self, token: &str) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(self.algorithm);
        validation.validate_exp = false;
        validation.set_required_spec_claims(&["sub", "exp"]);

        let token_data =
            decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
                match e.kind() {
                    ErrorKind::InvalidSignature => JwtError::BadSignature,
                    _ => JwtError::Malformed(e.to_string()),
                }
            })?;

        Ok(token_data.claims)
    }

    /// Check whether an expiration timestamp has passed (`exp <= now`).
    pub fn is_expired(&self, exp: i64) -> bool {
        exp <= Utc::now().timestamp()
    }
}
