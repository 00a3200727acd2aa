use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

/// Default bearer token lifetime in seconds (60 minutes).
pub const DEFAULT_TOKEN_LIFETIME_SECONDS: i64 = 60 * 60;

/// Registered claims carried by every bearer token.
///
/// The subject is the email address of the authenticated user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (user email)
    pub sub: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// JWT ID; keeps two tokens minted for one subject in the same second distinct
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jti: Option<String>,
}

impl Claims {
    /// Create claims for a subject issued at the given instant.
    ///
    /// # Arguments
    /// * `subject` - Token subject (user email)
    /// * `issued_at` - Unix timestamp of issuance
    /// * `lifetime_seconds` - Seconds until the token expires
    ///
    /// # Returns
    /// Claims with `exp = issued_at + lifetime_seconds` and a random `jti`
    pub fn for_subject(subject: impl ToString, issued_at: i64, lifetime_seconds: i64) -> Self {
        Self {
            sub: subject.to_string(),
            iat: issued_at,
            exp: issued_at + lifetime_seconds,
            jti: Some(Uuid::new_v4().to_string()),
        }
    }

    /// Create claims for a subject issued now.
    pub fn issued_now(subject: impl ToString, lifetime_seconds: i64) -> Self {
        Self::for_subject(subject, Utc::now().timestamp(), lifetime_seconds)
    }

    /// Check if the token is expired at the given instant.
    ///
    /// A token is expired once `exp <= current_timestamp`.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp <= current_timestamp
    }
}
