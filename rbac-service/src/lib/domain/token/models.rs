use std::fmt;
use std::str::FromStr;

use crate::domain::token::errors::TokenError;
use crate::domain::user::models::UserId;

/// Authorization scheme prefix, case-sensitive with exactly one space.
pub const BEARER_PREFIX: &str = "Bearer ";

/// Extract the token string from an `Authorization` header value.
///
/// Returns `None` unless the value starts with `Bearer `.
pub fn bearer_credentials(header_value: &str) -> Option<&str> {
    header_value.strip_prefix(BEARER_PREFIX)
}

/// Store-assigned token record identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TokenId(pub i64);

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Kind of issued token. Only bearer tokens exist today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TokenType {
    #[default]
    Bearer,
}

impl TokenType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenType::Bearer => "BEARER",
        }
    }
}

impl FromStr for TokenType {
    type Err = TokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "BEARER" => Ok(TokenType::Bearer),
            other => Err(TokenError::UnknownTokenType(other.to_string())),
        }
    }
}

/// Revocation ledger entry for an issued token.
///
/// Records are never deleted; logout and re-login flip both flags to true.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub id: TokenId,
    pub token: String,
    pub token_type: TokenType,
    pub expired: bool,
    pub revoked: bool,
    pub user_id: UserId,
}

impl Token {
    /// Neither expired nor revoked.
    pub fn is_live(&self) -> bool {
        !self.expired && !self.revoked
    }

    /// Mark the record expired and revoked.
    pub fn revoke(&mut self) {
        self.expired = true;
        self.revoked = true;
    }
}

/// Freshly minted token awaiting insertion; always live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewToken {
    pub token: String,
    pub token_type: TokenType,
    pub user_id: UserId,
}

impl NewToken {
    pub fn bearer(token: String, user_id: UserId) -> Self {
        Self {
            token,
            token_type: TokenType::Bearer,
            user_id,
        }
    }

    /// Attach the store-assigned identifier.
    pub fn with_id(self, id: TokenId) -> Token {
        Token {
            id,
            token: self.token,
            token_type: self.token_type,
            expired: false,
            revoked: false,
            user_id: self.user_id,
        }
    }
}
