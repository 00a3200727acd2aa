use thiserror::Error;

/// Error for token registry operations
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token already registered")]
    DuplicateToken,

    #[error("Unknown token type: {0}")]
    UnknownTokenType(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}
