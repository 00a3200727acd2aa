use thiserror::Error;

use crate::domain::token::errors::TokenError;
use crate::user::errors::UserError;

/// Reasons a bearer token fails to resolve to a principal.
///
/// The authentication middleware never surfaces these to the caller.
#[derive(Debug, Clone, Error)]
pub enum AccessError {
    #[error("Token is not registered")]
    UnknownToken,

    #[error("Token has been revoked")]
    RevokedToken,

    #[error("Token is malformed: {0}")]
    MalformedToken(String),

    #[error("Token signature does not match")]
    BadSignature,

    #[error("Token is expired")]
    ExpiredToken,

    #[error("Token subject does not match any user: {0}")]
    UnknownSubject(String),

    #[error("Token registry error: {0}")]
    TokenRegistry(#[from] TokenError),

    #[error("User store error: {0}")]
    UserStore(#[from] UserError),
}
