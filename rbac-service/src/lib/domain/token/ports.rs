use async_trait::async_trait;

use crate::domain::token::errors::TokenError;
use crate::domain::token::models::NewToken;
use crate::domain::token::models::Token;
use crate::domain::user::models::UserId;

/// Persistence operations for the token revocation ledger.
#[async_trait]
pub trait TokenRepository: Send + Sync + 'static {
    /// Persist a freshly minted, live token record.
    ///
    /// # Returns
    /// Stored record with its assigned id
    ///
    /// # Errors
    /// * `DuplicateToken` - Token string is already registered
    /// * `DatabaseError` - Database operation failed
    async fn insert(&self, token: NewToken) -> Result<Token, TokenError>;

    /// Retrieve a record by its exact token string.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_token(&self, token: &str) -> Result<Option<Token>, TokenError>;

    /// Retrieve every record of a user that is neither expired nor revoked.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_live_by_user(&self, user_id: &UserId) -> Result<Vec<Token>, TokenError>;

    /// Save the flags of every given record, atomically.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn update_all(&self, tokens: &[Token]) -> Result<(), TokenError>;
}
