use std::collections::BTreeMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::token::errors::TokenError;
use crate::domain::token::models::NewToken;
use crate::domain::token::models::Token;
use crate::domain::token::models::TokenId;
use crate::domain::token::ports::TokenRepository;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserRepository;
use crate::user::errors::UserError;

#[derive(Debug, Default)]
struct UserTable {
    last_id: i64,
    rows: BTreeMap<UserId, User>,
}

/// In-memory user store.
///
/// Intended for tests/dev. Enforces the same email uniqueness as the
/// `users_email_key` constraint.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    table: RwLock<UserTable>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn poisoned() -> UserError {
        UserError::DatabaseError("lock poisoned".to_string())
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, user: NewUser) -> Result<User, UserError> {
        let mut table = self.table.write().map_err(|_| Self::poisoned())?;

        if table.rows.values().any(|u| u.email == user.email) {
            return Err(UserError::EmailAlreadyExists(user.email.to_string()));
        }

        table.last_id += 1;
        let user = user.with_id(UserId(table.last_id));
        table.rows.insert(user.id, user.clone());

        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        let table = self.table.read().map_err(|_| Self::poisoned())?;
        Ok(table.rows.get(id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError> {
        let table = self.table.read().map_err(|_| Self::poisoned())?;
        Ok(table
            .rows
            .values()
            .find(|u| u.email.as_str() == email)
            .cloned())
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, UserError> {
        let table = self.table.read().map_err(|_| Self::poisoned())?;
        Ok(table.rows.values().any(|u| u.email.as_str() == email))
    }

    async fn list_all(&self) -> Result<Vec<User>, UserError> {
        let table = self.table.read().map_err(|_| Self::poisoned())?;
        Ok(table.rows.values().cloned().collect())
    }
}

#[derive(Debug, Default)]
struct TokenTable {
    last_id: i64,
    rows: BTreeMap<TokenId, Token>,
}

/// In-memory token registry.
///
/// Records are never removed. Token strings are unique, like the
/// `tokens_token_key` constraint.
#[derive(Debug, Default)]
pub struct InMemoryTokenRepository {
    table: RwLock<TokenTable>,
}

impl InMemoryTokenRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn poisoned() -> TokenError {
        TokenError::DatabaseError("lock poisoned".to_string())
    }
}

#[async_trait]
impl TokenRepository for InMemoryTokenRepository {
    async fn insert(&self, token: NewToken) -> Result<Token, TokenError> {
        let mut table = self.table.write().map_err(|_| Self::poisoned())?;

        if table.rows.values().any(|t| t.token == token.token) {
            return Err(TokenError::DuplicateToken);
        }

        table.last_id += 1;
        let token = token.with_id(TokenId(table.last_id));
        table.rows.insert(token.id, token.clone());

        Ok(token)
    }

    async fn find_by_token(&self, token: &str) -> Result<Option<Token>, TokenError> {
        let table = self.table.read().map_err(|_| Self::poisoned())?;
        Ok(table.rows.values().find(|t| t.token == token).cloned())
    }

    async fn find_live_by_user(&self, user_id: &UserId) -> Result<Vec<Token>, TokenError> {
        let table = self.table.read().map_err(|_| Self::poisoned())?;
        Ok(table
            .rows
            .values()
            .filter(|t| t.user_id == *user_id && t.is_live())
            .cloned()
            .collect())
    }

    async fn update_all(&self, tokens: &[Token]) -> Result<(), TokenError> {
        let mut table = self.table.write().map_err(|_| Self::poisoned())?;

        // Only the flags are mutable; unknown ids are ignored.
        for token in tokens {
            if let Some(stored) = table.rows.get_mut(&token.id) {
                stored.expired = token.expired;
                stored.revoked = token.revoked;
            }
        }

        Ok(())
    }
}
