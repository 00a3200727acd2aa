use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;

use crate::domain::token::models::bearer_credentials;
use crate::domain::token::models::NewToken;
use crate::domain::token::models::Token;
use crate::domain::token::ports::TokenRepository;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::Roles;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::UserProjection;
use crate::user::errors::UserError;
use crate::user::ports::IdentityServicePort;
use crate::user::ports::UserRepository;

/// Domain service owning registration, login and logout.
///
/// Maintains the single-live-token invariant: every successful login revokes
/// the user's previously live tokens before recording the new one.
pub struct IdentityService<UR, TR>
where
    UR: UserRepository,
    TR: TokenRepository,
{
    users: Arc<UR>,
    tokens: Arc<TR>,
    authenticator: Arc<Authenticator>,
}

impl<UR, TR> IdentityService<UR, TR>
where
    UR: UserRepository,
    TR: TokenRepository,
{
    /// Create a new identity service with injected dependencies.
    ///
    /// # Arguments
    /// * `users` - User store implementation
    /// * `tokens` - Token registry implementation
    /// * `authenticator` - Password hashing and token minting
    pub fn new(users: Arc<UR>, tokens: Arc<TR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            users,
            tokens,
            authenticator,
        }
    }

    async fn issue_and_record(&self, user: &User) -> Result<String, UserError> {
        let token = self
            .authenticator
            .issue_token(user.email.as_str())
            .map_err(|e| UserError::Unknown(format!("Token generation failed: {}", e)))?;

        self.tokens
            .insert(NewToken::bearer(token.clone(), user.id))
            .await?;

        Ok(token)
    }

    async fn revoke_all_user_tokens(&self, user_id: &UserId) -> Result<(), UserError> {
        let mut live_tokens = self.tokens.find_live_by_user(user_id).await?;
        if live_tokens.is_empty() {
            return Ok(());
        }

        live_tokens.iter_mut().for_each(Token::revoke);
        self.tokens.update_all(&live_tokens).await?;

        tracing::debug!(
            user_id = %user_id,
            revoked = live_tokens.len(),
            "Revoked previously live tokens"
        );
        Ok(())
    }
}

#[async_trait]
impl<UR, TR> IdentityServicePort for IdentityService<UR, TR>
where
    UR: UserRepository,
    TR: TokenRepository,
{
    async fn register(&self, command: RegisterUserCommand) -> Result<UserProjection, UserError> {
        if self.users.exists_by_email(command.email.as_str()).await? {
            return Err(UserError::EmailAlreadyExists(command.email.to_string()));
        }

        let password_hash = self
            .authenticator
            .hash_password(command.password.expose())
            .map_err(|e| UserError::Unknown(format!("Password hashing failed: {}", e)))?;

        let user = self
            .users
            .insert(NewUser {
                username: command.username,
                email: command.email,
                password_hash,
                roles: Roles::or_default(command.roles),
            })
            .await?;

        self.issue_and_record(&user).await?;

        tracing::info!(user_id = %user.id, roles = ?user.roles.to_strings(), "User registered");
        Ok(UserProjection::from(&user))
    }

    async fn authenticate(&self, email: &str, password: &str) -> Result<String, UserError> {
        let user = self.users.find_by_email(email).await?;

        self.authenticator
            .verify_credentials(password, user.as_ref().map(|u| u.password_hash.as_str()))
            .map_err(|e| match e {
                AuthenticationError::InvalidCredentials => UserError::InvalidCredentials,
                other => UserError::Unknown(format!("Credential verification failed: {}", other)),
            })?;
        let user = user.ok_or(UserError::InvalidCredentials)?;

        // Revoke before recording so the new token is the only live one.
        let token = self
            .authenticator
            .issue_token(user.email.as_str())
            .map_err(|e| UserError::Unknown(format!("Token generation failed: {}", e)))?;
        self.revoke_all_user_tokens(&user.id).await?;
        self.tokens
            .insert(NewToken::bearer(token.clone(), user.id))
            .await?;

        tracing::info!(user_id = %user.id, "User authenticated");
        Ok(token)
    }

    async fn logout(&self, authorization: Option<&str>) {
        let Some(token) = authorization.and_then(bearer_credentials) else {
            tracing::debug!("Logout without bearer credentials ignored");
            return;
        };

        let mut record = match self.tokens.find_by_token(token).await {
            Ok(Some(record)) => record,
            Ok(None) => {
                tracing::debug!("Logout with unknown token ignored");
                return;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Token lookup failed during logout");
                return;
            }
        };

        if record.expired && record.revoked {
            return;
        }

        record.revoke();
        match self.tokens.update_all(std::slice::from_ref(&record)).await {
            Ok(()) => tracing::info!(user_id = %record.user_id, "User logged out"),
            Err(e) => tracing::warn!(error = %e, "Failed to revoke token during logout"),
        }
    }

    async fn get_user(&self, id: &UserId) -> Result<User, UserError> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))
    }

    async fn get_user_by_email(&self, email: &str) -> Result<User, UserError> {
        self.users
            .find_by_email(email)
            .await?
            .ok_or(UserError::NotFound(email.to_string()))
    }

    async fn list_users(&self) -> Result<Vec<User>, UserError> {
        self.users.list_all().await
    }
}
