use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;
use auth::JwtError;

use crate::domain::access::errors::AccessError;
use crate::domain::access::models::Principal;
use crate::domain::access::ports::PrincipalResolverPort;
use crate::domain::token::ports::TokenRepository;
use crate::domain::user::ports::UserRepository;

/// Request-time token validation.
///
/// A token is accepted only when the registry holds it as live AND its
/// signature and expiry check out. Stateless; safe to share across requests.
pub struct PrincipalResolver<UR, TR>
where
    UR: UserRepository,
    TR: TokenRepository,
{
    users: Arc<UR>,
    tokens: Arc<TR>,
    authenticator: Arc<Authenticator>,
}

impl<UR, TR> PrincipalResolver<UR, TR>
where
    UR: UserRepository,
    TR: TokenRepository,
{
    pub fn new(users: Arc<UR>, tokens: Arc<TR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            users,
            tokens,
            authenticator,
        }
    }
}

#[async_trait]
impl<UR, TR> PrincipalResolverPort for PrincipalResolver<UR, TR>
where
    UR: UserRepository,
    TR: TokenRepository,
{
    async fn resolve(&self, token: &str) -> Result<Principal, AccessError> {
        let record = self
            .tokens
            .find_by_token(token)
            .await?
            .ok_or(AccessError::UnknownToken)?;
        if !record.is_live() {
            return Err(AccessError::RevokedToken);
        }

        let claims = self
            .authenticator
            .validate_token(token)
            .map_err(|e| match e {
                JwtError::BadSignature => AccessError::BadSignature,
                JwtError::TokenExpired => AccessError::ExpiredToken,
                JwtError::Malformed(msg) | JwtError::EncodingFailed(msg) => {
                    AccessError::MalformedToken(msg)
                }
            })?;

        let user = self
            .users
            .find_by_email(&claims.sub)
            .await?
            .ok_or_else(|| AccessError::UnknownSubject(claims.sub.clone()))?;

        Ok(Principal::from(user))
    }
}
