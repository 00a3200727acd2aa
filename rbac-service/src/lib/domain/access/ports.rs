use async_trait::async_trait;

use crate::domain::access::errors::AccessError;
use crate::domain::access::models::Principal;

/// Resolves presented bearer tokens to authenticated principals.
#[async_trait]
pub trait PrincipalResolverPort: Send + Sync + 'static {
    /// Resolve a raw token string (without the `Bearer ` prefix).
    ///
    /// # Errors
    /// * `UnknownToken` / `RevokedToken` - Registry does not hold the token as live
    /// * `MalformedToken` / `BadSignature` / `ExpiredToken` - Cryptographic checks failed
    /// * `UnknownSubject` - The `sub` claim names no user
    async fn resolve(&self, token: &str) -> Result<Principal, AccessError>;
}
