use async_trait::async_trait;

use crate::domain::user::models::NewUser;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::UserProjection;
use crate::user::errors::UserError;

/// Port for identity domain service operations.
#[async_trait]
pub trait IdentityServicePort: Send + Sync + 'static {
    /// Register a new user and issue its first token.
    ///
    /// # Arguments
    /// * `command` - Validated command containing username, email, password and roles
    ///
    /// # Returns
    /// Projection of the created user
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn register(&self, command: RegisterUserCommand) -> Result<UserProjection, UserError>;

    /// Exchange credentials for a fresh bearer token.
    ///
    /// Every previously live token of the user is revoked.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email or wrong password
    /// * `DatabaseError` - Database operation failed
    async fn authenticate(&self, email: &str, password: &str) -> Result<String, UserError>;

    /// Revoke the token carried by an `Authorization` header value.
    ///
    /// Missing header, wrong scheme and unknown tokens are silent no-ops.
    async fn logout(&self, authorization: Option<&str>);

    /// Retrieve user by identifier.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    async fn get_user(&self, id: &UserId) -> Result<User, UserError>;

    /// Retrieve user by email address.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    async fn get_user_by_email(&self, email: &str) -> Result<User, UserError>;

    /// Retrieve all registered users.
    async fn list_users(&self) -> Result<Vec<User>, UserError>;
}

/// Persistence operations for user aggregate.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist new user to storage.
    ///
    /// # Returns
    /// Created user entity with its assigned id
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn insert(&self, user: NewUser) -> Result<User, UserError>;

    /// Retrieve user by identifier.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;

    /// Retrieve user by email address (exact, case-sensitive match).
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError>;

    /// Check whether an email address is already registered.
    async fn exists_by_email(&self, email: &str) -> Result<bool, UserError>;

    /// Retrieve all users from storage, ordered by id.
    async fn list_all(&self) -> Result<Vec<User>, UserError>;
}
