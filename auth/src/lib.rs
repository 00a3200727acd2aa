//! Authentication utilities library
//!
//! Provides the cryptographic building blocks of the RBAC service:
//! - Password hashing (Argon2id)
//! - Bearer token minting and verification (HS256 JWT)
//! - Authentication coordination
//!
//! Nothing here touches persistence; token revocation lives in the service.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! let is_valid = hasher.verify("my_password", &hash).unwrap();
//! assert!(is_valid);
//! ```
//!
//! ## JWT Tokens
//! ```
//! use auth::JwtHandler;
//!
//! let handler = JwtHandler::new(b"secret_key_at_least_32_bytes_long!");
//! let token = handler.mint("alice@example.com").unwrap();
//! let claims = handler.parse_and_verify(&token).unwrap();
//! assert_eq!(claims.sub, "alice@example.com");
//! assert!(!handler.is_expired(claims.exp));
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::Authenticator;
//!
//! let auth = Authenticator::new(b"secret_key_at_least_32_bytes_long!");
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and mint token
//! auth.verify_credentials("password123", Some(&hash)).unwrap();
//! let token = auth.issue_token("alice@example.com").unwrap();
//!
//! // Validate token
//! let claims = auth.validate_token(&token).unwrap();
//! assert_eq!(claims.sub, "alice@example.com");
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::Authenticator;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use jwt::DEFAULT_TOKEN_LIFETIME_SECONDS;
pub use password::PasswordError;
pub use password::PasswordHasher;
