pub mod claims;
pub mod errors;
pub mod handler;

pub use claims::Claims;
pub use claims::DEFAULT_TOKEN_LIFETIME_SECONDS;
pub use errors::JwtError;
pub use handler::JwtHandler;
