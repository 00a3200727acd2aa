pub mod memory;
pub mod token;
pub mod user;

pub use memory::InMemoryTokenRepository;
pub use memory::InMemoryUserRepository;
pub use token::PostgresTokenRepository;
pub use user::PostgresUserRepository;
