//! User infrastructure module
//!
//! Repository implementations (in-memory and PostgreSQL) and the
//! registration service that ties users to the password encoder registry.

mod postgres_repository;
mod repository;
mod service;

pub use postgres_repository::PostgresUserRepository;
pub use repository::InMemoryUserRepository;
pub use service::UserService;
