//! Storage infrastructure - backend selection, pooling and migrations

mod factory;
pub mod migrations;
mod postgres;

pub use factory::StorageType;
pub use migrations::{run_user_migrations, user_migrations, Migration, PostgresMigrator};
pub use postgres::{connect, PostgresConfig};
