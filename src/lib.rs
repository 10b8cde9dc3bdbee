//! Back-office user registry
//!
//! Registers administrative users with a unique username and a password
//! encoded by one of five schemes, chosen at random per registration:
//! - Stored passwords carry their scheme as a `{algorithm}hash` tag
//! - Encoders live in an immutable, once-built registry
//! - Persistence goes through a repository (in-memory or PostgreSQL)

pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use crate::config::AppConfig;

use std::sync::Arc;

use tracing::{info, warn};

use domain::password::AlgorithmSelector;
use domain::user::UserRepository;
use infrastructure::password::{EncoderRegistry, SeededSelector, ThreadRngSelector};
use infrastructure::storage::{self, PostgresConfig, StorageType};
use infrastructure::user::{InMemoryUserRepository, PostgresUserRepository, UserService};

/// Registration service over a runtime-selected repository
pub type DynUserService = UserService<dyn UserRepository>;

/// Build the user service described by the configuration
pub async fn create_user_service(config: &AppConfig) -> anyhow::Result<DynUserService> {
    let repository = create_repository(config).await?;
    let selector = create_selector(config);

    Ok(UserService::new(repository, EncoderRegistry::shared(), selector))
}

/// Open the PostgreSQL pool described by the configuration
pub async fn connect_postgres(config: &AppConfig) -> anyhow::Result<sqlx::PgPool> {
    let url = config.storage.resolve_database_url().ok_or_else(|| {
        anyhow::anyhow!("storage.database_url or DATABASE_URL is required for postgres")
    })?;

    let pg_config = PostgresConfig::new(url).with_max_connections(config.storage.max_connections);

    Ok(storage::connect(&pg_config).await?)
}

async fn create_repository(config: &AppConfig) -> anyhow::Result<Arc<dyn UserRepository>> {
    let backend: StorageType = config.storage.backend.parse()?;

    info!("Storage backend: {:?}", backend);

    let repository: Arc<dyn UserRepository> = match backend {
        StorageType::Postgres => {
            let pool = connect_postgres(config).await?;
            Arc::new(PostgresUserRepository::new(pool))
        }
        StorageType::InMemory => {
            warn!("Using in-memory user storage; registrations are lost on exit");
            Arc::new(InMemoryUserRepository::new())
        }
    };

    Ok(repository)
}

fn create_selector(config: &AppConfig) -> Arc<dyn AlgorithmSelector> {
    match config.password.selection_seed {
        Some(seed) => {
            info!(seed, "Using seeded password algorithm selection");
            Arc::new(SeededSelector::new(seed))
        }
        None => Arc::new(ThreadRngSelector::new()),
    }
}
