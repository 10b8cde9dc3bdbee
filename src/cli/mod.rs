//! CLI module for the back-office user registry
//!
//! Subcommands:
//! - `register`: register a user with a randomly encoded password
//! - `show`: print a user and the algorithm their password is tagged with
//! - `list`: print all users
//! - `migrate`: apply PostgreSQL schema migrations
//!
//! The in-memory backend lives only as long as one process, so `show`,
//! `list` and `migrate` need `storage.backend = postgres`.

pub mod list;
pub mod migrate;
pub mod register;
pub mod show;

use clap::{Parser, Subcommand};

use crate::config::AppConfig;
use crate::infrastructure::logging;
use crate::infrastructure::storage::StorageType;

/// Back-office user registry
#[derive(Parser)]
#[command(name = "backoffice-users")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Register a new user
    Register(register::RegisterArgs),

    /// Show a user by username (postgres backend only)
    Show(show::ShowArgs),

    /// List all users (postgres backend only)
    List,

    /// Apply database migrations (postgres backend only)
    Migrate,
}

/// Load `.env` and configuration, then start logging
pub fn bootstrap() -> anyhow::Result<AppConfig> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;
    logging::init_logging(&config.logging)?;

    Ok(config)
}

/// Fail unless the configured backend outlives this process
pub fn require_persistent_backend(config: &AppConfig, command: &str) -> anyhow::Result<()> {
    let backend: StorageType = config.storage.backend.parse()?;
    if backend != StorageType::Postgres {
        anyhow::bail!(
            "`{}` needs persistent storage; the in-memory backend starts empty in every process (set storage.backend = postgres)",
            command
        );
    }

    Ok(())
}
