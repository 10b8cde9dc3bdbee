//! Migrate command

use tracing::info;

use crate::infrastructure::storage::{run_user_migrations, PostgresMigrator};

pub async fn run() -> anyhow::Result<()> {
    let config = super::bootstrap()?;
    super::require_persistent_backend(&config, "migrate")?;

    let pool = crate::connect_postgres(&config).await?;

    let applied = run_user_migrations(&pool).await?;
    let version = PostgresMigrator::new(pool).current_version().await?;

    info!(applied, ?version, "Migrations complete");
    println!("Applied {} migration(s); schema version {:?}", applied, version);

    Ok(())
}
