//! Database migrations infrastructure

use sqlx::postgres::PgPool;
use tracing::info;

use crate::domain::DomainError;

/// PostgreSQL migrator recording applied versions in `_migrations`
#[derive(Debug)]
pub struct PostgresMigrator {
    pool: PgPool,
}

impl PostgresMigrator {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates the migrations table if it doesn't exist
    async fn ensure_migrations_table(&self) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS _migrations (
                version BIGINT PRIMARY KEY,
                description TEXT NOT NULL,
                installed_on TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to create migrations table: {}", e)))?;

        Ok(())
    }

    async fn is_applied(&self, version: i64) -> Result<bool, DomainError> {
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM _migrations WHERE version = $1)")
            .bind(version)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to check migration status: {}", e)))
    }

    /// Runs a single migration inside a transaction. Returns false when it
    /// was already applied.
    pub async fn run_migration(&self, migration: &Migration) -> Result<bool, DomainError> {
        self.ensure_migrations_table().await?;

        if self.is_applied(migration.version).await? {
            return Ok(false);
        }

        let to_error = |e: sqlx::Error| {
            DomainError::storage(format!("Failed to run migration {}: {}", migration.version, e))
        };

        let mut tx = self.pool.begin().await.map_err(to_error)?;

        sqlx::raw_sql(migration.up).execute(&mut *tx).await.map_err(to_error)?;

        sqlx::query("INSERT INTO _migrations (version, description) VALUES ($1, $2)")
            .bind(migration.version)
            .bind(migration.description)
            .execute(&mut *tx)
            .await
            .map_err(to_error)?;

        tx.commit().await.map_err(to_error)?;

        info!(version = migration.version, description = migration.description, "Applied migration");

        Ok(true)
    }

    /// Returns the latest applied migration version
    pub async fn current_version(&self) -> Result<Option<i64>, DomainError> {
        self.ensure_migrations_table().await?;

        sqlx::query_scalar("SELECT MAX(version) FROM _migrations")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to get migration version: {}", e)))
    }
}

/// Represents a database migration
#[derive(Debug, Clone, Copy)]
pub struct Migration {
    pub version: i64,
    pub description: &'static str,
    /// SQL to run when applying the migration
    pub up: &'static str,
}

/// Migrations for the user store, in ascending version order
pub fn user_migrations() -> Vec<Migration> {
    vec![
        Migration {
            version: 1,
            description: "Create back_users table",
            up: r#"
            CREATE TABLE IF NOT EXISTS back_users (
                id UUID PRIMARY KEY,
                username TEXT NOT NULL,
                password TEXT NOT NULL,
                display_name VARCHAR(255),
                email VARCHAR(255),
                status VARCHAR(16) NOT NULL DEFAULT 'enabled',
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                CONSTRAINT back_users_username_key UNIQUE (username)
            );
            CREATE INDEX IF NOT EXISTS idx_back_users_created_at ON back_users(created_at);
            "#,
        },
        Migration {
            version: 2,
            description: "Require tagged password values",
            up: r#"
            ALTER TABLE back_users
                ADD CONSTRAINT back_users_password_tagged
                CHECK (password ~ '^\{(noop|bcrypt|pbkdf2|scrypt|sha256)\}.+');
            "#,
        },
    ]
}

/// Runs all pending user store migrations, returning how many were applied
pub async fn run_user_migrations(pool: &PgPool) -> Result<usize, DomainError> {
    let migrator = PostgresMigrator::new(pool.clone());
    let mut applied = 0;

    for migration in user_migrations() {
        if migrator.run_migration(&migration).await? {
            applied += 1;
        }
    }

    Ok(applied)
}
