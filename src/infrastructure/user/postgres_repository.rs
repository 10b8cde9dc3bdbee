//! PostgreSQL user repository implementation

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Row};
use tracing::debug;
use uuid::Uuid;

use crate::domain::user::{User, UserId, UserRepository, UserStatus};
use crate::domain::DomainError;

/// Postgres error code for unique constraint violations
const UNIQUE_VIOLATION: &str = "23505";

/// Unique constraint on `back_users.username`, see the user migrations
const USERNAME_CONSTRAINT: &str = "back_users_username_key";

/// PostgreSQL implementation of UserRepository over the `back_users` table
#[derive(Debug, Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    /// Create a new repository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, username, password, display_name, email, status,
                   created_at, updated_at
            FROM back_users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to get user by username: {}", e)))?;

        match row {
            Some(row) => Ok(Some(row_to_user(&row)?)),
            None => Ok(None),
        }
    }

    async fn insert(&self, user: User) -> Result<User, DomainError> {
        sqlx::query(
            r#"
            INSERT INTO back_users (id, username, password, display_name, email, status,
                                    created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(user.id().as_uuid())
        .bind(user.username())
        .bind(user.password())
        .bind(user.display_name())
        .bind(user.email())
        .bind(user.status().as_str())
        .bind(user.created_at())
        .bind(user.updated_at())
        .execute(&self.pool)
        .await
        .map_err(|e| map_insert_error(e, &user))?;

        debug!(username = %user.username(), "Inserted user row");

        Ok(user)
    }

    async fn list(&self) -> Result<Vec<User>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, username, password, display_name, email, status,
                   created_at, updated_at
            FROM back_users
            ORDER BY created_at
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to list users: {}", e)))?;

        rows.iter().map(row_to_user).collect()
    }
}

fn map_insert_error(e: sqlx::Error, user: &User) -> DomainError {
    let db_error = e.as_database_error();
    let code = db_error.and_then(|db| db.code()).map(|code| code.into_owned());
    let constraint = db_error.and_then(|db| db.constraint());

    classify_insert_error(code.as_deref(), constraint, user, &e.to_string())
}

/// Decide what a failed insert means from its SQLSTATE and constraint name
fn classify_insert_error(
    code: Option<&str>,
    constraint: Option<&str>,
    user: &User,
    detail: &str,
) -> DomainError {
    match (code, constraint) {
        (Some(UNIQUE_VIOLATION), Some(USERNAME_CONSTRAINT)) => {
            DomainError::duplicate_username(user.username())
        }
        (Some(UNIQUE_VIOLATION), _) => {
            DomainError::conflict(format!("User with ID '{}' already exists", user.id()))
        }
        _ => DomainError::storage(format!("Failed to create user: {}", detail)),
    }
}

fn row_to_user(row: &sqlx::postgres::PgRow) -> Result<User, DomainError> {
    let read_error = |e: sqlx::Error| DomainError::storage(format!("Invalid user row: {}", e));

    let id: Uuid = row.try_get("id").map_err(read_error)?;
    let username: String = row.try_get("username").map_err(read_error)?;
    let password: String = row.try_get("password").map_err(read_error)?;
    let display_name: Option<String> = row.try_get("display_name").map_err(read_error)?;
    let email: Option<String> = row.try_get("email").map_err(read_error)?;
    let status: String = row.try_get("status").map_err(read_error)?;
    let created_at: DateTime<Utc> = row.try_get("created_at").map_err(read_error)?;
    let updated_at: DateTime<Utc> = row.try_get("updated_at").map_err(read_error)?;

    Ok(User::restore(
        UserId::from_uuid(id),
        username,
        password,
        display_name,
        email,
        UserStatus::from_str_lossy(&status),
        created_at,
        updated_at,
    ))
}
