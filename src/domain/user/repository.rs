//! User repository trait

use async_trait::async_trait;

use super::entity::User;
use crate::domain::DomainError;

#[cfg(test)]
use mockall::automock;

/// Persistence collaborator for back-office users
///
/// Implementations are the authority on username uniqueness: `insert` must
/// reject a second record with an existing username even when two callers
/// raced past the service's pre-check.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by username
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError>;

    /// Insert a new user
    async fn insert(&self, user: User) -> Result<User, DomainError>;

    /// List all users, oldest first
    async fn list(&self) -> Result<Vec<User>, DomainError>;
}
