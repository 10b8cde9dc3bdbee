//! In-memory user repository implementation

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::user::{User, UserId, UserRepository};
use crate::domain::DomainError;

/// In-memory implementation of UserRepository
#[derive(Debug)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<UserId, User>>>,
    /// Index for username -> user ID lookup
    username_index: Arc<RwLock<HashMap<String, UserId>>>,
}

impl InMemoryUserRepository {
    /// Create a new empty repository
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
            username_index: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Create a repository with initial users
    pub fn with_users(users: Vec<User>) -> Self {
        let mut users_map = HashMap::new();
        let mut username_map = HashMap::new();

        for user in users {
            username_map.insert(user.username().to_string(), *user.id());
            users_map.insert(*user.id(), user);
        }

        Self {
            users: Arc::new(RwLock::new(users_map)),
            username_index: Arc::new(RwLock::new(username_map)),
        }
    }

    /// Number of stored users
    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        // Same lock order as `insert`: users, then index
        let users = self.users.read().await;
        let username_index = self.username_index.read().await;

        Ok(username_index
            .get(username)
            .and_then(|user_id| users.get(user_id))
            .cloned())
    }

    async fn insert(&self, user: User) -> Result<User, DomainError> {
        let mut users = self.users.write().await;
        let mut username_index = self.username_index.write().await;

        if users.contains_key(user.id()) {
            return Err(DomainError::conflict(format!(
                "User with ID '{}' already exists",
                user.id()
            )));
        }

        if username_index.contains_key(user.username()) {
            return Err(DomainError::duplicate_username(user.username()));
        }

        username_index.insert(user.username().to_string(), *user.id());
        users.insert(*user.id(), user.clone());

        Ok(user)
    }

    async fn list(&self) -> Result<Vec<User>, DomainError> {
        let users = self.users.read().await;

        let mut result: Vec<User> = users.values().cloned().collect();
        result.sort_by_key(|u| u.created_at());

        Ok(result)
    }
}
