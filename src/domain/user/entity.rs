//! User entity and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::password::TaggedPassword;

/// User identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    /// Generate a fresh random identifier
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Status of a back-office account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum UserStatus {
    #[default]
    Enabled,
    Disabled,
}

impl UserStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Enabled => "enabled",
            Self::Disabled => "disabled",
        }
    }

    /// Parse a stored status, treating anything unrecognised as enabled
    pub fn from_str_lossy(s: &str) -> Self {
        match s {
            "disabled" => Self::Disabled,
            _ => Self::Enabled,
        }
    }
}

/// Back-office user record
///
/// `password` holds the plaintext until registration encodes it, and the
/// tagged hash (`{algorithm}hash`) from then on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    username: String,
    #[serde(skip_serializing, default)]
    password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    email: Option<String>,
    status: UserStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new, not yet registered user with a plaintext password
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        let now = Utc::now();

        Self {
            id: UserId::generate(),
            username: username.into(),
            password: password.into(),
            display_name: None,
            email: None,
            status: UserStatus::Enabled,
            created_at: now,
            updated_at: now,
        }
    }

    /// Rebuild a user from stored fields
    #[allow(clippy::too_many_arguments)]
    pub fn restore(
        id: UserId,
        username: String,
        password: String,
        display_name: Option<String>,
        email: Option<String>,
        status: UserStatus,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            username,
            password,
            display_name,
            email,
            status,
            created_at,
            updated_at,
        }
    }

    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    // Getters

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    pub fn status(&self) -> UserStatus {
        self.status
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// The stored password parsed as a tagged hash, if it is one
    pub fn tagged_password(&self) -> Option<TaggedPassword> {
        TaggedPassword::parse(&self.password).ok()
    }

    // Mutators

    /// Replace the plaintext with its tagged hash
    pub fn set_encoded_password(&mut self, tagged: TaggedPassword) {
        self.password = tagged.into();
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::password::PasswordAlgorithm;

    #[test]
    fn test_user_creation() {
        let user = User::new("alice", "secret123")
            .with_display_name("Alice")
            .with_email("alice@example.com");

        assert_eq!(user.username(), "alice");
        assert_eq!(user.password(), "secret123");
        assert_eq!(user.display_name(), Some("Alice"));
        assert_eq!(user.email(), Some("alice@example.com"));
        assert_eq!(user.status(), UserStatus::Enabled);
        assert!(user.tagged_password().is_none());
    }

    #[test]
    fn test_ids_are_unique() {
        let a = User::new("a", "pw");
        let b = User::new("b", "pw");
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_set_encoded_password() {
        let mut user = User::new("alice", "secret123");
        let original_updated = user.updated_at();

        std::thread::sleep(std::time::Duration::from_millis(10));

        let tagged = TaggedPassword::new(PasswordAlgorithm::Noop, "secret123").unwrap();
        user.set_encoded_password(tagged.clone());

        assert_eq!(user.password(), "{noop}secret123");
        assert_eq!(user.tagged_password(), Some(tagged));
        assert!(user.updated_at() > original_updated);
    }

    #[test]
    fn test_status_strings() {
        assert_eq!(UserStatus::Enabled.as_str(), "enabled");
        assert_eq!(UserStatus::from_str_lossy("disabled"), UserStatus::Disabled);
        assert_eq!(UserStatus::from_str_lossy("unknown"), UserStatus::Enabled);
    }

    #[test]
    fn test_serialization_excludes_password() {
        let user = User::new("alice", "secret123");

        let json = serde_json::to_string(&user).unwrap();
        assert!(json.contains("alice"));
        assert!(!json.contains("secret123"));
        assert!(!json.contains("password"));
    }
}
