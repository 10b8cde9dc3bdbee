//! User registration and lookup service

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::password::{AlgorithmSelector, TaggedPassword};
use crate::domain::user::{validate_password, validate_username, User, UserRepository};
use crate::domain::DomainError;
use crate::infrastructure::password::EncoderRegistry;

/// Registers back-office users with a randomly chosen, tagged password
/// encoding.
///
/// The duplicate-username check here is best-effort; two concurrent
/// registrations can both pass it, and the repository's own uniqueness
/// constraint decides the winner.
pub struct UserService<R: UserRepository + ?Sized> {
    repository: Arc<R>,
    registry: Arc<EncoderRegistry>,
    selector: Arc<dyn AlgorithmSelector>,
}

impl<R: UserRepository + ?Sized> UserService<R> {
    /// Create a new user service
    pub fn new(
        repository: Arc<R>,
        registry: Arc<EncoderRegistry>,
        selector: Arc<dyn AlgorithmSelector>,
    ) -> Self {
        Self {
            repository,
            registry,
            selector,
        }
    }

    pub fn registry(&self) -> &EncoderRegistry {
        &self.registry
    }

    /// Register a new user
    ///
    /// Replaces the plaintext password with `{algorithm}hash` and persists
    /// the record. Nothing is written when validation or the uniqueness
    /// check fails.
    pub async fn insert(&self, mut user: User) -> Result<User, DomainError> {
        validate_username(user.username()).map_err(|e| DomainError::validation(e.to_string()))?;
        validate_password(user.password()).map_err(|e| DomainError::validation(e.to_string()))?;

        if self.exists(user.username()).await? {
            warn!(username = %user.username(), "Registration rejected: username taken");
            return Err(DomainError::duplicate_username(user.username()));
        }

        let tagged = self.encode_password(user.password())?;
        let algorithm = tagged.algorithm();
        user.set_encoded_password(tagged);

        let user = self.repository.insert(user).await?;

        info!(
            username = %user.username(),
            user_id = %user.id(),
            algorithm = %algorithm,
            "Registered user"
        );

        Ok(user)
    }

    /// Pick an algorithm and turn a plaintext into its tagged hash
    pub fn encode_password(&self, plaintext: &str) -> Result<TaggedPassword, DomainError> {
        Ok(self.registry.encode_with(self.selector.as_ref(), plaintext)?)
    }

    /// Get a user by username. Absence is `Ok(None)`, not an error.
    pub async fn get_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        debug!(username = %username, "Looking up user");
        self.repository.find_by_username(username).await
    }

    /// Get a user by username, failing with `NotFound` when absent
    pub async fn require_by_username(&self, username: &str) -> Result<User, DomainError> {
        self.get_by_username(username)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("User '{}' not found", username)))
    }

    /// List all users
    pub async fn list(&self) -> Result<Vec<User>, DomainError> {
        self.repository.list().await
    }

    async fn exists(&self, username: &str) -> Result<bool, DomainError> {
        Ok(self.repository.find_by_username(username).await?.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{HashMap, HashSet};

    use crate::domain::password::{MockAlgorithmSelector, PasswordAlgorithm, PasswordEncodingError};
    use crate::domain::user::MockUserRepository;
    use crate::infrastructure::password::{fast_registry, SeededSelector};
    use crate::infrastructure::user::repository::InMemoryUserRepository;

    fn create_service() -> UserService<InMemoryUserRepository> {
        create_service_with(Arc::new(SeededSelector::new(2024)))
    }

    fn create_service_with(
        selector: Arc<dyn AlgorithmSelector>,
    ) -> UserService<InMemoryUserRepository> {
        UserService::new(
            Arc::new(InMemoryUserRepository::new()),
            Arc::new(fast_registry()),
            selector,
        )
    }

    fn fixed_selector(code: usize) -> Arc<dyn AlgorithmSelector> {
        let mut selector = MockAlgorithmSelector::new();
        selector.expect_next_code().return_const(code);
        Arc::new(selector)
    }

    #[tokio::test]
    async fn test_register_alice() {
        let service = create_service();

        let user = service.insert(User::new("alice", "secret123")).await.unwrap();
        assert_eq!(user.username(), "alice");

        let stored = service.get_by_username("alice").await.unwrap().unwrap();
        assert_eq!(stored.password(), user.password());
        assert_ne!(stored.password(), "secret123");

        let tag = stored.tagged_password().unwrap();
        let names = ["noop", "bcrypt", "pbkdf2", "scrypt", "sha256"];
        assert!(names.contains(&tag.algorithm().name()));
        assert!(stored.password().starts_with(&format!("{{{}}}", tag.algorithm().name())));

        let again = service.insert(User::new("alice", "other")).await;
        assert!(matches!(
            again,
            Err(DomainError::DuplicateUsername { username }) if username == "alice"
        ));
    }

    #[tokio::test]
    async fn test_every_algorithm_stores_verifiable_tag() {
        for algorithm in PasswordAlgorithm::ALL {
            let service = create_service_with(fixed_selector(algorithm.code()));

            service.insert(User::new("bob", "hunter22")).await.unwrap();

            let stored = service.get_by_username("bob").await.unwrap().unwrap();
            let tag = TaggedPassword::parse(stored.password()).unwrap();

            assert_eq!(tag.algorithm(), algorithm);
            assert!(!tag.hashed().is_empty());
            assert!(service.registry().verify(tag.algorithm().name(), "hunter22", tag.hashed()));
            assert!(!service.registry().verify(tag.algorithm().name(), "hunter23", tag.hashed()));
        }
    }

    #[tokio::test]
    async fn test_noop_stores_tagged_plaintext() {
        let service = create_service_with(fixed_selector(0));

        let user = service.insert(User::new("carol", "secret123")).await.unwrap();
        assert_eq!(user.password(), "{noop}secret123");
    }

    #[tokio::test]
    async fn test_same_password_different_algorithms_differ() {
        let service = create_service_with(fixed_selector(1));
        let other = create_service_with(fixed_selector(4));

        let a = service.insert(User::new("dave", "samepass")).await.unwrap();
        let b = other.insert(User::new("erin", "samepass")).await.unwrap();

        assert_ne!(a.password(), b.password());
    }

    #[tokio::test]
    async fn test_same_password_salted_algorithm_differs() {
        for code in 1..PasswordAlgorithm::COUNT {
            let service = create_service_with(fixed_selector(code));

            let a = service.insert(User::new("frank", "samepass")).await.unwrap();
            let b = service.insert(User::new("grace", "samepass")).await.unwrap();

            assert_ne!(a.password(), b.password(), "code {}", code);
        }
    }

    #[tokio::test]
    async fn test_duplicate_causes_no_write() {
        let mut repository = MockUserRepository::new();
        repository
            .expect_find_by_username()
            .withf(|username| username == "alice")
            .times(1)
            .returning(|_| Ok(Some(User::new("alice", "{noop}secret123"))));
        repository.expect_insert().times(0);

        let mut selector = MockAlgorithmSelector::new();
        selector.expect_next_code().times(0);

        let service = UserService::new(
            Arc::new(repository),
            Arc::new(fast_registry()),
            Arc::new(selector),
        );

        let result = service.insert(User::new("alice", "other")).await;
        assert!(matches!(result, Err(DomainError::DuplicateUsername { .. })));
    }

    #[tokio::test]
    async fn test_validation_causes_no_lookup() {
        let mut repository = MockUserRepository::new();
        repository.expect_find_by_username().times(0);
        repository.expect_insert().times(0);

        let service = UserService::new(
            Arc::new(repository),
            Arc::new(fast_registry()),
            fixed_selector(0),
        );

        let empty_name = service.insert(User::new("", "secret123")).await;
        assert!(matches!(empty_name, Err(DomainError::Validation { .. })));

        let empty_password = service.insert(User::new("alice", "")).await;
        assert!(matches!(empty_password, Err(DomainError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_spaces_and_long_values_are_accepted() {
        let service = create_service_with(fixed_selector(4));

        service.insert(User::new("john smith", "secret123")).await.unwrap();

        let long_name = "a".repeat(200);
        let long_password = "p".repeat(129);
        let user = service.insert(User::new(long_name.as_str(), long_password.as_str())).await.unwrap();

        let tag = user.tagged_password().unwrap();
        assert!(service.registry().matches(&long_password, &tag));
        assert!(service.get_by_username("john smith").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_bcrypt_refuses_long_password_before_write() {
        let mut repository = MockUserRepository::new();
        repository.expect_find_by_username().returning(|_| Ok(None));
        repository.expect_insert().times(0);

        let service = UserService::new(
            Arc::new(repository),
            Arc::new(fast_registry()),
            fixed_selector(1),
        );

        let result = service.insert(User::new("alice", "p".repeat(129))).await;
        assert!(matches!(
            result,
            Err(DomainError::PasswordEncoding(PasswordEncodingError::Hashing { .. }))
        ));
    }

    #[tokio::test]
    async fn test_persistence_error_propagates() {
        let mut repository = MockUserRepository::new();
        repository.expect_find_by_username().returning(|_| Ok(None));
        repository
            .expect_insert()
            .times(1)
            .returning(|_| Err(DomainError::storage("connection reset")));

        let service = UserService::new(
            Arc::new(repository),
            Arc::new(fast_registry()),
            fixed_selector(0),
        );

        let result = service.insert(User::new("alice", "secret123")).await;
        assert!(matches!(
            result,
            Err(DomainError::Storage { message }) if message == "connection reset"
        ));
    }

    #[tokio::test]
    async fn test_lookup_error_propagates() {
        let mut repository = MockUserRepository::new();
        repository
            .expect_find_by_username()
            .returning(|_| Err(DomainError::storage("timeout")));
        repository.expect_insert().times(0);

        let service = UserService::new(
            Arc::new(repository),
            Arc::new(fast_registry()),
            fixed_selector(0),
        );

        let result = service.insert(User::new("alice", "secret123")).await;
        assert!(matches!(result, Err(DomainError::Storage { .. })));
    }

    #[tokio::test]
    async fn test_repository_receives_encoded_password() {
        let mut repository = MockUserRepository::new();
        repository.expect_find_by_username().returning(|_| Ok(None));
        repository
            .expect_insert()
            .withf(|user| user.password().starts_with("{sha256}"))
            .times(1)
            .returning(Ok);

        let service = UserService::new(
            Arc::new(repository),
            Arc::new(fast_registry()),
            fixed_selector(4),
        );

        service.insert(User::new("alice", "secret123")).await.unwrap();
    }

    #[tokio::test]
    async fn test_invalid_code_is_fatal() {
        let mut repository = MockUserRepository::new();
        repository.expect_find_by_username().returning(|_| Ok(None));
        repository.expect_insert().times(0);

        let service = UserService::new(
            Arc::new(repository),
            Arc::new(fast_registry()),
            fixed_selector(5),
        );

        let result = service.insert(User::new("alice", "secret123")).await;
        assert!(matches!(
            result,
            Err(DomainError::PasswordEncoding(PasswordEncodingError::InvalidCode { code: 5, .. }))
        ));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_registrations_store_one_record() {
        let service = Arc::new(create_service_with(fixed_selector(0)));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let service = Arc::clone(&service);
                tokio::spawn(async move { service.insert(User::new("racer", "secret123")).await })
            })
            .collect();

        let mut successes = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => successes += 1,
                Err(e) => assert!(matches!(e, DomainError::DuplicateUsername { .. })),
            }
        }

        assert_eq!(successes, 1);
        assert_eq!(service.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_get_by_username_missing() {
        let service = create_service();

        assert!(service.get_by_username("nobody").await.unwrap().is_none());
        assert!(matches!(
            service.require_by_username("nobody").await,
            Err(DomainError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_algorithm_distribution_is_roughly_uniform() {
        let service = create_service_with(Arc::new(SeededSelector::new(99)));
        let mut counts: HashMap<PasswordAlgorithm, usize> = HashMap::new();

        for _ in 0..2_500 {
            let tagged = service.encode_password("secret123").unwrap();
            *counts.entry(tagged.algorithm()).or_default() += 1;
        }

        assert_eq!(counts.len(), 5);
        for (algorithm, count) in &counts {
            // Expected 500 each
            assert!((380..620).contains(count), "{} chosen {} times", algorithm, count);
        }
    }

    #[tokio::test]
    async fn test_registrations_use_independent_draws() {
        let service = create_service();

        for i in 0..40 {
            service
                .insert(User::new(format!("user-{}", i), "secret123"))
                .await
                .unwrap();
        }

        let algorithms: HashSet<PasswordAlgorithm> = service
            .list()
            .await
            .unwrap()
            .iter()
            .filter_map(|u| u.tagged_password())
            .map(|t| t.algorithm())
            .collect();

        assert!(algorithms.len() > 1);
    }
}
