//! Port abstraction for user persistence adapters and their errors.
//!
//! The [`UserRepository`] trait is the contract application logic depends on;
//! callers never see a concrete store type. Missing rows on the find
//! operations are an `Ok(None)` result, never an error. Mutations of missing
//! rows and duplicate emails surface as dedicated error variants so inbound
//! adapters can classify them.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::{CreateUserInput, EmailAddress, User, UserId, UserPatch};

/// Persistence errors raised by user repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserRepositoryError {
    /// Repository connection could not be established.
    #[error("user repository connection failed: {message}")]
    Connection { message: String },

    /// Query or mutation failed during execution.
    #[error("user repository query failed: {message}")]
    Query { message: String },

    /// Another user already owns the email address.
    #[error("email {email} already exists")]
    DuplicateEmail { email: String },

    /// Update or delete targeted a nonexistent user.
    #[error("user {id} not found")]
    NotFound { id: Uuid },
}

impl UserRepositoryError {
    /// Create a connection error with the given message.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Create a query error with the given message.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }

    /// Create a duplicate-email error for the given address.
    pub fn duplicate_email(email: impl Into<String>) -> Self {
        Self::DuplicateEmail {
            email: email.into(),
        }
    }

    /// Create a not-found error for the given identifier.
    pub const fn not_found(id: UserId) -> Self {
        Self::NotFound { id: *id.as_uuid() }
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fetch a user by identifier. `Ok(None)` when no such user exists.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserRepositoryError>;

    /// Fetch a user by email address. `Ok(None)` when no such user exists.
    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<User>, UserRepositoryError>;

    /// Fetch all users ordered by creation time, newest first.
    async fn find_all(&self) -> Result<Vec<User>, UserRepositoryError>;

    /// Create a user with a generated identifier and timestamps.
    ///
    /// Fails with [`UserRepositoryError::DuplicateEmail`] when the email is
    /// already taken.
    async fn create(&self, input: &CreateUserInput) -> Result<User, UserRepositoryError>;

    /// Apply the fields present in `patch` to an existing user.
    ///
    /// Fails with [`UserRepositoryError::NotFound`] when `id` does not exist.
    async fn update(&self, id: &UserId, patch: &UserPatch) -> Result<User, UserRepositoryError>;

    /// Delete a user.
    ///
    /// Fails with [`UserRepositoryError::NotFound`] when `id` does not exist.
    async fn delete(&self, id: &UserId) -> Result<(), UserRepositoryError>;
}

#[derive(Default)]
struct InMemoryState {
    // Insertion sequence breaks ordering ties between users created within
    // the same timestamp tick.
    next_seq: u64,
    rows: HashMap<Uuid, (u64, User)>,
}

/// In-memory [`UserRepository`] implementation.
///
/// Backs unit and HTTP tests, and serves as the store when the server runs
/// without a database pool. The lock is never held across an await point.
#[derive(Default)]
pub struct InMemoryUserRepository {
    state: Mutex<InMemoryState>,
}

impl InMemoryUserRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, InMemoryState>, UserRepositoryError> {
        self.state
            .lock()
            .map_err(|_| UserRepositoryError::connection("in-memory store lock poisoned"))
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserRepositoryError> {
        let state = self.lock()?;
        Ok(state.rows.get(id.as_uuid()).map(|(_, user)| user.clone()))
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<User>, UserRepositoryError> {
        let state = self.lock()?;
        Ok(state
            .rows
            .values()
            .find(|(_, user)| user.email() == email)
            .map(|(_, user)| user.clone()))
    }

    async fn find_all(&self) -> Result<Vec<User>, UserRepositoryError> {
        let state = self.lock()?;
        let mut rows: Vec<(u64, User)> = state.rows.values().cloned().collect();
        rows.sort_by(|(seq_a, a), (seq_b, b)| {
            (b.created_at(), seq_b).cmp(&(a.created_at(), seq_a))
        });
        Ok(rows.into_iter().map(|(_, user)| user).collect())
    }

    async fn create(&self, input: &CreateUserInput) -> Result<User, UserRepositoryError> {
        let mut state = self.lock()?;
        if state
            .rows
            .values()
            .any(|(_, user)| user.email() == &input.email)
        {
            return Err(UserRepositoryError::duplicate_email(input.email.as_str()));
        }

        let seq = state.next_seq;
        state.next_seq += 1;
        let now = Utc::now();
        let user = User::new(
            UserId::random(),
            input.email.clone(),
            input.name.clone(),
            now,
            now,
        );
        state.rows.insert(*user.id().as_uuid(), (seq, user.clone()));
        Ok(user)
    }

    async fn update(&self, id: &UserId, patch: &UserPatch) -> Result<User, UserRepositoryError> {
        let mut state = self.lock()?;

        if let Some(email) = &patch.email {
            let taken = state
                .rows
                .values()
                .any(|(_, user)| user.email() == email && user.id() != id);
            if taken {
                return Err(UserRepositoryError::duplicate_email(email.as_str()));
            }
        }

        let (seq, current) = state
            .rows
            .get(id.as_uuid())
            .cloned()
            .ok_or_else(|| UserRepositoryError::not_found(*id))?;

        let updated = User::new(
            *current.id(),
            patch.email.clone().unwrap_or_else(|| current.email().clone()),
            patch
                .name
                .clone()
                .or_else(|| current.name().map(str::to_owned)),
            current.created_at(),
            Utc::now(),
        );
        state
            .rows
            .insert(*id.as_uuid(), (seq, updated.clone()));
        Ok(updated)
    }

    async fn delete(&self, id: &UserId) -> Result<(), UserRepositoryError> {
        let mut state = self.lock()?;
        state
            .rows
            .remove(id.as_uuid())
            .map(|_| ())
            .ok_or_else(|| UserRepositoryError::not_found(*id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn input(email: &str, name: Option<&str>) -> CreateUserInput {
        CreateUserInput::from_parts(email, name.map(str::to_owned)).expect("valid input")
    }

    #[tokio::test]
    async fn create_then_find_by_id_round_trips() {
        let repo = InMemoryUserRepository::new();

        let created = repo
            .create(&input("ada@example.com", Some("Ada")))
            .await
            .expect("create succeeds");
        let found = repo
            .find_by_id(created.id())
            .await
            .expect("find succeeds")
            .expect("user present");

        assert_eq!(found, created);
    }

    #[tokio::test]
    async fn create_rejects_duplicate_email_without_new_row() {
        let repo = InMemoryUserRepository::new();
        repo.create(&input("ada@example.com", None))
            .await
            .expect("first create succeeds");

        let err = repo
            .create(&input("ada@example.com", Some("Imposter")))
            .await
            .expect_err("second create must fail");

        assert!(matches!(err, UserRepositoryError::DuplicateEmail { .. }));
        let all = repo.find_all().await.expect("find_all succeeds");
        assert_eq!(all.len(), 1);
    }

    #[tokio::test]
    async fn find_all_orders_newest_first() {
        let repo = InMemoryUserRepository::new();
        let first = repo
            .create(&input("first@example.com", None))
            .await
            .expect("create succeeds");
        let second = repo
            .create(&input("second@example.com", None))
            .await
            .expect("create succeeds");

        let all = repo.find_all().await.expect("find_all succeeds");

        assert_eq!(
            all.iter().map(User::id).collect::<Vec<_>>(),
            vec![second.id(), first.id()]
        );
    }

    #[tokio::test]
    async fn find_all_on_empty_store_returns_empty_vec() {
        let repo = InMemoryUserRepository::new();
        assert!(repo.find_all().await.expect("find_all succeeds").is_empty());
    }

    #[tokio::test]
    async fn find_by_email_distinguishes_missing_from_error() {
        let repo = InMemoryUserRepository::new();
        let email = EmailAddress::new("ghost@example.com").expect("valid email");

        let found = repo.find_by_email(&email).await.expect("find succeeds");

        assert!(found.is_none());
    }

    #[tokio::test]
    async fn update_applies_only_present_fields() {
        let repo = InMemoryUserRepository::new();
        let created = repo
            .create(&input("ada@example.com", Some("Ada")))
            .await
            .expect("create succeeds");

        let patch = UserPatch {
            name: Some("Ada Lovelace".to_owned()),
            ..UserPatch::default()
        };
        let updated = repo
            .update(created.id(), &patch)
            .await
            .expect("update succeeds");

        assert_eq!(updated.name(), Some("Ada Lovelace"));
        assert_eq!(updated.email(), created.email());
        assert_eq!(updated.created_at(), created.created_at());
    }

    #[tokio::test]
    async fn update_missing_user_reports_not_found() {
        let repo = InMemoryUserRepository::new();
        let id = UserId::random();

        let err = repo
            .update(&id, &UserPatch::default())
            .await
            .expect_err("update of missing user must fail");

        assert_eq!(err, UserRepositoryError::not_found(id));
    }

    #[tokio::test]
    async fn update_rejects_email_already_taken_by_another_user() {
        let repo = InMemoryUserRepository::new();
        repo.create(&input("ada@example.com", None))
            .await
            .expect("create succeeds");
        let bob = repo
            .create(&input("bob@example.com", None))
            .await
            .expect("create succeeds");

        let patch = UserPatch {
            email: Some(EmailAddress::new("ada@example.com").expect("valid email")),
            ..UserPatch::default()
        };
        let err = repo
            .update(bob.id(), &patch)
            .await
            .expect_err("update to taken email must fail");

        assert!(matches!(err, UserRepositoryError::DuplicateEmail { .. }));
    }

    #[tokio::test]
    async fn delete_removes_user_and_rejects_missing_ids() {
        let repo = InMemoryUserRepository::new();
        let created = repo
            .create(&input("ada@example.com", None))
            .await
            .expect("create succeeds");

        repo.delete(created.id()).await.expect("delete succeeds");
        assert!(repo
            .find_by_id(created.id())
            .await
            .expect("find succeeds")
            .is_none());

        let err = repo
            .delete(created.id())
            .await
            .expect_err("second delete must fail");
        assert_eq!(err, UserRepositoryError::not_found(*created.id()));
    }

    #[rstest]
    #[case(
        UserRepositoryError::connection("refused"),
        "user repository connection failed: refused"
    )]
    #[case(
        UserRepositoryError::duplicate_email("ada@example.com"),
        "email ada@example.com already exists"
    )]
    fn errors_format_messages(#[case] error: UserRepositoryError, #[case] expected: &str) {
        assert_eq!(error.to_string(), expected);
    }
}
