//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.
//!
//! Each operation performs exactly one round trip and holds no state beyond
//! a clone of the shared connection pool. Store failures are classified
//! into the port's error variants here; the layers above never see Diesel
//! types.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::ports::{UserRepository, UserRepositoryError};
use crate::domain::{CreateUserInput, EmailAddress, User, UserId, UserPatch};

use super::models::{NewUserRow, UserRow, UserRowChangeset};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel-backed implementation of the `UserRepository` port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository over the shared connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserRepositoryError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            UserRepositoryError::connection(message)
        }
    }
}

fn is_unique_violation(error: &diesel::result::Error) -> bool {
    matches!(
        error,
        diesel::result::Error::DatabaseError(
            diesel::result::DatabaseErrorKind::UniqueViolation,
            _,
        )
    )
}

fn map_diesel_error(error: diesel::result::Error) -> UserRepositoryError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        other => debug!(error = %other, "diesel operation failed"),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            UserRepositoryError::connection("database connection error")
        }
        DieselError::DatabaseError(_, info) => UserRepositoryError::query(info.message()),
        other => UserRepositoryError::query(other.to_string()),
    }
}

fn row_to_user(row: UserRow) -> Result<User, UserRepositoryError> {
    let email = EmailAddress::new(row.email)
        .map_err(|err| UserRepositoryError::query(format!("invalid email in row: {err}")))?;
    Ok(User::new(
        UserId::from_uuid(row.id),
        email,
        row.name,
        row.created_at,
        row.updated_at,
    ))
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<UserRow> = users::table
            .find(*id.as_uuid())
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_user).transpose()
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<User>, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<UserRow> = users::table
            .filter(users::email.eq(email.as_str()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_user).transpose()
    }

    async fn find_all(&self) -> Result<Vec<User>, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<UserRow> = users::table
            .order(users::created_at.desc())
            .select(UserRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_user).collect()
    }

    async fn create(&self, input: &CreateUserInput) -> Result<User, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewUserRow {
            id: *UserId::random().as_uuid(),
            email: input.email.as_str(),
            name: input.name.as_deref(),
        };

        let row: UserRow = diesel::insert_into(users::table)
            .values(&new_row)
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| {
                if is_unique_violation(&err) {
                    UserRepositoryError::duplicate_email(input.email.as_str())
                } else {
                    map_diesel_error(err)
                }
            })?;

        row_to_user(row)
    }

    async fn update(&self, id: &UserId, patch: &UserPatch) -> Result<User, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let changeset = UserRowChangeset {
            email: patch.email.as_ref().map(EmailAddress::as_str),
            name: patch.name.as_deref(),
            updated_at: chrono::Utc::now(),
        };

        let row: Option<UserRow> = diesel::update(users::table.find(*id.as_uuid()))
            .set(&changeset)
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(|err| match (&patch.email, is_unique_violation(&err)) {
                (Some(email), true) => UserRepositoryError::duplicate_email(email.as_str()),
                _ => map_diesel_error(err),
            })?;

        match row {
            Some(row) => row_to_user(row),
            None => Err(UserRepositoryError::not_found(*id)),
        }
    }

    async fn delete(&self, id: &UserId) -> Result<(), UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted = diesel::delete(users::table.find(*id.as_uuid()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        if deleted == 0 {
            return Err(UserRepositoryError::not_found(*id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rstest::rstest;
    use uuid::Uuid;

    #[rstest]
    fn pool_errors_map_to_connection_errors() {
        let err = map_pool_error(PoolError::checkout("connection refused"));

        assert!(matches!(err, UserRepositoryError::Connection { .. }));
        assert!(err.to_string().contains("connection refused"));
    }

    #[rstest]
    fn plain_diesel_errors_map_to_query_errors() {
        let err = map_diesel_error(diesel::result::Error::NotFound);

        assert!(matches!(err, UserRepositoryError::Query { .. }));
    }

    #[rstest]
    fn unique_violations_are_recognised() {
        let err = diesel::result::Error::DatabaseError(
            diesel::result::DatabaseErrorKind::UniqueViolation,
            Box::new("duplicate key value violates unique constraint".to_owned()),
        );

        assert!(is_unique_violation(&err));
        assert!(!is_unique_violation(&diesel::result::Error::NotFound));
    }

    #[rstest]
    fn rows_convert_to_domain_users() {
        let now = Utc::now();
        let row = UserRow {
            id: Uuid::new_v4(),
            email: "ada@example.com".to_owned(),
            name: Some("Ada".to_owned()),
            created_at: now,
            updated_at: now,
        };

        let user = row_to_user(row).expect("row converts");

        assert_eq!(user.email().as_str(), "ada@example.com");
        assert_eq!(user.name(), Some("Ada"));
        assert_eq!(user.created_at(), now);
    }

    #[rstest]
    fn corrupt_email_rows_surface_query_errors() {
        let now = Utc::now();
        let row = UserRow {
            id: Uuid::new_v4(),
            email: "not-an-email".to_owned(),
            name: None,
            created_at: now,
            updated_at: now,
        };

        let err = row_to_user(row).expect_err("row must be rejected");

        assert!(matches!(err, UserRepositoryError::Query { .. }));
    }
}
