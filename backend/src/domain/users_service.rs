//! Get-users usecase.
//!
//! Single application-level operation: list every user together with the
//! count. Depends only on the [`UserRepository`] port so tests never need a
//! real store.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::{UserRepository, UserRepositoryError};
use crate::domain::{Error, User};

/// Result bundle returned by [`GetUsersService::execute`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GetUsersResult {
    pub users: Vec<User>,
    #[schema(example = 2)]
    pub total: usize,
}

/// Usecase listing all users, newest first.
#[derive(Clone)]
pub struct GetUsersService {
    repository: Arc<dyn UserRepository>,
}

impl GetUsersService {
    /// Create the usecase over any repository implementation.
    pub fn new(repository: Arc<dyn UserRepository>) -> Self {
        Self { repository }
    }

    /// List all users and report their count.
    ///
    /// Repository failures are wrapped into a single domain error carrying
    /// the original message; there is no retry and no suppression.
    pub async fn execute(&self) -> Result<GetUsersResult, Error> {
        let users = self
            .repository
            .find_all()
            .await
            .map_err(wrap_repository_error)?;

        let total = users.len();
        Ok(GetUsersResult { users, total })
    }
}

fn wrap_repository_error(error: UserRepositoryError) -> Error {
    let message = format!("failed to get users: {error}");
    match error {
        UserRepositoryError::Connection { .. } => Error::service_unavailable(message),
        _ => Error::internal(message),
    }
}
