//! Users API handlers.
//!
//! ```text
//! GET  /api/v1/users
//! POST /api/v1/users   email=ada@example.com&name=Ada
//! ```
//!
//! The read path propagates domain errors as JSON error responses. The
//! write path is a form action: it never surfaces an error status for its
//! own failures, callers inspect the structured body instead.

use actix_web::{get, post, web};
use serde::{Deserialize, Serialize};
use tracing::warn;
use utoipa::ToSchema;

use crate::domain::{CreateUserInput, EmailAddress, GetUsersResult, User};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

/// Raw form fields for `POST /users`.
///
/// The boundary is untyped: both fields are optional text until validated.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct CreateUserForm {
    #[schema(example = "ada@example.com")]
    pub email: Option<String>,
    #[schema(example = "Ada Lovelace")]
    pub name: Option<String>,
}

/// Structured outcome of the create-user action.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
}

impl CreateUserResponse {
    fn created(user: User) -> Self {
        Self {
            success: true,
            error: None,
            user: Some(user),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(message.into()),
            user: None,
        }
    }
}

/// List all users, newest first, with their count.
#[utoipa::path(
    get,
    path = "/api/v1/users",
    responses(
        (status = 200, description = "Users with total count", body = GetUsersResult),
        (status = 503, description = "Store unavailable", body = crate::domain::Error),
        (status = 500, description = "Internal server error", body = crate::domain::Error)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(state: web::Data<HttpState>) -> ApiResult<web::Json<GetUsersResult>> {
    let result = state.users.load().await?;
    Ok(web::Json(result))
}

/// Create a user from submitted form fields.
///
/// Validates the email, creates the user through the repository port, and
/// invalidates the cached user list on success. Store failures (including
/// a duplicate email) come back as `success: false` with the store's
/// message; nothing is retried.
#[utoipa::path(
    post,
    path = "/api/v1/users",
    request_body(
        content = CreateUserForm,
        content_type = "application/x-www-form-urlencoded"
    ),
    responses(
        (status = 200, description = "Action outcome", body = CreateUserResponse)
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("/users")]
pub async fn create_user(
    state: web::Data<HttpState>,
    form: web::Form<CreateUserForm>,
) -> web::Json<CreateUserResponse> {
    let CreateUserForm { email, name } = form.into_inner();

    let Some(email) = email.and_then(|raw| EmailAddress::new(raw).ok()) else {
        return web::Json(CreateUserResponse::failure("Invalid email"));
    };
    let name = name.filter(|value| !value.trim().is_empty());

    let input = CreateUserInput { email, name };
    match state.repository.create(&input).await {
        Ok(user) => {
            state.users.invalidate();
            web::Json(CreateUserResponse::created(user))
        }
        Err(err) => {
            warn!(email = input.email.as_str(), error = %err, "create user failed");
            web::Json(CreateUserResponse::failure(err.to_string()))
        }
    }
}
