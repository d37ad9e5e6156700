//! OpenAPI documentation configuration.
//!
//! Defines [`ApiDoc`], the generated OpenAPI specification for the REST
//! API. Swagger UI serves it in debug builds at `/docs`.

use utoipa::OpenApi;

use crate::domain::{Error, ErrorCode, GetUsersResult, User};
use crate::inbound::http::users::{CreateUserForm, CreateUserResponse};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Userhub backend API",
        description = "Users listing and create-user action plus health probes."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::create_user,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        User,
        GetUsersResult,
        CreateUserForm,
        CreateUserResponse,
        Error,
        ErrorCode
    )),
    tags(
        (name = "users", description = "Operations related to users"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
