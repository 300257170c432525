//! OpenAPI documentation configuration.

use utoipa::OpenApi;

use crate::{api, error, models};

/// OpenAPI documentation.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "GitHub Users Server",
        version = "0.1.0",
        description = "Read API over synchronized GitHub profiles and public repositories"
    ),
    servers(
        (url = "/", description = "Local server")
    ),
    paths(
        api::health::health,
        api::health::ready,
        api::users::user_detail,
        api::users::users_list,
    ),
    components(
        schemas(
            error::ErrorResponse,
            api::health::HealthResponse,
            api::health::ReadyResponse,
            api::users::UserResultResponse,
            models::UserRecord,
            models::UserInformation,
            models::RepositoryInformation,
        )
    ),
    tags(
        (name = "Health", description = "Health check endpoints"),
        (name = "Users", description = "Synchronized GitHub users")
    )
)]
pub struct ApiDoc;
