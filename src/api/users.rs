//! Read endpoints for synchronized GitHub users.
//!
//! Both endpoints answer 200 for unknown usernames: a single lookup returns
//! `{"result": null}`, a multi lookup leaves the user out of the array.

use actix_web::{HttpResponse, get, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::config::split_csv;
use crate::error::AppResult;
use crate::models::UserRecord;
use crate::services::UserStore;
use crate::services::user_query;

/// Single-user lookup response.
#[derive(Debug, Serialize, ToSchema)]
pub struct UserResultResponse {
    /// Stored record, or null when the user was never synchronized
    pub result: Option<UserRecord>,
}

/// Query parameters for the multi-user lookup.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct UsersQuery {
    /// Comma-separated usernames, e.g. `octocat,torvalds`. Whitespace around
    /// each name is ignored, so `%20octocat%20` looks up `octocat`.
    pub users: Option<String>,
}

/// Get the stored record for one username.
#[utoipa::path(
    get,
    path = "/api/v1/user/{username}",
    tag = "Users",
    params(
        ("username" = String, Path, description = "GitHub username (case-sensitive)")
    ),
    responses(
        (status = 200, description = "Stored record or null", body = UserResultResponse),
        (status = 500, description = "Storage failure", body = crate::error::ErrorResponse)
    )
)]
#[get("/user/{username}")]
pub async fn user_detail(
    store: web::Data<dyn UserStore>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let username = path.into_inner();
    let result = user_query::get_user(store.get_ref(), &username).await?;

    Ok(HttpResponse::Ok().json(UserResultResponse { result }))
}

/// Get stored records for a comma-separated list of usernames.
#[utoipa::path(
    get,
    path = "/api/v1/users",
    tag = "Users",
    params(UsersQuery),
    responses(
        (status = 200, description = "Records of the known usernames, in request order", body = Vec<UserRecord>),
        (status = 500, description = "Storage failure", body = crate::error::ErrorResponse)
    )
)]
#[get("/users")]
pub async fn users_list(
    store: web::Data<dyn UserStore>,
    query: web::Query<UsersQuery>,
) -> AppResult<HttpResponse> {
    let usernames = query
        .users
        .as_deref()
        .map(split_csv)
        .unwrap_or_default();

    let result = user_query::get_users(store.get_ref(), &usernames).await?;

    Ok(HttpResponse::Ok().json(result))
}

/// Configure user routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(user_detail).service(users_list);
}
