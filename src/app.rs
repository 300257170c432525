//! HTTP application wiring shared by the server binary and tests.

use std::path::PathBuf;

use actix_cors::Cors;
use actix_files::Files;
use actix_web::http::header;
use actix_web::web;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api;

/// Register API routes, API docs and, when configured, the client bundle.
///
/// The bundle is mounted at `/` last so API paths always win.
pub fn configure_app(cfg: &mut web::ServiceConfig, static_dir: Option<PathBuf>) {
    cfg.service(
        web::scope("/api/v1")
            .configure(api::configure_health_routes)
            .configure(api::configure_user_routes),
    )
    .service(SwaggerUi::new("/api/docs/{_:.*}").url("/api/openapi.json", api::ApiDoc::openapi()));

    if let Some(dir) = static_dir {
        cfg.service(Files::new("/", dir).index_file("index.html").prefer_utf8(true));
    }
}

/// Read-only CORS policy. An empty origin list allows any origin.
pub fn cors_layer(origins: &[String]) -> Cors {
    let cors = Cors::default()
        .allowed_methods(vec!["GET", "OPTIONS"])
        .allowed_headers(vec![header::ACCEPT, header::CONTENT_TYPE])
        .max_age(3600);

    if origins.is_empty() {
        cors.allow_any_origin()
    } else {
        origins
            .iter()
            .fold(cors, |cors, origin| cors.allowed_origin(origin))
    }
}
