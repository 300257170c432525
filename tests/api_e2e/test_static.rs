//! E2E tests: client bundle serving and CORS.

use actix_web::http::header;
use actix_web::{App, test, web};
use github_users_lib::app::{configure_app, cors_layer};
use github_users_lib::services::{InMemoryUserStore, UserStore};
use std::sync::Arc;

use super::test_helpers::*;

fn bundle_dir() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("index.html"),
        "<!doctype html><title>GitHub Users</title>",
    )
    .unwrap();
    std::fs::create_dir(dir.path().join("static")).unwrap();
    std::fs::write(dir.path().join("static").join("main.js"), "console.log(1);").unwrap();
    dir
}

#[actix_rt::test]
async fn test_root_serves_index() {
    let dir = bundle_dir();
    let app = create_test_app(
        Arc::new(InMemoryUserStore::new()),
        Some(dir.path().to_path_buf()),
    )
    .await;

    let req = test::TestRequest::get().uri("/").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let body = test::read_body(resp).await;
    assert!(String::from_utf8_lossy(&body).contains("GitHub Users"));

    let req = test::TestRequest::get().uri("/static/main.js").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
}

#[actix_rt::test]
async fn test_api_routes_take_precedence_over_bundle() {
    let dir = bundle_dir();
    let app = create_test_app(
        Arc::new(InMemoryUserStore::new()),
        Some(dir.path().to_path_buf()),
    )
    .await;

    let (status, body) = get_json(&app, "/api/v1/users?users=alice").await;

    assert_eq!(status, 200);
    assert_eq!(body, serde_json::json!([]));
}

#[actix_rt::test]
async fn test_root_without_bundle_is_404() {
    let app = create_test_app(Arc::new(InMemoryUserStore::new()), None).await;

    let req = test::TestRequest::get().uri("/").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 404);
}

#[actix_rt::test]
async fn test_cors_any_origin_by_default() {
    let store: Arc<dyn UserStore> = Arc::new(InMemoryUserStore::new());
    let app = test::init_service(
        App::new()
            .wrap(cors_layer(&[]))
            .app_data(web::Data::from(store))
            .configure(|cfg| configure_app(cfg, None)),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/api/v1/user/alice")
        .insert_header((header::ORIGIN, "http://localhost:3000"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 200);
    assert!(
        resp.headers()
            .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN)
    );
}

#[actix_rt::test]
async fn test_cors_configured_origin_allowed() {
    let store: Arc<dyn UserStore> = Arc::new(InMemoryUserStore::new());
    let origins = vec!["https://users.example.org".to_string()];
    let app = test::init_service(
        App::new()
            .wrap(cors_layer(&origins))
            .app_data(web::Data::from(store))
            .configure(|cfg| configure_app(cfg, None)),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/api/v1/users?users=alice")
        .insert_header((header::ORIGIN, "https://users.example.org"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 200);
    assert_eq!(
        resp.headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .and_then(|v| v.to_str().ok()),
        Some("https://users.example.org")
    );
}
