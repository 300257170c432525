//! API endpoint modules.

pub mod health;
pub mod openapi;
pub mod users;

pub use health::configure_health_routes;
pub use openapi::ApiDoc;
pub use users::configure_routes as configure_user_routes;
