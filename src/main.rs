//! GitHub users server - main entry point.
//!
//! Starts the Actix-web server with configured routes and middleware.

use std::sync::Arc;

use actix_web::{App, HttpServer, web};
use tracing::{Level, error, info, warn};
use tracing_subscriber::FmtSubscriber;

use github_users_lib::app::{configure_app, cors_layer};
use github_users_lib::config::Config;
use github_users_lib::db::DbPool;
use github_users_lib::middleware::RequestLogger;
use github_users_lib::services::{self, GitHubClient, Synchronizer, UserStore};

/// Perform health check (for Docker healthcheck).
fn health_check() -> bool {
    // Simple check - just verify we can load config
    Config::from_env().is_ok()
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Check for --health-check flag (used by Docker HEALTHCHECK)
    if std::env::args().any(|arg| arg == "--health-check") {
        std::process::exit(if health_check() { 0 } else { 1 });
    }

    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");

    // Load configuration
    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            error!("");
            error!("Please check your environment variables:");
            error!("  - RUST_ENV must be set to 'development' or 'production'");
            error!("  - In production, GHU_DB_USER and GHU_DB_PASSWORD (or GHU_DATABASE_URL) must be set");
            std::process::exit(1);
        }
    };

    info!("========================================");
    info!("  GitHub Users Server");
    info!("  Environment: {}", config.environment);
    info!("========================================");

    if config.is_development() {
        warn!("Running in DEVELOPMENT mode - do not use in production!");
    }

    let pool = match DbPool::new(&config).await {
        Ok(pool) => pool,
        Err(e) => {
            error!("Failed to connect to database: {}", e);
            std::process::exit(1);
        }
    };
    info!("Database connection established");

    if let Err(e) = pool.run_migrations().await {
        error!("Failed to run migrations: {}", e);
        std::process::exit(1);
    }
    info!("Database migrations complete");

    let store: Arc<dyn UserStore> = Arc::new(pool);

    if config.sync.is_enabled() {
        match GitHubClient::new(&config.github) {
            Ok(github) => {
                let synchronizer = Arc::new(Synchronizer::new(github, store.clone()));
                services::start_sync_task(synchronizer, config.sync.clone());
            }
            Err(e) => error!("Periodic sync disabled: {}", e),
        }
    }

    let bind_address = config.bind_address();
    let static_dir = config.static_dir.clone();
    let cors_origins = config.cors_origins.clone();

    match &static_dir {
        Some(dir) => info!("Serving client bundle from {:?}", dir),
        None => info!("GHU_STATIC_DIR not set, client bundle will not be served"),
    }

    let worker_count = if config.is_development() {
        4
    } else {
        num_cpus::get()
    };
    info!(
        "Starting server at http://{} ({} workers)",
        bind_address, worker_count
    );

    HttpServer::new(move || {
        App::new()
            .wrap(RequestLogger)
            // Wrapped last so it sees requests first and answers preflights
            .wrap(cors_layer(&cors_origins))
            .app_data(web::Data::from(store.clone()))
            .configure(|cfg| configure_app(cfg, static_dir.clone()))
    })
    .workers(worker_count)
    .bind(&bind_address)?
    .run()
    .await
}
