//! CLI tool to synchronize GitHub users into the database.
//!
//! Usage:
//!   cargo run --bin sync-users -- octocat,torvalds

use std::env;
use std::sync::Arc;

use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use github_users_lib::config::{Config, split_csv};
use github_users_lib::db::DbPool;
use github_users_lib::services::{GitHubClient, Synchronizer};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");

    let args: Vec<String> = env::args().collect();

    if args.len() != 2 || matches!(args[1].as_str(), "help" | "--help" | "-h") {
        print_usage();
        std::process::exit(if args.len() == 2 { 0 } else { 1 });
    }

    let usernames = split_csv(&args[1]);
    if usernames.is_empty() {
        eprintln!("Error: no usernames given");
        print_usage();
        std::process::exit(1);
    }

    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error loading config: {}", e);
            std::process::exit(1);
        }
    };

    let pool = match DbPool::new(&config).await {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Error connecting to database: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = pool.run_migrations().await {
        eprintln!("Error running migrations: {}", e);
        std::process::exit(1);
    }

    let github = match GitHubClient::new(&config.github) {
        Ok(g) => g,
        Err(e) => {
            eprintln!("Error creating GitHub client: {}", e);
            std::process::exit(1);
        }
    };

    let synchronizer = Synchronizer::new(github, Arc::new(pool));

    match synchronizer.synchronize(&usernames).await {
        Ok(summary) => {
            println!();
            println!("{:<10} {}", "inserted", summary.inserted.join(", "));
            println!("{:<10} {}", "updated", summary.updated.join(", "));
            println!("{:<10} {}", "skipped", summary.skipped.join(", "));
            println!();
        }
        Err(e) => {
            eprintln!("Synchronization aborted: {}", e);
            std::process::exit(1);
        }
    }
}

fn print_usage() {
    eprintln!();
    eprintln!("Usage: sync-users <username>[,<username>...]");
    eprintln!();
    eprintln!("Fetches each user's GitHub profile and public repositories and");
    eprintln!("stores them, replacing any previous data for that user.");
    eprintln!("Users GitHub fails to return are skipped.");
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  sync-users octocat");
    eprintln!("  sync-users octocat,torvalds,gvanrossum");
    eprintln!();
}
