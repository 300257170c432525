//! Application configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;

use secrecy::{ExposeSecret, SecretString};


/// Development default values - NEVER use in production.
pub mod defaults {
    pub const DEV_HOST: &str = "127.0.0.1";
    pub const DEV_PORT: u16 = 8080;
    pub const DEV_DB_HOST: &str = "localhost";
    pub const DEV_DB_PORT: u16 = 5432;
    pub const DEV_DB_NAME: &str = "github";
    pub const DEV_DB_USER: &str = "github";
    pub const DEV_DB_PASSWORD: &str = "github";
    pub const DB_MAX_CONNECTIONS: u32 = 10;
    pub const DB_MIN_CONNECTIONS: u32 = 1;

    pub const GITHUB_API_URL: &str = "https://api.github.com";
    pub const HTTP_TIMEOUT_SECS: u64 = 10;
}

/// Runtime environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    /// Parse environment from string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Some(Self::Development),
            "production" | "prod" => Some(Self::Production),
            _ => None,
        }
    }

    /// Check if this is a development environment.
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }

    /// Check if this is a production environment.
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
        }
    }
}

/// PostgreSQL connection settings.
#[derive(Debug, Clone)]
pub struct DatabaseSettings {
    /// Full connection URL. Assembled from the individual parts when
    /// `GHU_DATABASE_URL` is not set.
    pub url: SecretString,
    /// Whether the credentials came from development defaults.
    pub uses_dev_credentials: bool,
    pub max_connections: u32,
    pub min_connections: u32,
}

/// GitHub REST API client settings.
#[derive(Debug, Clone)]
pub struct GitHubSettings {
    /// Base URL without trailing slash (overridable for GitHub Enterprise or tests)
    pub api_url: String,
    /// Optional token; raises the unauthenticated rate limit
    pub token: Option<SecretString>,
    /// Total per-request timeout in seconds
    pub timeout_secs: u64,
}

/// Periodic synchronization settings. Disabled when `interval_secs` is 0
/// or `usernames` is empty.
#[derive(Debug, Clone, Default)]
pub struct SyncSettings {
    pub usernames: Vec<String>,
    pub interval_secs: u64,
}

impl SyncSettings {
    pub fn is_enabled(&self) -> bool {
        self.interval_secs > 0 && !self.usernames.is_empty()
    }
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Runtime environment
    pub environment: Environment,
    /// Server host address
    pub host: String,
    /// Server port
    pub port: u16,
    /// Database connection settings
    pub database: DatabaseSettings,
    /// Directory holding the prebuilt client bundle
    pub static_dir: Option<PathBuf>,
    /// Allowed CORS origins; empty means any origin
    pub cors_origins: Vec<String>,
    /// GitHub API settings
    pub github: GitHubSettings,
    /// Periodic synchronization settings
    pub sync: SyncSettings,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// In development mode (RUST_ENV=development) every variable has a default.
    /// In production mode (RUST_ENV=production) database credentials are required
    /// and must not match the development defaults.
    ///
    /// Environment variables:
    /// - `RUST_ENV`: Environment (development/production) - REQUIRED
    /// - `GHU_HOST`, `GHU_PORT`: bind address (default: 127.0.0.1:8080)
    /// - `GHU_DATABASE_URL`: full PostgreSQL URL, overrides the parts below
    /// - `GHU_DB_HOST`, `GHU_DB_PORT`, `GHU_DB_NAME`: database location
    /// - `GHU_DB_USER`, `GHU_DB_PASSWORD`: database credentials
    /// - `GHU_DB_MAX_CONNECTIONS`, `GHU_DB_MIN_CONNECTIONS`: pool bounds
    /// - `GHU_STATIC_DIR`: prebuilt client bundle directory
    /// - `GHU_CORS_ORIGINS`: comma-separated allowed origins
    /// - `GITHUB_API_URL`: GitHub API base URL
    /// - `GITHUB_TOKEN`: optional GitHub token
    /// - `GHU_HTTP_TIMEOUT_SECS`: GitHub request timeout (default: 10)
    /// - `GHU_SYNC_USERNAMES`: comma-separated usernames for periodic sync
    /// - `GHU_SYNC_INTERVAL_SECS`: periodic sync interval, 0 disables (default: 0)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env_str = lookup("RUST_ENV").ok_or(ConfigError::MissingEnvVar("RUST_ENV"))?;
        let environment = Environment::parse(&env_str).ok_or(ConfigError::InvalidValue(
            "RUST_ENV must be 'development' or 'production'",
        ))?;

        let host = lookup("GHU_HOST").unwrap_or_else(|| defaults::DEV_HOST.to_string());
        let port = parse_or(
            &lookup,
            "GHU_PORT",
            defaults::DEV_PORT,
            "GHU_PORT must be a valid port number",
        )?;

        let database = Self::database_from_lookup(&lookup, environment)?;

        let static_dir = lookup("GHU_STATIC_DIR").map(PathBuf::from);
        let cors_origins = lookup("GHU_CORS_ORIGINS")
            .map(|s| split_csv(&s))
            .unwrap_or_default();

        let github = GitHubSettings {
            api_url: lookup("GITHUB_API_URL")
                .unwrap_or_else(|| defaults::GITHUB_API_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            token: lookup("GITHUB_TOKEN")
                .filter(|t| !t.is_empty())
                .map(SecretString::from),
            timeout_secs: parse_or(
                &lookup,
                "GHU_HTTP_TIMEOUT_SECS",
                defaults::HTTP_TIMEOUT_SECS,
                "GHU_HTTP_TIMEOUT_SECS must be a valid number",
            )?,
        };

        let sync = SyncSettings {
            usernames: lookup("GHU_SYNC_USERNAMES")
                .map(|s| split_csv(&s))
                .unwrap_or_default(),
            interval_secs: parse_or(
                &lookup,
                "GHU_SYNC_INTERVAL_SECS",
                0,
                "GHU_SYNC_INTERVAL_SECS must be a valid number",
            )?,
        };

        let config = Config {
            environment,
            host,
            port,
            database,
            static_dir,
            cors_origins,
            github,
            sync,
        };

        if environment.is_production() {
            config.validate_production()?;
        }

        Ok(config)
    }

    fn database_from_lookup<F>(
        lookup: &F,
        environment: Environment,
    ) -> Result<DatabaseSettings, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let max_connections = parse_or(
            lookup,
            "GHU_DB_MAX_CONNECTIONS",
            defaults::DB_MAX_CONNECTIONS,
            "GHU_DB_MAX_CONNECTIONS must be a valid number",
        )?;
        let min_connections = parse_or(
            lookup,
            "GHU_DB_MIN_CONNECTIONS",
            defaults::DB_MIN_CONNECTIONS,
            "GHU_DB_MIN_CONNECTIONS must be a valid number",
        )?;

        if let Some(url) = lookup("GHU_DATABASE_URL") {
            return Ok(DatabaseSettings {
                url: SecretString::from(url),
                uses_dev_credentials: false,
                max_connections,
                min_connections,
            });
        }

        let (user, password) = match (lookup("GHU_DB_USER"), lookup("GHU_DB_PASSWORD")) {
            (Some(user), Some(password)) => (user, password),
            (user, password) if environment.is_development() => (
                user.unwrap_or_else(|| defaults::DEV_DB_USER.to_string()),
                password.unwrap_or_else(|| defaults::DEV_DB_PASSWORD.to_string()),
            ),
            (None, _) => return Err(ConfigError::MissingEnvVar("GHU_DB_USER")),
            (_, None) => return Err(ConfigError::MissingEnvVar("GHU_DB_PASSWORD")),
        };

        let uses_dev_credentials =
            user == defaults::DEV_DB_USER && password == defaults::DEV_DB_PASSWORD;

        let host = lookup("GHU_DB_HOST").unwrap_or_else(|| defaults::DEV_DB_HOST.to_string());
        let port = parse_or(
            lookup,
            "GHU_DB_PORT",
            defaults::DEV_DB_PORT,
            "GHU_DB_PORT must be a valid port number",
        )?;
        let name = lookup("GHU_DB_NAME").unwrap_or_else(|| defaults::DEV_DB_NAME.to_string());

        let url = format!(
            "postgres://{}:{}@{}:{}/{}",
            urlencoding::encode(&user),
            urlencoding::encode(&password),
            host,
            port,
            name
        );

        Ok(DatabaseSettings {
            url: SecretString::from(url),
            uses_dev_credentials,
            max_connections,
            min_connections,
        })
    }

    /// Validate that production configuration does not use development defaults.
    fn validate_production(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if self.database.uses_dev_credentials {
            errors.push(
                "GHU_DB_USER/GHU_DB_PASSWORD are using development defaults. Set production credentials."
                    .to_string(),
            );
        }

        if self.database.min_connections > self.database.max_connections {
            errors.push(format!(
                "GHU_DB_MIN_CONNECTIONS ({}) exceeds GHU_DB_MAX_CONNECTIONS ({})",
                self.database.min_connections, self.database.max_connections
            ));
        }

        if self.github.timeout_secs == 0 {
            errors.push("GHU_HTTP_TIMEOUT_SECS must be greater than zero".to_string());
        }

        if !errors.is_empty() {
            return Err(ConfigError::ProductionValidation(errors));
        }

        Ok(())
    }

    /// Get the server bind address.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Check if running in development mode.
    pub fn is_development(&self) -> bool {
        self.environment.is_development()
    }

    /// Database URL, for handing to the connection pool.
    pub fn database_url(&self) -> &str {
        self.database.url.expose_secret()
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T, message: &'static str) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse::<T>().map_err(|_| ConfigError::InvalidValue(message)),
        None => Ok(default),
    }
}

/// Split a comma-separated list, trimming whitespace around each entry and
/// dropping empty entries (e.g. from a trailing comma).
///
/// Shared by origin lists and username lists; `" alice ,"` yields `["alice"]`.
pub fn split_csv(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(&'static str),

    #[error("Invalid configuration value: {0}")]
    InvalidValue(&'static str),

    #[error("Production configuration validation failed:\n{}", .0.iter().map(|e| format!("  - {}", e)).collect::<Vec<_>>().join("\n"))]
    ProductionValidation(Vec<String>),
}
