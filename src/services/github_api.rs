//! GitHub REST API client used by the synchronizer.
//!
//! Two read-only lookups per user: the profile and the public repository
//! list. Failures are reported as `FetchError` so the caller can decide to
//! skip the user rather than abort.

use std::time::Duration;

use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::GitHubSettings;
use crate::error::{AppError, AppResult};
use crate::models::{GitHubProfile, GitHubRepository};

/// HTTP connect timeout for GitHub API calls.
const HTTP_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
/// GitHub rejects requests without a User-Agent.
const USER_AGENT: &str = concat!("github-users-server/", env!("CARGO_PKG_VERSION"));
/// Largest page size GitHub accepts for the repository listing.
const REPOS_PER_PAGE: u32 = 100;

/// Why a single GitHub lookup failed.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// Connection, DNS, TLS or timeout failure
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// GitHub answered with a non-success status
    #[error("GitHub returned status {status} for {url}")]
    Status { url: String, status: u16 },

    /// The response body did not have the expected shape
    #[error("unexpected response body from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

/// Thin wrapper around a configured `reqwest::Client`.
#[derive(Clone, Debug)]
pub struct GitHubClient {
    http: reqwest::Client,
    api_url: String,
}

impl GitHubClient {
    /// Build a client with timeouts, default headers and optional token auth.
    pub fn new(settings: &GitHubSettings) -> AppResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        if let Some(token) = &settings.token {
            headers.insert(AUTHORIZATION, bearer(token)?);
        }

        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .connect_timeout(HTTP_CONNECT_TIMEOUT)
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build GitHub client: {}", e)))?;

        Ok(Self {
            http,
            api_url: settings.api_url.trim_end_matches('/').to_string(),
        })
    }

    /// `GET /users/{username}/repos` (first page, in GitHub's order).
    pub async fn list_repositories(
        &self,
        username: &str,
    ) -> Result<Vec<GitHubRepository>, FetchError> {
        let url = format!(
            "{}/users/{}/repos?per_page={}",
            self.api_url,
            urlencoding::encode(username),
            REPOS_PER_PAGE
        );
        self.get_json(url).await
    }

    /// `GET /users/{username}`.
    pub async fn get_profile(&self, username: &str) -> Result<GitHubProfile, FetchError> {
        let url = format!("{}/users/{}", self.api_url, urlencoding::encode(username));
        self.get_json(url).await
    }

    async fn get_json<T: DeserializeOwned>(&self, url: String) -> Result<T, FetchError> {
        debug!("GET {}", url);

        let response = match self.http.get(&url).send().await {
            Ok(response) => response,
            Err(source) => return Err(FetchError::Transport { url, source }),
        };

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url,
                status: status.as_u16(),
            });
        }

        match response.json::<T>().await {
            Ok(body) => Ok(body),
            Err(source) => Err(FetchError::Decode { url, source }),
        }
    }
}

fn bearer(token: &SecretString) -> AppResult<HeaderValue> {
    let mut value = HeaderValue::from_str(&format!("Bearer {}", token.expose_secret()))
        .map_err(|_| AppError::Internal("GITHUB_TOKEN is not a valid header value".to_string()))?;
    value.set_sensitive(true);
    Ok(value)
}
