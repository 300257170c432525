//! GitHub REST API payloads.
//!
//! Only the fields the normalized record needs are declared; serde ignores
//! everything else GitHub sends.

use serde::Deserialize;

/// Profile returned by `GET /users/{username}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GitHubProfile {
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
}

/// One entry of `GET /users/{username}/repos`.
#[derive(Debug, Clone, Deserialize)]
pub struct GitHubRepository {
    pub name: String,
    pub html_url: String,
    #[serde(default)]
    pub description: Option<String>,
}
