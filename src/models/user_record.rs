//! Normalized user record stored per GitHub username.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::github::{GitHubProfile, GitHubRepository};

/// The persisted unit: one per username, replaced wholesale on every sync.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub username: String,
    pub user_information: UserInformation,
    pub repository_information: Vec<RepositoryInformation>,
}

/// Profile fields copied from the GitHub user endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserInformation {
    pub avatar_url: Option<String>,
    pub name: Option<String>,
    pub location: Option<String>,
}

/// One public repository, projected down to the fields the client renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryInformation {
    pub repo_name: String,
    pub repo_html_url: String,
    pub repo_description: Option<String>,
}

impl From<GitHubProfile> for UserInformation {
    fn from(profile: GitHubProfile) -> Self {
        Self {
            avatar_url: profile.avatar_url,
            name: profile.name,
            location: profile.location,
        }
    }
}

impl From<GitHubRepository> for RepositoryInformation {
    fn from(repo: GitHubRepository) -> Self {
        Self {
            repo_name: repo.name,
            repo_html_url: repo.html_url,
            repo_description: repo.description,
        }
    }
}

impl UserRecord {
    /// Build the normalized record from the two GitHub responses.
    ///
    /// Repository order is kept as GitHub returned it.
    pub fn from_github(
        username: &str,
        profile: GitHubProfile,
        repositories: Vec<GitHubRepository>,
    ) -> Self {
        Self {
            username: username.to_string(),
            user_information: profile.into(),
            repository_information: repositories.into_iter().map(Into::into).collect(),
        }
    }
}
