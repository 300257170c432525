//! Synchronization of GitHub profiles and repository lists into storage.
//!
//! Usernames are processed one at a time. A GitHub failure for one user is
//! logged and that user is skipped; only storage failures end the run.

use std::sync::Arc;

use tracing::{error, info, warn};

use crate::error::AppResult;
use crate::models::UserRecord;
use crate::services::github_api::{FetchError, GitHubClient};
use crate::services::user_store::UserStore;

/// What happened to a single username during a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    Inserted,
    Updated,
    Skipped,
}

/// Usernames grouped by outcome, in processing order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SyncSummary {
    pub inserted: Vec<String>,
    pub updated: Vec<String>,
    pub skipped: Vec<String>,
}

impl SyncSummary {
    /// Number of usernames whose record was written.
    pub fn synced(&self) -> usize {
        self.inserted.len() + self.updated.len()
    }
}

/// Fetches from GitHub and upserts into the injected store.
pub struct Synchronizer {
    github: GitHubClient,
    store: Arc<dyn UserStore>,
}

impl Synchronizer {
    pub fn new(github: GitHubClient, store: Arc<dyn UserStore>) -> Self {
        Self { github, store }
    }

    /// Run one synchronization over `usernames`, in order.
    ///
    /// Empty usernames are ignored. Returns early only when storage fails.
    pub async fn synchronize<S: AsRef<str>>(&self, usernames: &[S]) -> AppResult<SyncSummary> {
        let mut summary = SyncSummary::default();

        for username in usernames.iter().map(AsRef::as_ref) {
            if username.is_empty() {
                continue;
            }

            match self.sync_user(username).await? {
                SyncOutcome::Inserted => summary.inserted.push(username.to_string()),
                SyncOutcome::Updated => summary.updated.push(username.to_string()),
                SyncOutcome::Skipped => summary.skipped.push(username.to_string()),
            }
        }

        info!(
            "Synchronization finished: {} inserted, {} updated, {} skipped",
            summary.inserted.len(),
            summary.updated.len(),
            summary.skipped.len()
        );

        Ok(summary)
    }

    /// Fetch, normalize and store a single user.
    pub async fn sync_user(&self, username: &str) -> AppResult<SyncOutcome> {
        let (repositories, profile) = tokio::join!(
            self.github.list_repositories(username),
            self.github.get_profile(username)
        );

        let (repositories, profile) = match (repositories, profile) {
            (Ok(repositories), Ok(profile)) => (repositories, profile),
            (Err(e), _) | (_, Err(e)) => {
                log_skip(username, &e);
                return Ok(SyncOutcome::Skipped);
            }
        };

        let record = UserRecord::from_github(username, profile, repositories);

        // Only decides the log line; the upsert below is what counts.
        let existed = self.store.find_one(username).await?.is_some();

        self.store.upsert(&record).await?;

        if existed {
            info!(
                "Updated repository and user information for username = {}",
                username
            );
            Ok(SyncOutcome::Updated)
        } else {
            info!("Inserted new data for username = {}", username);
            Ok(SyncOutcome::Inserted)
        }
    }
}

fn log_skip(username: &str, err: &FetchError) {
    match err {
        FetchError::Status { status, .. } => {
            warn!(
                "GitHub returned a status code of {}, skipping user {}",
                status, username
            );
        }
        FetchError::Transport { .. } => {
            warn!("Failed to fetch data from GitHub for {}: {}", username, err);
        }
        FetchError::Decode { .. } => {
            error!("Skipping user {}: {}", username, err);
        }
    }
}
