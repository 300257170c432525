//! Business logic services.

pub mod github_api;
pub mod sync_task;
pub mod synchronizer;
pub mod user_query;
pub mod user_store;

pub use github_api::{FetchError, GitHubClient};
pub use sync_task::start_sync_task;
pub use synchronizer::{SyncOutcome, SyncSummary, Synchronizer};
pub use user_store::{InMemoryUserStore, UserStore};
