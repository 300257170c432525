//! Domain models for the GitHub users server.

pub mod github;
pub mod user_record;

pub use github::{GitHubProfile, GitHubRepository};
pub use user_record::{RepositoryInformation, UserInformation, UserRecord};
