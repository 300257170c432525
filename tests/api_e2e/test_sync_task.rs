//! E2E tests: the periodic sync task against the mock GitHub API.

use github_users_lib::config::SyncSettings;
use github_users_lib::services::{InMemoryUserStore, start_sync_task};
use std::sync::Arc;

use super::mock_github::MockGitHub;
use super::test_helpers::*;

fn settings(usernames: &[&str], interval_secs: u64) -> SyncSettings {
    SyncSettings {
        usernames: usernames.iter().map(|u| u.to_string()).collect(),
        interval_secs,
    }
}

#[actix_rt::test]
async fn test_first_run_does_not_wait_for_interval() {
    let mock = MockGitHub::start().await;
    mock.add_user("alice", &["dotfiles"]);
    let store = Arc::new(InMemoryUserStore::new());
    let sync = Arc::new(synchronizer(&mock, store.clone()));

    let task = start_sync_task(sync, settings(&["alice"], 3600));
    let stored = wait_until(|| store.get("alice").is_some()).await;
    task.abort();

    assert!(stored, "first run did not happen before the hour-long interval");
    assert_eq!(
        store.get("alice").unwrap(),
        expected_record("alice", &["dotfiles"])
    );
    assert_eq!(mock.requests().len(), 2);
}

#[actix_rt::test]
async fn test_failed_run_does_not_stop_later_runs() {
    let mock = MockGitHub::start().await;
    mock.add_user("alice", &["dotfiles"]);
    let sync = Arc::new(synchronizer(&mock, Arc::new(FailingStore)));

    let task = start_sync_task(sync, settings(&["alice"], 1));
    let second_run = wait_until(|| mock.requests().len() >= 4).await;
    task.abort();

    assert!(second_run, "no GitHub requests after the first failed run");
    let profile_requests = mock
        .requests()
        .iter()
        .filter(|path| path.as_str() == "/users/alice")
        .count();
    assert!(profile_requests >= 2);
}
