//! E2E tests: synchronization against the mock GitHub API.

use github_users_lib::config::GitHubSettings;
use github_users_lib::services::{GitHubClient, InMemoryUserStore, Synchronizer, UserStore};
use secrecy::SecretString;
use serde_json::json;
use std::sync::Arc;

use super::mock_github::MockGitHub;
use super::test_helpers::*;

#[actix_rt::test]
async fn test_first_sync_inserts_second_updates() {
    let mock = MockGitHub::start().await;
    mock.add_user("alice", &["dotfiles", "blog"]);
    let store = Arc::new(InMemoryUserStore::new());
    let sync = synchronizer(&mock, store.clone());

    let first = sync.synchronize(&["alice"]).await.unwrap();
    assert_eq!(first.inserted, vec!["alice"]);
    let after_first = store.get("alice").unwrap();

    let second = sync.synchronize(&["alice"]).await.unwrap();
    assert_eq!(second.updated, vec!["alice"]);
    assert!(second.inserted.is_empty());

    // Unchanged remote data leaves an identical record.
    assert_eq!(store.get("alice").unwrap(), after_first);
    assert_eq!(after_first, expected_record("alice", &["dotfiles", "blog"]));
}

#[actix_rt::test]
async fn test_resync_replaces_repository_list() {
    let mock = MockGitHub::start().await;
    mock.add_user("alice", &["r1", "r2"]);
    let store = Arc::new(InMemoryUserStore::new());
    let sync = synchronizer(&mock, store.clone());

    sync.synchronize(&["alice"]).await.unwrap();
    mock.add_user("alice", &["r3"]);
    sync.synchronize(&["alice"]).await.unwrap();

    let stored = store.get("alice").unwrap();
    let names: Vec<_> = stored
        .repository_information
        .iter()
        .map(|r| r.repo_name.as_str())
        .collect();
    assert_eq!(names, vec!["r3"]);
}

#[actix_rt::test]
async fn test_failing_user_does_not_abort_batch() {
    let mock = MockGitHub::start().await;
    mock.add_user("alice", &["a"]);
    mock.add_user("bob", &["b"]);
    mock.fail_user("bad-user", 404);

    let prior = expected_record("bad-user", &["old"]);
    let store = Arc::new(InMemoryUserStore::new().with_record(prior.clone()));
    let sync = synchronizer(&mock, store.clone());

    let summary = sync
        .synchronize(&["alice", "bad-user", "bob"])
        .await
        .unwrap();

    assert_eq!(summary.inserted, vec!["alice", "bob"]);
    assert_eq!(summary.skipped, vec!["bad-user"]);
    assert_eq!(store.get("alice").unwrap(), expected_record("alice", &["a"]));
    assert_eq!(store.get("bob").unwrap(), expected_record("bob", &["b"]));
    assert_eq!(store.get("bad-user").unwrap(), prior);
}

#[actix_rt::test]
async fn test_rate_limited_user_is_skipped_like_any_other_status() {
    let mock = MockGitHub::start().await;
    mock.fail_user("alice", 403);
    let store = Arc::new(InMemoryUserStore::new());
    let sync = synchronizer(&mock, store.clone());

    let summary = sync.synchronize(&["alice"]).await.unwrap();

    assert_eq!(summary.skipped, vec!["alice"]);
    assert!(store.get("alice").is_none());
}

#[actix_rt::test]
async fn test_unknown_user_is_skipped() {
    let mock = MockGitHub::start().await;
    let store = Arc::new(InMemoryUserStore::new());
    let sync = synchronizer(&mock, store.clone());

    let summary = sync.synchronize(&["nobody"]).await.unwrap();

    assert_eq!(summary.skipped, vec!["nobody"]);
    assert!(store.is_empty());
}

#[actix_rt::test]
async fn test_malformed_payload_is_skipped() {
    let mock = MockGitHub::start().await;
    mock.add_user("alice", &["a"]);
    mock.add_user("carol", &["c"]);
    mock.break_repos("alice");
    let store = Arc::new(InMemoryUserStore::new());
    let sync = synchronizer(&mock, store.clone());

    let summary = sync.synchronize(&["alice", "carol"]).await.unwrap();

    assert_eq!(summary.skipped, vec!["alice"]);
    assert_eq!(summary.inserted, vec!["carol"]);
}

#[actix_rt::test]
async fn test_extra_remote_fields_are_not_persisted() {
    let mock = MockGitHub::start().await;
    mock.set_profile("alice", json!({ "login": "alice", "name": null, "bio": "hi" }));
    mock.set_repos(
        "alice",
        json!([{
            "name": "stars",
            "html_url": "https://github.com/alice/stars",
            "description": null,
            "stargazers_count": 99,
            "topics": ["rust"]
        }]),
    );
    let store = Arc::new(InMemoryUserStore::new());
    let sync = synchronizer(&mock, store.clone());

    sync.synchronize(&["alice"]).await.unwrap();

    let stored = serde_json::to_value(store.get("alice").unwrap()).unwrap();
    assert_eq!(
        stored,
        json!({
            "username": "alice",
            "userInformation": { "avatarUrl": null, "name": null, "location": null },
            "repositoryInformation": [{
                "repoName": "stars",
                "repoHtmlUrl": "https://github.com/alice/stars",
                "repoDescription": null
            }]
        })
    );
}

#[actix_rt::test]
async fn test_empty_usernames_make_no_requests() {
    let mock = MockGitHub::start().await;
    let store = Arc::new(InMemoryUserStore::new());
    let sync = synchronizer(&mock, store.clone());

    let summary = sync.synchronize(&["", ""]).await.unwrap();

    assert_eq!(summary.synced() + summary.skipped.len(), 0);
    assert!(mock.requests().is_empty());
}

#[actix_rt::test]
async fn test_both_endpoints_requested_per_user() {
    let mock = MockGitHub::start().await;
    mock.add_user("alice", &[]);
    let store = Arc::new(InMemoryUserStore::new());
    let sync = synchronizer(&mock, store.clone());

    sync.synchronize(&["alice"]).await.unwrap();

    let mut requests = mock.requests();
    requests.sort();
    assert_eq!(requests, vec!["/users/alice", "/users/alice/repos"]);
    assert!(
        mock.last_header("user-agent")
            .is_some_and(|ua| ua.starts_with("github-users-server/"))
    );
    assert_eq!(
        mock.last_header("accept").as_deref(),
        Some("application/vnd.github+json")
    );
    assert!(mock.last_header("authorization").is_none());
}

#[actix_rt::test]
async fn test_token_is_sent_as_bearer() {
    let mock = MockGitHub::start().await;
    mock.add_user("alice", &[]);
    let settings = GitHubSettings {
        token: Some(SecretString::from("ghp_secret".to_string())),
        ..mock.settings()
    };
    let client = GitHubClient::new(&settings).unwrap();
    let store: Arc<dyn UserStore> = Arc::new(InMemoryUserStore::new());

    Synchronizer::new(client, store)
        .synchronize(&["alice"])
        .await
        .unwrap();

    assert_eq!(
        mock.last_header("authorization").as_deref(),
        Some("Bearer ghp_secret")
    );
}

#[actix_rt::test]
async fn test_storage_failure_aborts_run() {
    let mock = MockGitHub::start().await;
    mock.add_user("alice", &["a"]);
    let sync = synchronizer(&mock, Arc::new(FailingStore));

    let result = sync.synchronize(&["alice"]).await;

    assert!(result.is_err());
}
