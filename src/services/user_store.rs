//! Storage abstraction for user records.
//!
//! The synchronizer and the read API only talk to `UserStore`; the server
//! wires in the PostgreSQL pool, tests wire in `InMemoryUserStore`.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::db::{DbPool, user_repos};
use crate::error::{AppError, AppResult};
use crate::models::UserRecord;

/// Key-value access to user records, keyed by username.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Look up the record for `username`. `None` means never synchronized.
    async fn find_one(&self, username: &str) -> AppResult<Option<UserRecord>>;

    /// Replace-or-insert the record for `record.username`, atomically.
    async fn upsert(&self, record: &UserRecord) -> AppResult<()>;

    /// Check that the backing storage is reachable.
    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}

#[async_trait]
impl UserStore for DbPool {
    async fn find_one(&self, username: &str) -> AppResult<Option<UserRecord>> {
        user_repos::find_by_username(self.connection(), username).await
    }

    async fn upsert(&self, record: &UserRecord) -> AppResult<()> {
        user_repos::upsert(self.connection(), record).await
    }

    async fn ping(&self) -> AppResult<()> {
        DbPool::ping(self).await
    }
}

/// Process-local store. Records every lookup so callers can assert on them.
#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    records: Mutex<HashMap<String, UserRecord>>,
    lookups: Mutex<Vec<String>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a record without going through `upsert`.
    pub fn with_record(self, record: UserRecord) -> Self {
        if let Ok(mut records) = self.records.lock() {
            records.insert(record.username.clone(), record);
        }
        self
    }

    /// Usernames passed to `find_one`, in call order.
    pub fn lookups(&self) -> Vec<String> {
        self.lookups.lock().map(|l| l.clone()).unwrap_or_default()
    }

    /// Current record for `username`, without recording a lookup.
    pub fn get(&self, username: &str) -> Option<UserRecord> {
        self.records
            .lock()
            .ok()
            .and_then(|records| records.get(username).cloned())
    }

    pub fn len(&self) -> usize {
        self.records.lock().map(|r| r.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn poisoned<T>(_: std::sync::PoisonError<T>) -> AppError {
    AppError::Internal("in-memory store lock poisoned".to_string())
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn find_one(&self, username: &str) -> AppResult<Option<UserRecord>> {
        self.lookups.lock().map_err(poisoned)?.push(username.to_string());
        Ok(self.records.lock().map_err(poisoned)?.get(username).cloned())
    }

    async fn upsert(&self, record: &UserRecord) -> AppResult<()> {
        self.records
            .lock()
            .map_err(poisoned)?
            .insert(record.username.clone(), record.clone());
        Ok(())
    }
}
