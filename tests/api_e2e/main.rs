//! E2E test suite.
//!
//! Exercises synchronization against a mock GitHub API and the read API
//! over an in-memory store. No database or network access required.
//!
//! Run with: cargo test --test api_e2e


mod test_static;
mod test_sync;
mod test_sync_task;
