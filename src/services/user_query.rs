//! Read side: look up stored user records by username.

use crate::error::AppResult;
use crate::models::UserRecord;
use crate::services::user_store::UserStore;

/// Stored record for exactly `username`, if it was ever synchronized.
pub async fn get_user(store: &dyn UserStore, username: &str) -> AppResult<Option<UserRecord>> {
    store.find_one(username).await
}

/// Records for each candidate in input order. Unknown usernames are left
/// out; empty candidates are skipped without a lookup.
pub async fn get_users<S: AsRef<str>>(
    store: &dyn UserStore,
    usernames: &[S],
) -> AppResult<Vec<UserRecord>> {
    let mut result = Vec::with_capacity(usernames.len());

    for username in usernames.iter().map(AsRef::as_ref) {
        if username.is_empty() {
            continue;
        }
        if let Some(record) = get_user(store, username).await? {
            result.push(record);
        }
    }

    Ok(result)
}
