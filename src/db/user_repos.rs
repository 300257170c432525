//! Database operations for stored user records.

use chrono::Utc;
use sea_orm::sea_query::OnConflict;
use sea_orm::*;

use crate::entity::user_repo::{self, Column, Entity};
use crate::error::{AppError, AppResult};
use crate::models::UserRecord;

/// Find the record stored for `username` (exact, case-sensitive match).
pub async fn find_by_username(
    db: &DatabaseConnection,
    username: &str,
) -> AppResult<Option<UserRecord>> {
    let result = Entity::find()
        .filter(Column::Username.eq(username))
        .one(db)
        .await?;

    result.map(model_to_record).transpose()
}

/// Insert the record, or replace the profile and repository list of the
/// existing row for the same username in a single statement.
pub async fn upsert(db: &DatabaseConnection, record: &UserRecord) -> AppResult<()> {
    let now = Utc::now();
    let model = user_repo::ActiveModel {
        id: NotSet,
        username: Set(record.username.clone()),
        user_information: Set(to_json(&record.user_information)?),
        repository_information: Set(to_json(&record.repository_information)?),
        created_at: Set(now),
        updated_at: Set(now),
    };

    Entity::insert(model)
        .on_conflict(
            OnConflict::column(Column::Username)
                .update_columns([
                    Column::UserInformation,
                    Column::RepositoryInformation,
                    Column::UpdatedAt,
                ])
                .to_owned(),
        )
        .exec_without_returning(db)
        .await?;

    Ok(())
}

fn to_json<T: serde::Serialize>(value: &T) -> AppResult<serde_json::Value> {
    serde_json::to_value(value)
        .map_err(|e| AppError::Internal(format!("Failed to serialize user record: {}", e)))
}

/// Strip the storage id and timestamps, keeping only the domain fields.
fn model_to_record(m: user_repo::Model) -> AppResult<UserRecord> {
    let malformed = |e: serde_json::Error| {
        AppError::Database(format!(
            "Stored record for '{}' is malformed: {}",
            m.username, e
        ))
    };

    Ok(UserRecord {
        user_information: serde_json::from_value(m.user_information).map_err(malformed)?,
        repository_information: serde_json::from_value(m.repository_information)
            .map_err(malformed)?,
        username: m.username,
    })
}
