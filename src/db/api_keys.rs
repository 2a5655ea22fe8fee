//! Database operations for API keys using SeaORM.

use chrono::{DateTime, Utc};
use sea_orm::*;
use uuid::Uuid;

use crate::entity::api_key;
use crate::error::AppResult;
use crate::models::UserRole;

/// Insert a new API key.
pub async fn insert_api_key(
    db: &DatabaseConnection,
    id: Uuid,
    key_hash: &str,
    key_prefix: &str,
    name: &str,
    role: UserRole,
    expires_at: Option<DateTime<Utc>>,
) -> AppResult<api_key::Model> {
    let model = api_key::ActiveModel {
        id: Set(id),
        key_hash: Set(key_hash.to_string()),
        key_prefix: Set(key_prefix.to_string()),
        name: Set(name.to_string()),
        role: Set(role.as_str().to_string()),
        expires_at: Set(expires_at),
        last_used_at: Set(None),
        created_at: Set(Utc::now()),
        deleted_at: Set(None),
    };

    let result = model.insert(db).await?;

    Ok(result)
}

/// Find an API key by its hash.
pub async fn find_by_hash(
    db: &DatabaseConnection,
    key_hash: &str,
) -> AppResult<Option<api_key::Model>> {
    let result = api_key::Entity::find()
        .filter(api_key::Column::KeyHash.eq(key_hash))
        .one(db)
        .await?;

    Ok(result)
}

/// Find an API key by ID.
pub async fn find_by_id(db: &DatabaseConnection, id: Uuid) -> AppResult<Option<api_key::Model>> {
    let result = api_key::Entity::find_by_id(id).one(db).await?;

    Ok(result)
}

/// Update last used timestamp.
pub async fn update_last_used(db: &DatabaseConnection, id: Uuid) -> AppResult<()> {
    let model = api_key::Entity::find_by_id(id).one(db).await?;

    if let Some(m) = model {
        let mut active: api_key::ActiveModel = m.into();
        active.last_used_at = Set(Some(Utc::now()));
        active.update(db).await?;
    }

    Ok(())
}

/// List all API keys (including revoked).
pub async fn list_all(db: &DatabaseConnection) -> AppResult<Vec<api_key::Model>> {
    let results = api_key::Entity::find()
        .order_by_desc(api_key::Column::CreatedAt)
        .all(db)
        .await?;

    Ok(results)
}

/// Revoke an API key (soft delete).
pub async fn revoke(db: &DatabaseConnection, id: Uuid) -> AppResult<bool> {
    let model = api_key::Entity::find_by_id(id).one(db).await?;

    if let Some(m) = model {
        if m.deleted_at.is_some() {
            return Ok(false); // Already revoked
        }
        let mut active: api_key::ActiveModel = m.into();
        active.deleted_at = Set(Some(Utc::now()));
        active.update(db).await?;
        Ok(true)
    } else {
        Ok(false)
    }
}

/// Restore a revoked API key.
pub async fn restore(db: &DatabaseConnection, id: Uuid) -> AppResult<bool> {
    let model = api_key::Entity::find_by_id(id).one(db).await?;

    if let Some(m) = model {
        if m.deleted_at.is_none() {
            return Ok(false); // Not revoked
        }
        let mut active: api_key::ActiveModel = m.into();
        active.deleted_at = Set(None);
        active.update(db).await?;
        Ok(true)
    } else {
        Ok(false)
    }
}
