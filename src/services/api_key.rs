//! API Key service for generation, verification, and management.

use chrono::{DateTime, Duration, Utc};
use rand::RngExt;
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::db::{DbPool, api_keys as db};
use crate::entity::api_key;
use crate::error::{AppError, AppResult};
use crate::models::{AuthenticatedCaller, UserRole};

/// API key prefix.
const KEY_PREFIX: &str = "mld_";
/// Length of random part of the key.
const KEY_RANDOM_LENGTH: usize = 32;
/// Length of the key prefix stored for identification.
const KEY_PREFIX_LENGTH: usize = 8;

/// Storage material for a freshly generated key. The full key itself is
/// returned separately and shown to the user exactly once.
#[derive(Debug)]
pub struct GeneratedKey {
    pub id: Uuid,
    pub key_hash: String,
    pub key_prefix: String,
    pub expires_at: Option<DateTime<Utc>>,
}

/// Generate a new random API key.
pub fn generate_key(expires_in: Option<&str>) -> AppResult<(String, GeneratedKey)> {
    let random_part: String = rand::rng()
        .sample_iter(&rand::distr::Alphanumeric)
        .take(KEY_RANDOM_LENGTH)
        .map(char::from)
        .collect();

    let full_key = format!("{}{}", KEY_PREFIX, random_part);

    // Hash the key for storage
    let key_hash = hash_key(&full_key);

    // Extract prefix for identification (first 8 chars of full key)
    let key_prefix = full_key.chars().take(KEY_PREFIX_LENGTH).collect::<String>();

    let expires_at = expires_in.and_then(parse_duration).map(|d| Utc::now() + d);

    Ok((
        full_key,
        GeneratedKey {
            id: Uuid::new_v4(),
            key_hash,
            key_prefix,
            expires_at,
        },
    ))
}

/// Hash an API key using SHA-256.
pub fn hash_key(key: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(key.as_bytes());
    hex::encode(hasher.finalize())
}

/// Parse a duration string like "365d", "30d", "1y", "6m".
fn parse_duration(s: &str) -> Option<Duration> {
    let s = s.trim().to_lowercase();

    if let Some(days) = s.strip_suffix('d') {
        days.parse::<i64>().ok().and_then(Duration::try_days)
    } else if let Some(years) = s.strip_suffix('y') {
        years
            .parse::<i64>()
            .ok()
            .and_then(|y| Duration::try_days(y * 365))
    } else if let Some(months) = s.strip_suffix('m') {
        months
            .parse::<i64>()
            .ok()
            .and_then(|m| Duration::try_days(m * 30))
    } else if let Some(weeks) = s.strip_suffix('w') {
        weeks.parse::<i64>().ok().and_then(Duration::try_weeks)
    } else {
        // Try parsing as days by default
        s.parse::<i64>().ok().and_then(Duration::try_days)
    }
}

/// Verify an API key and return the authenticated caller.
pub async fn verify_key(pool: &DbPool, key: &str) -> AppResult<AuthenticatedCaller> {
    let key_hash = hash_key(key);
    let conn = pool.connection();

    // Look up by hash
    let api_key = db::find_by_hash(conn, &key_hash)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Invalid API key".to_string()))?;

    // Check if revoked
    if api_key.deleted_at.is_some() {
        return Err(AppError::Unauthorized(
            "API key has been revoked".to_string(),
        ));
    }

    // Check if expired
    if api_key
        .expires_at
        .is_some_and(|expires_at| Utc::now() > expires_at)
    {
        return Err(AppError::Unauthorized("API key has expired".to_string()));
    }

    // Update last used timestamp (fire and forget)
    let _ = db::update_last_used(conn, api_key.id).await;

    let role = UserRole::parse(&api_key.role).unwrap_or_default();

    Ok(AuthenticatedCaller {
        key_id: api_key.id,
        name: api_key.name,
        key_prefix: api_key.key_prefix,
        role,
    })
}

/// Create a new API key and store it in the database.
pub async fn create_key(
    pool: &DbPool,
    name: &str,
    role: UserRole,
    expires_in: Option<&str>,
) -> AppResult<(String, api_key::Model)> {
    let (full_key, generated) = generate_key(expires_in)?;

    let conn = pool.connection();
    let model = db::insert_api_key(
        conn,
        generated.id,
        &generated.key_hash,
        &generated.key_prefix,
        name,
        role,
        generated.expires_at,
    )
    .await?;

    Ok((full_key, model))
}

/// List all API keys.
pub async fn list_keys(pool: &DbPool) -> AppResult<Vec<api_key::Model>> {
    let conn = pool.connection();
    db::list_all(conn).await
}

/// Revoke an API key by ID.
pub async fn revoke_key(pool: &DbPool, id: Uuid) -> AppResult<bool> {
    let conn = pool.connection();
    db::revoke(conn, id).await
}

/// Restore a revoked API key by ID.
pub async fn restore_key(pool: &DbPool, id: Uuid) -> AppResult<bool> {
    let conn = pool.connection();
    db::restore(conn, id).await
}

/// Get an API key by ID.
pub async fn get_key(pool: &DbPool, id: Uuid) -> AppResult<Option<api_key::Model>> {
    let conn = pool.connection();
    db::find_by_id(conn, id).await
}
