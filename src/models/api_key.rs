//! API key models and the authenticated caller identity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Caller roles. HQ roles (`system_admin`, `mold_developer`) decide; the
/// field roles (`maker`, `plant`) create and submit records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    SystemAdmin,
    MoldDeveloper,
    Maker,
    #[default]
    Plant,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SystemAdmin => "system_admin",
            Self::MoldDeveloper => "mold_developer",
            Self::Maker => "maker",
            Self::Plant => "plant",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "system_admin" => Some(Self::SystemAdmin),
            "mold_developer" => Some(Self::MoldDeveloper),
            "maker" => Some(Self::Maker),
            "plant" => Some(Self::Plant),
            _ => None,
        }
    }

    /// HQ-side roles with approval authority.
    pub fn is_hq(&self) -> bool {
        matches!(self, Self::SystemAdmin | Self::MoldDeveloper)
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Response when creating a new API key (includes the full key).
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiKeyCreateResponse {
    pub id: Uuid,
    /// Full key, shown only once.
    pub key: String,
    pub name: String,
    pub role: UserRole,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Response for listing API keys (key masked).
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiKeyListItem {
    pub id: Uuid,
    pub key_prefix: String,
    pub name: String,
    pub role: UserRole,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_used_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub is_revoked: bool,
}

impl From<crate::entity::api_key::Model> for ApiKeyListItem {
    fn from(key: crate::entity::api_key::Model) -> Self {
        Self {
            id: key.id,
            key_prefix: key.key_prefix,
            name: key.name,
            role: UserRole::parse(&key.role).unwrap_or_default(),
            expires_at: key.expires_at,
            last_used_at: key.last_used_at,
            created_at: key.created_at,
            is_revoked: key.deleted_at.is_some(),
        }
    }
}

/// Request to create a new API key.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateApiKeyRequest {
    /// Display name (e.g., "Busan plant scanner", "Kim / Daesung").
    pub name: String,
    /// Role for the key. Defaults to `plant`.
    #[serde(default)]
    pub role: Option<UserRole>,
    /// Expiration duration (e.g., "365d", "30d", "1y").
    #[serde(default)]
    pub expires_in: Option<String>,
}

/// Authenticated caller information extracted from an API key.
///
/// This is the `actor` the workflow engine sees: key ID doubles as the
/// submitter/approver identity recorded on records and audit events.
#[derive(Debug, Clone)]
pub struct AuthenticatedCaller {
    pub key_id: Uuid,
    pub name: String,
    pub key_prefix: String,
    pub role: UserRole,
}

impl AuthenticatedCaller {
    pub fn is_system_admin(&self) -> bool {
        matches!(self.role, UserRole::SystemAdmin)
    }

    pub fn is_hq(&self) -> bool {
        self.role.is_hq()
    }
}
