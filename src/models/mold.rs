//! Mold registry models and DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Informational mold lifecycle flag. Not part of the approval state
/// machine; updated manually by HQ roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum MoldStatus {
    Active,
    UnderRepair,
    Scrapped,
}

impl MoldStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::UnderRepair => "under_repair",
            Self::Scrapped => "scrapped",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "active" => Some(Self::Active),
            "under_repair" => Some(Self::UnderRepair),
            "scrapped" => Some(Self::Scrapped),
            _ => None,
        }
    }
}

impl std::fmt::Display for MoldStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Request to register a new mold.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct RegisterMoldRequest {
    /// Unique mold code (e.g., "M-2031").
    pub mold_code: String,
    /// Display name.
    pub name: String,
    /// Maker responsible for the mold.
    pub maker_name: String,
    /// Plant currently holding the mold.
    pub plant_name: String,
    /// Number of cavities, when known.
    #[serde(default)]
    pub cavity_count: Option<i32>,
}

impl RegisterMoldRequest {
    /// Collect validation problems. Empty means valid.
    pub fn validation_errors(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if self.mold_code.trim().is_empty() {
            errors.push("mold_code is required".to_string());
        }
        if self.name.trim().is_empty() {
            errors.push("name is required".to_string());
        }
        if self.maker_name.trim().is_empty() {
            errors.push("maker_name is required".to_string());
        }
        if self.plant_name.trim().is_empty() {
            errors.push("plant_name is required".to_string());
        }
        if let Some(count) = self.cavity_count {
            if count <= 0 {
                errors.push("cavity_count must be positive".to_string());
            }
        }
        errors
    }
}

/// Request to change a mold's lifecycle flag.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateMoldStatusRequest {
    pub status: MoldStatus,
}

/// Mold in API responses.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MoldResponse {
    /// Mold UUID.
    pub id: Uuid,
    /// Unique mold code.
    pub mold_code: String,
    /// Display name.
    pub name: String,
    /// Maker responsible for the mold.
    pub maker_name: String,
    /// Plant currently holding the mold.
    pub plant_name: String,
    /// Lifecycle flag.
    pub status: MoldStatus,
    /// Number of cavities, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cavity_count: Option<i32>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl MoldResponse {
    pub fn from_model(m: &crate::entity::mold::Model) -> Self {
        MoldResponse {
            id: m.id,
            mold_code: m.mold_code.clone(),
            name: m.name.clone(),
            maker_name: m.maker_name.clone(),
            plant_name: m.plant_name.clone(),
            status: MoldStatus::parse(&m.status).unwrap_or(MoldStatus::Active),
            cavity_count: m.cavity_count,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

/// Mold list response with pagination.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MoldListResponse {
    /// List of molds.
    pub molds: Vec<MoldResponse>,
    /// Total number of molds matching the filter.
    pub total: i64,
    /// Limit used.
    pub limit: i32,
    /// Offset used.
    pub offset: i32,
}

/// Query parameters for listing molds.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ListMoldsQuery {
    /// Filter by lifecycle flag.
    #[serde(default)]
    pub status: Option<MoldStatus>,
    /// Filter by current plant.
    #[serde(default)]
    pub plant: Option<String>,
    /// Maximum results to return.
    #[serde(default = "default_limit")]
    pub limit: i32,
    /// Offset for pagination.
    #[serde(default)]
    pub offset: i32,
}

fn default_limit() -> i32 {
    20
}

impl ListMoldsQuery {
    /// Clamp limit/offset to sane bounds.
    pub fn normalized(mut self) -> Self {
        self.limit = self.limit.clamp(1, 100);
        self.offset = self.offset.max(0);
        self
    }
}
