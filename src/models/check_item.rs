//! Checklist item models and DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use utoipa::ToSchema;
use uuid::Uuid;

/// Result of a single checklist item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ItemResult {
    Pending,
    Pass,
    Fail,
    Na,
}

impl ItemResult {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Pass => "pass",
            Self::Fail => "fail",
            Self::Na => "na",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "pass" => Some(Self::Pass),
            "fail" => Some(Self::Fail),
            "na" => Some(Self::Na),
            _ => None,
        }
    }
}

impl std::fmt::Display for ItemResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Item definition supplied when creating a checklist with custom items.
/// Also produced by template instantiation.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct NewCheckItem {
    /// Category grouping code (e.g., "appearance").
    pub category_code: String,
    /// Unique code within the record (e.g., "APP-01").
    pub item_code: String,
    /// Human-readable label.
    pub label: String,
    /// Whether photo evidence is required for a passing result.
    #[serde(default)]
    pub photo_required: bool,
}

/// Request to update a single checklist item.
///
/// `notes` and `photo_urls` are patch-style: omitted fields keep their
/// current value, supplied fields replace it.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateCheckItemRequest {
    /// New result for the item.
    pub result: ItemResult,
    /// Inspector notes. Required non-empty when result is `fail`.
    #[serde(default)]
    pub notes: Option<String>,
    /// Replacement photo URL list.
    #[serde(default)]
    pub photo_urls: Option<Vec<String>>,
}

/// Checklist item in API responses.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CheckItemResponse {
    /// Item UUID.
    pub id: Uuid,
    /// Category grouping code.
    pub category_code: String,
    /// Unique code within the record.
    pub item_code: String,
    /// Human-readable label.
    pub label: String,
    /// Current result.
    pub result: ItemResult,
    /// Whether photo evidence is required for a passing result.
    pub photo_required: bool,
    /// Attached photo URLs.
    pub photo_urls: Vec<String>,
    /// Inspector notes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Position within the record.
    pub position: i32,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl CheckItemResponse {
    pub fn from_model(item: &crate::entity::check_item::Model) -> Self {
        CheckItemResponse {
            id: item.id,
            category_code: item.category_code.clone(),
            item_code: item.item_code.clone(),
            label: item.label.clone(),
            result: ItemResult::parse(&item.result).unwrap_or(ItemResult::Pending),
            photo_required: item.photo_required,
            photo_urls: photo_urls_from_json(&item.photo_urls),
            notes: item.notes.clone(),
            position: item.position,
            updated_at: item.updated_at,
        }
    }
}

/// Decode the JSONB photo list. Anything malformed reads as empty.
pub fn photo_urls_from_json(value: &JsonValue) -> Vec<String> {
    serde_json::from_value(value.clone()).unwrap_or_default()
}

/// Derived item counters, recomputed from the items table on read.
///
/// Progress reporting only. Submission re-scans the items itself rather
/// than trusting these numbers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct ItemProgress {
    /// Total number of items.
    pub total: i64,
    /// Items with result `pass`.
    pub passed: i64,
    /// Items with result `fail`.
    pub failed: i64,
    /// Items with result `na`.
    pub na: i64,
    /// Items still `pending`.
    pub pending: i64,
    /// Photo-required passing items with no photo attached.
    pub photos_missing: i64,
}

impl ItemProgress {
    /// Scan a record's items and tally the counters.
    pub fn scan(items: &[crate::entity::check_item::Model]) -> Self {
        let mut progress = ItemProgress {
            total: items.len() as i64,
            ..Default::default()
        };
        for item in items {
            match ItemResult::parse(&item.result).unwrap_or(ItemResult::Pending) {
                ItemResult::Pending => progress.pending += 1,
                ItemResult::Pass => {
                    progress.passed += 1;
                    if item.photo_required && photo_urls_from_json(&item.photo_urls).is_empty() {
                        progress.photos_missing += 1;
                    }
                }
                ItemResult::Fail => progress.failed += 1,
                ItemResult::Na => progress.na += 1,
            }
        }
        progress
    }
}
