//! Kind-specific record payloads (stored as JSONB).
//!
//! The workflow engine never inspects these fields; it only asks each
//! payload to validate itself before submission. Checklists carry no
//! payload; their content lives in the check items table.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use utoipa::ToSchema;

use super::record::RecordKind;

/// Transfer request payload.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TransferDetails {
    /// Plant currently holding the mold.
    pub from_plant: String,
    /// Plant the mold is moving to.
    pub to_plant: String,
    /// Why the transfer is needed.
    pub reason: String,
}

impl TransferDetails {
    /// Collect validation problems. Empty means valid.
    pub fn validation_errors(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if self.from_plant.trim().is_empty() {
            errors.push("from_plant is required".to_string());
        }
        if self.to_plant.trim().is_empty() {
            errors.push("to_plant is required".to_string());
        }
        if !self.from_plant.trim().is_empty() && self.from_plant.trim() == self.to_plant.trim() {
            errors.push("from_plant and to_plant must differ".to_string());
        }
        if self.reason.trim().is_empty() {
            errors.push("reason is required".to_string());
        }
        errors
    }
}

/// Repair request payload.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RepairDetails {
    /// Observed fault, as reported by the maker.
    pub fault_description: String,
    /// Repair work being requested.
    pub requested_action: String,
}

impl RepairDetails {
    pub fn validation_errors(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if self.fault_description.trim().is_empty() {
            errors.push("fault_description is required".to_string());
        }
        if self.requested_action.trim().is_empty() {
            errors.push("requested_action is required".to_string());
        }
        errors
    }
}

/// Scrapping request payload.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ScrapDetails {
    /// Why the mold should be scrapped.
    pub reason: String,
    /// How the mold will be disposed of.
    pub disposal_method: String,
}

impl ScrapDetails {
    pub fn validation_errors(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if self.reason.trim().is_empty() {
            errors.push("reason is required".to_string());
        }
        if self.disposal_method.trim().is_empty() {
            errors.push("disposal_method is required".to_string());
        }
        errors
    }
}

/// Parsed kind payload of a record.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(untagged)]
pub enum RecordDetails {
    Transfer(TransferDetails),
    Repair(RepairDetails),
    Scrap(ScrapDetails),
}

impl RecordDetails {
    /// Parse the stored JSONB payload for the given kind. Checklists
    /// have no payload; a missing or malformed payload yields `None`.
    pub fn from_json(kind: RecordKind, value: Option<&JsonValue>) -> Option<Self> {
        let value = value?;
        match kind {
            RecordKind::Checklist => None,
            RecordKind::Transfer => serde_json::from_value(value.clone())
                .ok()
                .map(Self::Transfer),
            RecordKind::Repair => serde_json::from_value(value.clone()).ok().map(Self::Repair),
            RecordKind::Scrapping => serde_json::from_value(value.clone()).ok().map(Self::Scrap),
        }
    }

    pub fn to_json(&self) -> Option<JsonValue> {
        serde_json::to_value(self).ok()
    }

    /// Collect validation problems. Empty means valid.
    pub fn validation_errors(&self) -> Vec<String> {
        match self {
            Self::Transfer(d) => d.validation_errors(),
            Self::Repair(d) => d.validation_errors(),
            Self::Scrap(d) => d.validation_errors(),
        }
    }
}
