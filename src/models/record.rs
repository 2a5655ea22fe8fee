//! Workflow record domain models and DTOs.
//!
//! A workflow record is one unit of work moving through the approval
//! pipeline: a shipment checklist, a transfer request, a repair request
//! or a scrapping request. All four kinds share the same lifecycle.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::approval_event::ApprovalEventResponse;
use super::check_item::{CheckItemResponse, ItemProgress, NewCheckItem};
use super::details::{RecordDetails, RepairDetails, ScrapDetails, TransferDetails};

/// Record lifecycle status.
///
/// Transitions: `draft -> pending_approval -> approved | rejected`,
/// and `rejected -> draft` via reopen. Approved is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum RecordStatus {
    Draft,
    PendingApproval,
    Approved,
    Rejected,
}

impl RecordStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::PendingApproval => "pending_approval",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "draft" => Some(Self::Draft),
            "pending_approval" => Some(Self::PendingApproval),
            "approved" => Some(Self::Approved),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }

    /// True for statuses that accept no further workflow transitions.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Approved)
    }
}

impl std::fmt::Display for RecordStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Record kind enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    Checklist,
    Transfer,
    Repair,
    Scrapping,
}

impl RecordKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Checklist => "checklist",
            Self::Transfer => "transfer",
            Self::Repair => "repair",
            Self::Scrapping => "scrapping",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "checklist" => Some(Self::Checklist),
            "transfer" => Some(Self::Transfer),
            "repair" => Some(Self::Repair),
            "scrapping" => Some(Self::Scrapping),
            _ => None,
        }
    }

    pub const ALL: [RecordKind; 4] = [
        Self::Checklist,
        Self::Transfer,
        Self::Repair,
        Self::Scrapping,
    ];
}

impl std::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Actions a caller can attempt on a record. Used for authorization
/// checks and error messages, not persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowAction {
    Create,
    UpdateItem,
    Submit,
    Decide,
    Reopen,
    MarkShipped,
}

impl WorkflowAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::UpdateItem => "update items on",
            Self::Submit => "submit",
            Self::Decide => "decide on",
            Self::Reopen => "reopen",
            Self::MarkShipped => "mark shipment on",
        }
    }
}

impl std::fmt::Display for WorkflowAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Request to create a shipment checklist record.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateChecklistRequest {
    /// Mold the checklist belongs to.
    pub mold_id: Uuid,
    /// Display title (e.g., "Shipment inspection #3").
    pub title: String,
    /// Custom item definitions. When omitted, the standard shipment
    /// template is instantiated.
    #[serde(default)]
    pub items: Option<Vec<NewCheckItem>>,
}

/// Request to create a transfer record.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateTransferRequest {
    /// Mold to transfer.
    pub mold_id: Uuid,
    /// Display title.
    pub title: String,
    /// Transfer-specific fields.
    #[serde(flatten)]
    pub details: TransferDetails,
}

/// Request to create a repair record.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateRepairRequest {
    /// Mold needing repair.
    pub mold_id: Uuid,
    /// Display title.
    pub title: String,
    /// Repair-specific fields.
    #[serde(flatten)]
    pub details: RepairDetails,
}

/// Request to create a scrapping record.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateScrappingRequest {
    /// Mold to scrap.
    pub mold_id: Uuid,
    /// Display title.
    pub title: String,
    /// Scrapping-specific fields.
    #[serde(flatten)]
    pub details: ScrapDetails,
}

/// Body for reject; approve accepts it too but ignores the reason.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct DecisionRequest {
    /// Why the record was rejected. Required for reject.
    #[serde(default)]
    pub reason: Option<String>,
}

/// Record summary for list responses.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RecordSummary {
    /// Record UUID.
    pub id: Uuid,
    /// Record kind.
    pub kind: RecordKind,
    /// Mold UUID.
    pub mold_id: Uuid,
    /// Display title.
    pub title: String,
    /// Lifecycle status.
    pub status: RecordStatus,
    /// Key ID of the submitter.
    pub submitter_id: Uuid,
    /// Submitter display name.
    pub submitter_name: String,
    /// Approver display name, set once decided.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approver_name: Option<String>,
    /// Rejection reason, set while rejected.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,
    /// Shipment timestamp (checklists only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipped_at: Option<DateTime<Utc>>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last submission timestamp.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submitted_at: Option<DateTime<Utc>>,
    /// Decision timestamp.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decided_at: Option<DateTime<Utc>>,
}

impl RecordSummary {
    /// Build a summary from a database row. Unknown kind/status strings
    /// cannot occur under the table CHECK constraints; fall back to
    /// conservative values rather than failing the whole listing.
    pub fn from_model(r: &crate::entity::workflow_record::Model) -> Self {
        RecordSummary {
            id: r.id,
            kind: RecordKind::parse(&r.kind).unwrap_or(RecordKind::Checklist),
            mold_id: r.mold_id,
            title: r.title.clone(),
            status: RecordStatus::parse(&r.status).unwrap_or(RecordStatus::Draft),
            submitter_id: r.submitter_id,
            submitter_name: r.submitter_name.clone(),
            approver_name: r.approver_name.clone(),
            rejection_reason: r.rejection_reason.clone(),
            shipped_at: r.shipped_at,
            created_at: r.created_at,
            submitted_at: r.submitted_at,
            decided_at: r.decided_at,
        }
    }
}

/// Full record detail including kind payload, items and history.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RecordDetailResponse {
    /// Record UUID.
    pub id: Uuid,
    /// Record kind.
    pub kind: RecordKind,
    /// Mold UUID.
    pub mold_id: Uuid,
    /// Display title.
    pub title: String,
    /// Lifecycle status.
    pub status: RecordStatus,
    /// Key ID of the submitter.
    pub submitter_id: Uuid,
    /// Submitter display name.
    pub submitter_name: String,
    /// Approver display name, set once decided.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approver_name: Option<String>,
    /// Rejection reason, set while rejected.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,
    /// Kind-specific payload (absent for checklists).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<RecordDetails>,
    /// Checklist items, ordered by position (empty for other kinds).
    pub items: Vec<CheckItemResponse>,
    /// Derived item progress (checklists only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<ItemProgress>,
    /// Approval history, oldest first.
    pub events: Vec<ApprovalEventResponse>,
    /// Shipment timestamp (checklists only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipped_at: Option<DateTime<Utc>>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last submission timestamp.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submitted_at: Option<DateTime<Utc>>,
    /// Decision timestamp.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decided_at: Option<DateTime<Utc>>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Record list response with pagination.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RecordListResponse {
    /// List of records.
    pub records: Vec<RecordSummary>,
    /// Total number of records matching the filter.
    pub total: i64,
    /// Limit used.
    pub limit: i32,
    /// Offset used.
    pub offset: i32,
}

/// Query parameters for listing records.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ListRecordsQuery {
    /// Filter by kind.
    #[serde(default)]
    pub kind: Option<RecordKind>,
    /// Filter by status.
    #[serde(default)]
    pub status: Option<RecordStatus>,
    /// Filter by mold.
    #[serde(default)]
    pub mold_id: Option<Uuid>,
    /// Filter by submitter key ID.
    #[serde(default)]
    pub submitter_id: Option<Uuid>,
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

impl ListRecordsQuery {
    /// Clamp limit/offset to sane bounds.
    pub fn normalized(mut self) -> Self {
        self.limit = self.limit.clamp(1, 100);
        self.offset = self.offset.max(0);
        self
    }
}

/// Response for a lifecycle transition (submit/approve/reject/reopen/ship).
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TransitionResponse {
    /// Record UUID.
    pub id: Uuid,
    /// Status after the transition.
    pub status: RecordStatus,
    /// Shipment timestamp, when the transition set one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipped_at: Option<DateTime<Utc>>,
}
