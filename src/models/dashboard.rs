//! Dashboard summary DTOs.

use serde::Serialize;
use utoipa::ToSchema;

use super::record::{RecordKind, RecordSummary};

/// Record counts by status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct StatusCounts {
    pub draft: i64,
    pub pending_approval: i64,
    pub approved: i64,
    pub rejected: i64,
}

impl StatusCounts {
    pub fn total(&self) -> i64 {
        self.draft + self.pending_approval + self.approved + self.rejected
    }
}

/// Per-kind record counts.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct KindCounts {
    pub kind: RecordKind,
    #[serde(flatten)]
    pub counts: StatusCounts,
    pub total: i64,
}

/// Role-based landing page data.
///
/// HQ roles get the pending-approval queue; field roles get their own
/// open (draft or rejected) records instead.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DashboardSummary {
    /// Counts across all kinds.
    pub totals: StatusCounts,
    /// Counts broken down by kind.
    pub by_kind: Vec<KindCounts>,
    /// Records awaiting a decision, oldest submission first (HQ roles).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pending_queue: Option<Vec<RecordSummary>>,
    /// The caller's own draft and rejected records (field roles).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub my_open_records: Option<Vec<RecordSummary>>,
}
