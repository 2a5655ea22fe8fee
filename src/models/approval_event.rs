//! Approval audit trail models.
//!
//! Events are append-only. Reopening a rejected record never erases the
//! earlier decision; history accumulates across resubmissions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Audit trail action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum EventAction {
    Submitted,
    Approved,
    Rejected,
    Reopened,
    Shipped,
}

impl EventAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Submitted => "submitted",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Reopened => "reopened",
            Self::Shipped => "shipped",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "submitted" => Some(Self::Submitted),
            "approved" => Some(Self::Approved),
            "rejected" => Some(Self::Rejected),
            "reopened" => Some(Self::Reopened),
            "shipped" => Some(Self::Shipped),
            _ => None,
        }
    }
}

impl std::fmt::Display for EventAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Audit trail entry in API responses.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ApprovalEventResponse {
    /// Event UUID.
    pub id: Uuid,
    /// What happened.
    pub action: EventAction,
    /// Key ID of the actor.
    pub actor_id: Uuid,
    /// Actor display name.
    pub actor_name: String,
    /// Reason supplied with the action (rejections).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// When the action happened.
    pub occurred_at: DateTime<Utc>,
}

impl ApprovalEventResponse {
    pub fn from_model(e: &crate::entity::approval_event::Model) -> Self {
        ApprovalEventResponse {
            id: e.id,
            action: EventAction::parse(&e.action).unwrap_or(EventAction::Submitted),
            actor_id: e.actor_id,
            actor_name: e.actor_name.clone(),
            reason: e.reason.clone(),
            occurred_at: e.occurred_at,
        }
    }
}

/// Event list response.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct EventListResponse {
    /// Events, oldest first.
    pub events: Vec<ApprovalEventResponse>,
}
