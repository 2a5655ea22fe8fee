//! Approval workflow engine.
//!
//! One state machine shared by all four record kinds:
//!
//! ```text
//! draft --Submit--> pending_approval --Approve--> approved
//!   ^                      |
//!   |                      +--Reject--> rejected
//!   +--------Reopen--------------------------^
//! ```
//!
//! The decision logic (role allow-lists, ownership, status gates, item
//! scans) is kept in plain functions over entity models so it can be
//! unit tested without a database. The async operations wire those
//! decisions to conditional updates: every transition is guarded by a
//! `WHERE status = <expected>` filter, and zero affected rows surfaces
//! as `InvalidState` instead of clobbering a concurrent winner.

use serde_json::Value as JsonValue;
use tracing::info;
use uuid::Uuid;

use crate::db::DbPool;
use crate::entity::{check_item, workflow_record};
use crate::error::{AppError, AppResult};
use crate::models::check_item::photo_urls_from_json;
use crate::models::details::RecordDetails;
use crate::models::{
    AuthenticatedCaller, EventAction, ItemResult, RecordKind, RecordStatus,
    UpdateCheckItemRequest, UserRole, WorkflowAction,
};

/// Roles with approval authority, shared by all record kinds.
const HQ_ROLES: &[UserRole] = &[UserRole::SystemAdmin, UserRole::MoldDeveloper];
/// Checklist and repair paperwork originates at the maker.
const MAKER_ONLY: &[UserRole] = &[UserRole::Maker];
/// Transfers and scrappings may also be requested by the holding plant.
const REQUESTER_ROLES: &[UserRole] = &[UserRole::Maker, UserRole::Plant];

/// The allow-list consulted for every role check. No other code
/// compares role strings.
pub fn allowed_roles(kind: RecordKind, action: WorkflowAction) -> &'static [UserRole] {
    match action {
        WorkflowAction::Decide | WorkflowAction::MarkShipped => HQ_ROLES,
        WorkflowAction::Create
        | WorkflowAction::UpdateItem
        | WorkflowAction::Submit
        | WorkflowAction::Reopen => match kind {
            RecordKind::Checklist | RecordKind::Repair => MAKER_ONLY,
            RecordKind::Transfer | RecordKind::Scrapping => REQUESTER_ROLES,
        },
    }
}

/// Role gate for an action on a record kind.
pub fn authorize(kind: RecordKind, action: WorkflowAction, role: UserRole) -> AppResult<()> {
    if allowed_roles(kind, action).contains(&role) {
        return Ok(());
    }

    Err(AppError::PermissionDenied(format!(
        "Role {} may not {} {} records",
        role, action, kind
    )))
}

/// Ownership gate: draft-side actions belong to the original submitter.
fn ensure_owner(
    record: &workflow_record::Model,
    actor: &AuthenticatedCaller,
    action: WorkflowAction,
) -> AppResult<()> {
    if record.submitter_id == actor.key_id {
        return Ok(());
    }

    Err(AppError::PermissionDenied(format!(
        "Only the submitter may {} record {}",
        action, record.id
    )))
}

fn record_kind(record: &workflow_record::Model) -> AppResult<RecordKind> {
    RecordKind::parse(&record.kind).ok_or_else(|| {
        AppError::Database(format!(
            "Record {} has unknown kind '{}'",
            record.id, record.kind
        ))
    })
}

fn record_status(record: &workflow_record::Model) -> AppResult<RecordStatus> {
    RecordStatus::parse(&record.status).ok_or_else(|| {
        AppError::Database(format!(
            "Record {} has unknown status '{}'",
            record.id, record.status
        ))
    })
}

/// Status gate.
fn ensure_status(
    record: &workflow_record::Model,
    expected: RecordStatus,
    action: WorkflowAction,
) -> AppResult<()> {
    let status = record_status(record)?;
    if status == expected {
        return Ok(());
    }

    Err(AppError::InvalidState(format!(
        "Cannot {} record {}: status is {}, expected {}",
        action, record.id, status, expected
    )))
}

/// Map a conditional update's row count back onto the state machine.
/// Zero rows means the status (or shipment mark) moved under us.
fn cas_guard(rows_affected: u64, record_id: Uuid, action: WorkflowAction) -> AppResult<()> {
    if rows_affected > 0 {
        return Ok(());
    }

    Err(AppError::InvalidState(format!(
        "Cannot {} record {}: status changed concurrently",
        action, record_id
    )))
}

/// Scan items and kind details for submission blockers, enumerating the
/// offending item codes. Always re-reads the items passed in; stored
/// progress counters are never consulted.
pub fn submit_validation_errors(
    kind: RecordKind,
    details: Option<&JsonValue>,
    items: &[check_item::Model],
) -> Vec<String> {
    let mut errors = Vec::new();

    match kind {
        RecordKind::Checklist => {
            if items.is_empty() {
                errors.push("checklist has no items".to_string());
            }

            let mut pending = Vec::new();
            let mut failing = Vec::new();
            let mut missing_photos = Vec::new();

            for item in items {
                match ItemResult::parse(&item.result).unwrap_or(ItemResult::Pending) {
                    ItemResult::Pending => pending.push(item.item_code.as_str()),
                    ItemResult::Fail => failing.push(item.item_code.as_str()),
                    ItemResult::Pass => {
                        if item.photo_required && photo_urls_from_json(&item.photo_urls).is_empty()
                        {
                            missing_photos.push(item.item_code.as_str());
                        }
                    }
                    ItemResult::Na => {}
                }
            }

            if !pending.is_empty() {
                errors.push(format!("items not yet answered: {}", pending.join(", ")));
            }
            if !failing.is_empty() {
                errors.push(format!("items still failing: {}", failing.join(", ")));
            }
            if !missing_photos.is_empty() {
                errors.push(format!(
                    "items missing required photos: {}",
                    missing_photos.join(", ")
                ));
            }
        }
        RecordKind::Transfer | RecordKind::Repair | RecordKind::Scrapping => {
            match RecordDetails::from_json(kind, details) {
                Some(parsed) => errors.extend(parsed.validation_errors()),
                None => errors.push(format!("{} details are missing or malformed", kind)),
            }
        }
    }

    errors
}

/// A decision on a pending record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Approve,
    Reject,
}

impl Decision {
    fn target_status(&self) -> RecordStatus {
        match self {
            Self::Approve => RecordStatus::Approved,
            Self::Reject => RecordStatus::Rejected,
        }
    }

    fn event_action(&self) -> EventAction {
        match self {
            Self::Approve => EventAction::Approved,
            Self::Reject => EventAction::Rejected,
        }
    }
}

/// Rejections must carry a reason; approvals ignore one.
fn validate_decision(decision: Decision, reason: Option<&str>) -> AppResult<()> {
    if decision == Decision::Reject && reason.map(str::trim).unwrap_or("").is_empty() {
        return Err(AppError::validation(
            "Rejection requires a reason",
            vec!["a non-empty rejection reason is required".to_string()],
        ));
    }
    Ok(())
}

async fn load_record(pool: &DbPool, record_id: Uuid) -> AppResult<workflow_record::Model> {
    pool.get_record_by_id(record_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Record {}", record_id)))
}

/// Submit a draft for approval.
pub async fn submit(
    pool: &DbPool,
    record_id: Uuid,
    actor: &AuthenticatedCaller,
) -> AppResult<workflow_record::Model> {
    let record = load_record(pool, record_id).await?;
    let kind = record_kind(&record)?;

    authorize(kind, WorkflowAction::Submit, actor.role)?;
    ensure_owner(&record, actor, WorkflowAction::Submit)?;
    ensure_status(&record, RecordStatus::Draft, WorkflowAction::Submit)?;

    let items = pool.list_check_items(record_id).await?;
    let errors = submit_validation_errors(kind, record.details.as_ref(), &items);
    if !errors.is_empty() {
        return Err(AppError::validation(
            "Record is not ready for submission",
            errors,
        ));
    }

    let rows = pool
        .mark_record_submitted(record_id, actor.key_id, &actor.name)
        .await?;
    cas_guard(rows, record_id, WorkflowAction::Submit)?;

    pool.insert_approval_event(
        record_id,
        EventAction::Submitted,
        actor.key_id,
        &actor.name,
        None,
    )
    .await?;

    info!(record_id = %record_id, kind = %kind, "Record submitted for approval");

    load_record(pool, record_id).await
}

/// Approve or reject a pending record.
pub async fn decide(
    pool: &DbPool,
    record_id: Uuid,
    actor: &AuthenticatedCaller,
    decision: Decision,
    reason: Option<&str>,
) -> AppResult<workflow_record::Model> {
    let record = load_record(pool, record_id).await?;
    let kind = record_kind(&record)?;

    authorize(kind, WorkflowAction::Decide, actor.role)?;
    ensure_status(&record, RecordStatus::PendingApproval, WorkflowAction::Decide)?;
    validate_decision(decision, reason)?;

    let stored_reason = match decision {
        Decision::Reject => reason.map(str::trim).filter(|r| !r.is_empty()),
        Decision::Approve => None,
    };

    let rows = pool
        .mark_record_decided(
            record_id,
            decision.target_status(),
            actor.key_id,
            &actor.name,
            stored_reason,
        )
        .await?;
    cas_guard(rows, record_id, WorkflowAction::Decide)?;

    pool.insert_approval_event(
        record_id,
        decision.event_action(),
        actor.key_id,
        &actor.name,
        stored_reason,
    )
    .await?;

    info!(
        record_id = %record_id,
        kind = %kind,
        status = %decision.target_status(),
        "Record decided"
    );

    load_record(pool, record_id).await
}

/// Reopen a rejected record for correction. Decision history stays in
/// the audit trail; the decision fields on the record itself are
/// cleared so a resubmission stamps fresh ones.
pub async fn reopen(
    pool: &DbPool,
    record_id: Uuid,
    actor: &AuthenticatedCaller,
) -> AppResult<workflow_record::Model> {
    let record = load_record(pool, record_id).await?;
    let kind = record_kind(&record)?;

    authorize(kind, WorkflowAction::Reopen, actor.role)?;
    ensure_owner(&record, actor, WorkflowAction::Reopen)?;
    ensure_status(&record, RecordStatus::Rejected, WorkflowAction::Reopen)?;

    let rows = pool.mark_record_reopened(record_id).await?;
    cas_guard(rows, record_id, WorkflowAction::Reopen)?;

    pool.insert_approval_event(
        record_id,
        EventAction::Reopened,
        actor.key_id,
        &actor.name,
        None,
    )
    .await?;

    info!(record_id = %record_id, kind = %kind, "Record reopened");

    load_record(pool, record_id).await
}

/// Update one checklist item. Items are mutable only while the record
/// is a draft; the record status never changes here.
pub async fn update_item(
    pool: &DbPool,
    record_id: Uuid,
    item_id: Uuid,
    actor: &AuthenticatedCaller,
    request: &UpdateCheckItemRequest,
) -> AppResult<check_item::Model> {
    let record = load_record(pool, record_id).await?;
    let kind = record_kind(&record)?;

    if kind != RecordKind::Checklist {
        return Err(AppError::validation(
            "Only checklist records carry items",
            vec![format!("record {} is a {} record", record_id, kind)],
        ));
    }

    authorize(kind, WorkflowAction::UpdateItem, actor.role)?;
    ensure_owner(&record, actor, WorkflowAction::UpdateItem)?;
    ensure_status(&record, RecordStatus::Draft, WorkflowAction::UpdateItem)?;

    let item = pool
        .get_check_item(record_id, item_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Item {} on record {}", item_id, record_id)))?;

    // Patch semantics: omitted fields keep their current value, an
    // empty notes string clears them.
    let notes = match &request.notes {
        Some(notes) => Some(notes.clone()).filter(|n| !n.trim().is_empty()),
        None => item.notes.clone(),
    };
    let photo_urls = match &request.photo_urls {
        Some(urls) => urls.clone(),
        None => photo_urls_from_json(&item.photo_urls),
    };

    if request.result == ItemResult::Fail && notes.is_none() {
        return Err(AppError::validation(
            "Failing items need an explanation",
            vec![format!(
                "item {} requires notes when the result is fail",
                item.item_code
            )],
        ));
    }

    pool.update_check_item(item, request.result, notes, photo_urls)
        .await
}

/// Stamp the shipment time on an approved checklist. Shipment is a
/// one-way mark alongside the status, not a fifth status.
pub async fn mark_shipped(
    pool: &DbPool,
    record_id: Uuid,
    actor: &AuthenticatedCaller,
) -> AppResult<workflow_record::Model> {
    let record = load_record(pool, record_id).await?;
    let kind = record_kind(&record)?;

    if kind != RecordKind::Checklist {
        return Err(AppError::validation(
            "Only shipment checklists can be marked shipped",
            vec![format!("record {} is a {} record", record_id, kind)],
        ));
    }

    authorize(kind, WorkflowAction::MarkShipped, actor.role)?;
    ensure_status(&record, RecordStatus::Approved, WorkflowAction::MarkShipped)?;

    if record.shipped_at.is_some() {
        return Err(AppError::InvalidState(format!(
            "Record {} is already marked shipped",
            record_id
        )));
    }

    let rows = pool.mark_record_shipped(record_id).await?;
    cas_guard(rows, record_id, WorkflowAction::MarkShipped)?;

    pool.insert_approval_event(
        record_id,
        EventAction::Shipped,
        actor.key_id,
        &actor.name,
        None,
    )
    .await?;

    info!(record_id = %record_id, "Checklist marked shipped");

    load_record(pool, record_id).await
}
