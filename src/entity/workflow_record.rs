//! Workflow record entity for SeaORM.
//!
//! One table backs all four submittable record kinds (checklist, transfer,
//! repair, scrapping); `kind` is the discriminator and `details` carries the
//! kind-specific payload. This keeps the approval state machine independent
//! of the record kind.

use sea_orm::entity::prelude::*;
use serde_json::Value as JsonValue;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "workflow_records")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Record kind: checklist, transfer, repair, scrapping
    pub kind: String,
    pub mold_id: Uuid,
    pub title: String,
    /// Approval status: draft, pending_approval, approved, rejected
    pub status: String,
    /// The owning party; only this caller may edit, submit, or reopen.
    pub submitter_id: Uuid,
    pub submitter_name: String,
    /// Populated by a decision, cleared by reopen.
    pub approver_id: Option<Uuid>,
    pub approver_name: Option<String>,
    /// Non-empty exactly while status is 'rejected'.
    pub rejection_reason: Option<String>,
    /// Kind-specific payload, e.g. {from_plant, to_plant, reason} for transfers.
    #[sea_orm(column_type = "JsonBinary", nullable)]
    pub details: Option<JsonValue>,
    /// Checklist kind only: set once after approval when the tool leaves the maker.
    pub shipped_at: Option<DateTimeUtc>,
    pub created_at: DateTimeUtc,
    pub submitted_at: Option<DateTimeUtc>,
    pub decided_at: Option<DateTimeUtc>,
    pub updated_at: DateTimeUtc,
    pub deleted_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::mold::Entity",
        from = "Column::MoldId",
        to = "super::mold::Column::Id"
    )]
    Mold,
    #[sea_orm(has_many = "super::check_item::Entity")]
    CheckItems,
    #[sea_orm(has_many = "super::approval_event::Entity")]
    ApprovalEvents,
}

impl Related<super::mold::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Mold.def()
    }
}

impl Related<super::check_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CheckItems.def()
    }
}

impl Related<super::approval_event::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ApprovalEvents.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
