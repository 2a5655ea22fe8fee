//! Approval event entity for SeaORM.
//!
//! Append-only audit trail for workflow records. Reopening a rejected record
//! never deletes rows here; decision history accumulates across resubmissions.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "approval_events")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub record_id: Uuid,
    /// Workflow action: submitted, approved, rejected, reopened, shipped
    pub action: String,
    pub actor_id: Uuid,
    pub actor_name: String,
    /// Rejection reason for 'rejected' events.
    pub reason: Option<String>,
    pub occurred_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::workflow_record::Entity",
        from = "Column::RecordId",
        to = "super::workflow_record::Column::Id",
        on_delete = "Cascade"
    )]
    Record,
}

impl Related<super::workflow_record::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Record.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
