//! Mold entity for SeaORM.
//!
//! One row per registered injection-tooling asset. Workflow records
//! (checklists, repairs, transfers, scrapping requests) reference a mold.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "molds")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Unique asset code stamped on the tool (e.g. "M-2031-A").
    #[sea_orm(unique)]
    pub mold_code: String,
    pub name: String,
    /// Mold manufacturer responsible for inspections and repairs.
    pub maker_name: String,
    /// Plant currently holding the tool.
    pub plant_name: String,
    /// Informational lifecycle flag: active, under_repair, scrapped
    pub status: String,
    pub cavity_count: Option<i32>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
    pub deleted_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::workflow_record::Entity")]
    WorkflowRecords,
}

impl Related<super::workflow_record::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::WorkflowRecords.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
