//! Check item entity for SeaORM.

use sea_orm::entity::prelude::*;
use serde_json::Value as JsonValue;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "check_items")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub record_id: Uuid,
    /// Stable grouping code from the checklist template (e.g. "structure").
    pub category_code: String,
    /// Stable item code, unique within the record (e.g. "STR-01").
    pub item_code: String,
    pub label: String,
    /// Inspection result: pending, pass, fail, na
    pub result: String,
    /// Fixed at template-definition time; item updates never change it.
    pub photo_required: bool,
    /// JSON array of opaque photo URL strings.
    #[sea_orm(column_type = "JsonBinary")]
    pub photo_urls: JsonValue,
    pub notes: Option<String>,
    /// Stable display ordering within the record.
    pub position: i32,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
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
