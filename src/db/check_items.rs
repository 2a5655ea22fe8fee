//! Database queries for checklist items.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use uuid::Uuid;

use crate::entity::check_item::{self, ActiveModel, Entity as CheckItem};
use crate::error::{AppError, AppResult};
use crate::models::{ItemResult, NewCheckItem};

use super::DbPool;

impl DbPool {
    /// Insert the item rows for a freshly created checklist record.
    /// Positions follow the slice order.
    pub async fn insert_check_items(
        &self,
        record_id: Uuid,
        items: &[NewCheckItem],
    ) -> AppResult<Vec<check_item::Model>> {
        let now = Utc::now();

        let models: Vec<ActiveModel> = items
            .iter()
            .enumerate()
            .map(|(position, item)| ActiveModel {
                id: Set(Uuid::new_v4()),
                record_id: Set(record_id),
                category_code: Set(item.category_code.clone()),
                item_code: Set(item.item_code.clone()),
                label: Set(item.label.clone()),
                result: Set(ItemResult::Pending.as_str().to_string()),
                photo_required: Set(item.photo_required),
                photo_urls: Set(serde_json::json!([])),
                notes: Set(None),
                position: Set(position as i32),
                created_at: Set(now),
                updated_at: Set(now),
            })
            .collect();

        CheckItem::insert_many(models)
            .exec(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to insert check items: {}", e)))?;

        self.list_check_items(record_id).await
    }

    /// List a record's items ordered by position.
    pub async fn list_check_items(&self, record_id: Uuid) -> AppResult<Vec<check_item::Model>> {
        let items = CheckItem::find()
            .filter(check_item::Column::RecordId.eq(record_id))
            .order_by_asc(check_item::Column::Position)
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to list check items: {}", e)))?;

        Ok(items)
    }

    /// Get one item, verifying it belongs to the record.
    pub async fn get_check_item(
        &self,
        record_id: Uuid,
        item_id: Uuid,
    ) -> AppResult<Option<check_item::Model>> {
        let item = CheckItem::find_by_id(item_id)
            .filter(check_item::Column::RecordId.eq(record_id))
            .one(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to get check item: {}", e)))?;

        Ok(item)
    }

    /// Overwrite an item's result, notes, and photo list.
    pub async fn update_check_item(
        &self,
        item: check_item::Model,
        result: ItemResult,
        notes: Option<String>,
        photo_urls: Vec<String>,
    ) -> AppResult<check_item::Model> {
        let mut active: ActiveModel = item.into();
        active.result = Set(result.as_str().to_string());
        active.notes = Set(notes);
        active.photo_urls = Set(serde_json::json!(photo_urls));
        active.updated_at = Set(Utc::now());

        let updated = active
            .update(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to update check item: {}", e)))?;

        Ok(updated)
    }
}
