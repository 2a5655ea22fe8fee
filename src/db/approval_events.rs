//! Database queries for the approval audit trail. Append-only.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use uuid::Uuid;

use crate::entity::approval_event::{self, ActiveModel, Entity as ApprovalEvent};
use crate::error::{AppError, AppResult};
use crate::models::EventAction;

use super::DbPool;

impl DbPool {
    /// Append an audit event.
    pub async fn insert_approval_event(
        &self,
        record_id: Uuid,
        action: EventAction,
        actor_id: Uuid,
        actor_name: &str,
        reason: Option<&str>,
    ) -> AppResult<approval_event::Model> {
        let model = ActiveModel {
            id: Set(Uuid::new_v4()),
            record_id: Set(record_id),
            action: Set(action.as_str().to_string()),
            actor_id: Set(actor_id),
            actor_name: Set(actor_name.to_string()),
            reason: Set(reason.map(|r| r.to_string())),
            occurred_at: Set(Utc::now()),
        };

        let result = model
            .insert(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to insert approval event: {}", e)))?;

        Ok(result)
    }

    /// A record's audit trail, oldest first.
    pub async fn list_approval_events(
        &self,
        record_id: Uuid,
    ) -> AppResult<Vec<approval_event::Model>> {
        let events = ApprovalEvent::find()
            .filter(approval_event::Column::RecordId.eq(record_id))
            .order_by_asc(approval_event::Column::OccurredAt)
            .order_by_asc(approval_event::Column::Id)
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to list approval events: {}", e)))?;

        Ok(events)
    }
}
