//! Database queries for workflow records.
//!
//! Every status transition here is a conditional update filtered on the
//! expected current status. Callers treat `rows_affected == 0` as a lost
//! compare-and-set race (or a stale read) and surface `InvalidState`.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use serde_json::Value as JsonValue;
use uuid::Uuid;

use crate::entity::workflow_record::{self as record, ActiveModel, Entity as Record};
use crate::error::{AppError, AppResult};
use crate::models::record::ListRecordsQuery;
use crate::models::{RecordKind, RecordStatus};

use super::DbPool;

impl DbPool {
    /// Insert a new record in `draft`.
    #[allow(clippy::too_many_arguments)]
    pub async fn insert_record(
        &self,
        id: Uuid,
        kind: RecordKind,
        mold_id: Uuid,
        title: &str,
        submitter_id: Uuid,
        submitter_name: &str,
        details: Option<JsonValue>,
    ) -> AppResult<record::Model> {
        let now = Utc::now();

        let model = ActiveModel {
            id: Set(id),
            kind: Set(kind.as_str().to_string()),
            mold_id: Set(mold_id),
            title: Set(title.to_string()),
            status: Set(RecordStatus::Draft.as_str().to_string()),
            submitter_id: Set(submitter_id),
            submitter_name: Set(submitter_name.to_string()),
            approver_id: Set(None),
            approver_name: Set(None),
            rejection_reason: Set(None),
            details: Set(details),
            shipped_at: Set(None),
            created_at: Set(now),
            submitted_at: Set(None),
            decided_at: Set(None),
            updated_at: Set(now),
            deleted_at: Set(None),
        };

        let result = model
            .insert(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to insert record: {}", e)))?;

        Ok(result)
    }

    /// Get a record by ID, excluding soft-deleted rows.
    pub async fn get_record_by_id(&self, id: Uuid) -> AppResult<Option<record::Model>> {
        let result = Record::find_by_id(id)
            .filter(record::Column::DeletedAt.is_null())
            .one(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to get record: {}", e)))?;

        Ok(result)
    }

    /// List records with optional filtering.
    pub async fn list_records(
        &self,
        query: &ListRecordsQuery,
    ) -> AppResult<(Vec<record::Model>, u64)> {
        let mut select = Record::find().filter(record::Column::DeletedAt.is_null());

        if let Some(kind) = query.kind {
            select = select.filter(record::Column::Kind.eq(kind.as_str()));
        }

        if let Some(status) = query.status {
            select = select.filter(record::Column::Status.eq(status.as_str()));
        }

        if let Some(mold_id) = query.mold_id {
            select = select.filter(record::Column::MoldId.eq(mold_id));
        }

        if let Some(submitter_id) = query.submitter_id {
            select = select.filter(record::Column::SubmitterId.eq(submitter_id));
        }

        // Count total before pagination
        let total = select
            .clone()
            .count(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to count records: {}", e)))?;

        let limit = query.limit.clamp(1, 100) as u64;
        let offset = query.offset.max(0) as u64;

        let records = select
            .order_by_desc(record::Column::CreatedAt)
            .offset(offset)
            .limit(limit)
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to list records: {}", e)))?;

        Ok((records, total))
    }

    /// Conditionally move a draft to `pending_approval`, stamping the
    /// submission time and submitter identity. Returns affected rows.
    pub async fn mark_record_submitted(
        &self,
        id: Uuid,
        submitter_id: Uuid,
        submitter_name: &str,
    ) -> AppResult<u64> {
        use sea_orm::sea_query::Expr;

        let now = Utc::now();

        let result = Record::update_many()
            .col_expr(
                record::Column::Status,
                Expr::value(RecordStatus::PendingApproval.as_str()),
            )
            .col_expr(record::Column::SubmittedAt, Expr::value(now))
            .col_expr(record::Column::SubmitterId, Expr::value(submitter_id))
            .col_expr(
                record::Column::SubmitterName,
                Expr::value(submitter_name),
            )
            .filter(record::Column::Id.eq(id))
            .filter(record::Column::Status.eq(RecordStatus::Draft.as_str()))
            .filter(record::Column::DeletedAt.is_null())
            .exec(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to submit record: {}", e)))?;

        Ok(result.rows_affected)
    }

    /// Conditionally decide a pending record. `new_status` must be
    /// `Approved` or `Rejected`. Returns affected rows.
    pub async fn mark_record_decided(
        &self,
        id: Uuid,
        new_status: RecordStatus,
        approver_id: Uuid,
        approver_name: &str,
        rejection_reason: Option<&str>,
    ) -> AppResult<u64> {
        use sea_orm::sea_query::Expr;

        let now = Utc::now();

        let result = Record::update_many()
            .col_expr(record::Column::Status, Expr::value(new_status.as_str()))
            .col_expr(record::Column::DecidedAt, Expr::value(now))
            .col_expr(record::Column::ApproverId, Expr::value(approver_id))
            .col_expr(record::Column::ApproverName, Expr::value(approver_name))
            .col_expr(
                record::Column::RejectionReason,
                Expr::value(rejection_reason),
            )
            .filter(record::Column::Id.eq(id))
            .filter(record::Column::Status.eq(RecordStatus::PendingApproval.as_str()))
            .filter(record::Column::DeletedAt.is_null())
            .exec(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to decide record: {}", e)))?;

        Ok(result.rows_affected)
    }

    /// Conditionally reopen a rejected record back to `draft`, clearing
    /// the decision fields. The audit trail keeps the history. Returns
    /// affected rows.
    pub async fn mark_record_reopened(&self, id: Uuid) -> AppResult<u64> {
        use sea_orm::sea_query::Expr;

        let result = Record::update_many()
            .col_expr(
                record::Column::Status,
                Expr::value(RecordStatus::Draft.as_str()),
            )
            .col_expr(
                record::Column::RejectionReason,
                Expr::value(None::<String>),
            )
            .col_expr(record::Column::ApproverId, Expr::value(None::<Uuid>))
            .col_expr(record::Column::ApproverName, Expr::value(None::<String>))
            .col_expr(
                record::Column::DecidedAt,
                Expr::value(None::<chrono::DateTime<Utc>>),
            )
            .col_expr(
                record::Column::SubmittedAt,
                Expr::value(None::<chrono::DateTime<Utc>>),
            )
            .filter(record::Column::Id.eq(id))
            .filter(record::Column::Status.eq(RecordStatus::Rejected.as_str()))
            .filter(record::Column::DeletedAt.is_null())
            .exec(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to reopen record: {}", e)))?;

        Ok(result.rows_affected)
    }

    /// Conditionally stamp the shipment time on an approved, not yet
    /// shipped checklist. Returns affected rows.
    pub async fn mark_record_shipped(&self, id: Uuid) -> AppResult<u64> {
        use sea_orm::sea_query::Expr;

        let now = Utc::now();

        let result = Record::update_many()
            .col_expr(record::Column::ShippedAt, Expr::value(now))
            .filter(record::Column::Id.eq(id))
            .filter(record::Column::Status.eq(RecordStatus::Approved.as_str()))
            .filter(record::Column::ShippedAt.is_null())
            .filter(record::Column::DeletedAt.is_null())
            .exec(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to mark record shipped: {}", e)))?;

        Ok(result.rows_affected)
    }

    /// Count active records grouped by kind and status.
    pub async fn count_records_by_kind_and_status(
        &self,
    ) -> AppResult<std::collections::HashMap<(RecordKind, RecordStatus), i64>> {
        use sea_orm::{FromQueryResult, Statement};

        #[derive(Debug, FromQueryResult)]
        struct CountRow {
            kind: String,
            status: String,
            count: i64,
        }

        let sql = "SELECT kind, status, COUNT(*) AS count FROM workflow_records \
                   WHERE deleted_at IS NULL GROUP BY kind, status";

        let rows: Vec<CountRow> = CountRow::find_by_statement(Statement::from_string(
            sea_orm::DatabaseBackend::Postgres,
            sql,
        ))
        .all(self.connection())
        .await
        .map_err(|e| AppError::Database(format!("Failed to count records: {}", e)))?;

        let mut counts = std::collections::HashMap::new();
        for row in rows {
            let (Some(kind), Some(status)) =
                (RecordKind::parse(&row.kind), RecordStatus::parse(&row.status))
            else {
                continue;
            };
            counts.insert((kind, status), row.count);
        }

        Ok(counts)
    }

    /// Records awaiting a decision, oldest submission first.
    pub async fn list_pending_queue(&self, limit: u64) -> AppResult<Vec<record::Model>> {
        let records = Record::find()
            .filter(record::Column::Status.eq(RecordStatus::PendingApproval.as_str()))
            .filter(record::Column::DeletedAt.is_null())
            .order_by_asc(record::Column::SubmittedAt)
            .limit(limit)
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to list pending queue: {}", e)))?;

        Ok(records)
    }

    /// A submitter's own draft and rejected records, most recent first.
    pub async fn list_open_records_for(
        &self,
        submitter_id: Uuid,
        limit: u64,
    ) -> AppResult<Vec<record::Model>> {
        let records = Record::find()
            .filter(record::Column::SubmitterId.eq(submitter_id))
            .filter(record::Column::Status.is_in([
                RecordStatus::Draft.as_str(),
                RecordStatus::Rejected.as_str(),
            ]))
            .filter(record::Column::DeletedAt.is_null())
            .order_by_desc(record::Column::UpdatedAt)
            .limit(limit)
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to list open records: {}", e)))?;

        Ok(records)
    }
}
