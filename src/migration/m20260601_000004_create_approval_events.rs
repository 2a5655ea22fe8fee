//! Migration: Create approval_events table.
//!
//! Append-only audit trail of workflow transitions. Rows are never
//! updated, so the table has no updated_at column or trigger.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE TABLE approval_events (
                    id UUID PRIMARY KEY,
                    record_id UUID NOT NULL REFERENCES workflow_records(id) ON DELETE CASCADE,
                    action VARCHAR(20) NOT NULL
                        CHECK (action IN ('submitted', 'approved', 'rejected', 'reopened', 'shipped')),
                    actor_id UUID NOT NULL,
                    actor_name VARCHAR(100) NOT NULL,
                    reason TEXT,
                    occurred_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
                );

                -- Index for loading a record's history in order
                CREATE INDEX idx_approval_events_record_id
                    ON approval_events(record_id, occurred_at);
                "#,
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared(
                r#"
                DROP TABLE IF EXISTS approval_events CASCADE;
                "#,
            )
            .await?;

        Ok(())
    }
}
