//! Migration: Create workflow_records table.
//!
//! One table for all four record kinds; kind-specific fields live in the
//! JSONB details column. Status transitions happen through compare-and-set
//! updates, so status carries a CHECK constraint rather than an enum type.

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
                CREATE TABLE workflow_records (
                    id UUID PRIMARY KEY,
                    kind VARCHAR(20) NOT NULL
                        CHECK (kind IN ('checklist', 'transfer', 'repair', 'scrapping')),
                    mold_id UUID NOT NULL REFERENCES molds(id),
                    title VARCHAR(200) NOT NULL,
                    status VARCHAR(20) NOT NULL DEFAULT 'draft'
                        CHECK (status IN ('draft', 'pending_approval', 'approved', 'rejected')),

                    submitter_id UUID NOT NULL,
                    submitter_name VARCHAR(100) NOT NULL,
                    approver_id UUID,
                    approver_name VARCHAR(100),
                    rejection_reason TEXT,

                    -- Kind-specific payload, e.g. {from_plant, to_plant, reason}
                    details JSONB,

                    shipped_at TIMESTAMPTZ,
                    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                    submitted_at TIMESTAMPTZ,
                    decided_at TIMESTAMPTZ,
                    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                    deleted_at TIMESTAMPTZ
                );

                -- Index for the kind/status list filters (active only)
                CREATE INDEX idx_workflow_records_kind_status
                    ON workflow_records(kind, status)
                    WHERE deleted_at IS NULL;

                -- Index for per-mold history (active only)
                CREATE INDEX idx_workflow_records_mold_id
                    ON workflow_records(mold_id)
                    WHERE deleted_at IS NULL;

                -- Index for "my records" queries (active only)
                CREATE INDEX idx_workflow_records_submitter_id
                    ON workflow_records(submitter_id)
                    WHERE deleted_at IS NULL;

                -- Index for the pending-approval queue, oldest submission first
                CREATE INDEX idx_workflow_records_pending_queue
                    ON workflow_records(submitted_at ASC)
                    WHERE deleted_at IS NULL AND status = 'pending_approval';

                -- Index for listing by creation date (active only)
                CREATE INDEX idx_workflow_records_created_at
                    ON workflow_records(created_at DESC)
                    WHERE deleted_at IS NULL;

                -- Trigger to update updated_at
                CREATE TRIGGER update_workflow_records_updated_at
                    BEFORE UPDATE ON workflow_records
                    FOR EACH ROW
                    EXECUTE FUNCTION update_updated_at_column();
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
                DROP TRIGGER IF EXISTS update_workflow_records_updated_at ON workflow_records;
                DROP TABLE IF EXISTS workflow_records CASCADE;
                "#,
            )
            .await?;

        Ok(())
    }
}
