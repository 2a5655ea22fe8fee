//! Migration: Create check_items table.
//!
//! Checklist line items. Only checklist-kind records own rows here;
//! items are deleted with their record.

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
                CREATE TABLE check_items (
                    id UUID PRIMARY KEY,
                    record_id UUID NOT NULL REFERENCES workflow_records(id) ON DELETE CASCADE,
                    category_code VARCHAR(50) NOT NULL,
                    item_code VARCHAR(50) NOT NULL,
                    label VARCHAR(300) NOT NULL,
                    result VARCHAR(10) NOT NULL DEFAULT 'pending'
                        CHECK (result IN ('pending', 'pass', 'fail', 'na')),
                    photo_required BOOLEAN NOT NULL DEFAULT FALSE,

                    -- JSON array of photo URL strings
                    photo_urls JSONB NOT NULL DEFAULT '[]'::jsonb,

                    notes TEXT,
                    position INTEGER NOT NULL,

                    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),

                    -- Item codes are stable template identifiers, unique per record
                    CONSTRAINT uq_check_items_record_item_code UNIQUE (record_id, item_code)
                );

                -- Index for loading a record's items in display order
                CREATE INDEX idx_check_items_record_id ON check_items(record_id, position);

                -- Trigger to update updated_at
                CREATE TRIGGER update_check_items_updated_at
                    BEFORE UPDATE ON check_items
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
                DROP TRIGGER IF EXISTS update_check_items_updated_at ON check_items;
                DROP TABLE IF EXISTS check_items CASCADE;
                "#,
            )
            .await?;

        Ok(())
    }
}
