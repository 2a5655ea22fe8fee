//! Migration: Create molds table and shared trigger function.
//!
//! Molds are the physical assets every workflow record points at.
//! Also creates the shared updated_at trigger function.

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
                -- Shared trigger function for updated_at
                CREATE OR REPLACE FUNCTION update_updated_at_column()
                RETURNS TRIGGER AS $$
                BEGIN
                    NEW.updated_at = NOW();
                    RETURN NEW;
                END;
                $$ LANGUAGE plpgsql;

                -- Mold registry
                CREATE TABLE molds (
                    id UUID PRIMARY KEY,
                    mold_code VARCHAR(50) NOT NULL,
                    name VARCHAR(200) NOT NULL,
                    maker_name VARCHAR(100) NOT NULL,
                    plant_name VARCHAR(100) NOT NULL,
                    status VARCHAR(20) NOT NULL DEFAULT 'active'
                        CHECK (status IN ('active', 'under_repair', 'scrapped')),
                    cavity_count INTEGER
                        CHECK (cavity_count IS NULL OR cavity_count > 0),

                    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                    deleted_at TIMESTAMPTZ
                );

                -- Mold codes are unique among active molds
                CREATE UNIQUE INDEX idx_molds_mold_code_active
                    ON molds(mold_code)
                    WHERE deleted_at IS NULL;

                -- Index for filtering by plant (active only)
                CREATE INDEX idx_molds_plant_name ON molds(plant_name)
                    WHERE deleted_at IS NULL;

                -- Index for filtering by status (active only)
                CREATE INDEX idx_molds_status ON molds(status)
                    WHERE deleted_at IS NULL;

                -- Trigger to update updated_at
                CREATE TRIGGER update_molds_updated_at
                    BEFORE UPDATE ON molds
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
                DROP TRIGGER IF EXISTS update_molds_updated_at ON molds;
                DROP TABLE IF EXISTS molds CASCADE;
                DROP FUNCTION IF EXISTS update_updated_at_column();
                "#,
            )
            .await?;

        Ok(())
    }
}
