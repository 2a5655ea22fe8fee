//! Migration: Create api_keys table.
//!
//! API keys for authentication with role-based access control. Keys are
//! stored as SHA-256 hashes; revocation is a soft delete so the audit
//! trail keeps pointing at a real row.

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
                CREATE TABLE api_keys (
                    id UUID PRIMARY KEY,
                    key_hash VARCHAR(64) NOT NULL UNIQUE,
                    key_prefix VARCHAR(12) NOT NULL,
                    name VARCHAR(100) NOT NULL,
                    role VARCHAR(20) NOT NULL DEFAULT 'plant'
                        CHECK (role IN ('system_admin', 'mold_developer', 'maker', 'plant')),

                    expires_at TIMESTAMPTZ,
                    last_used_at TIMESTAMPTZ,

                    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                    deleted_at TIMESTAMPTZ
                );

                -- Index for prefix lookup (showing key prefix in listings)
                CREATE INDEX idx_api_keys_key_prefix ON api_keys(key_prefix);

                -- Index for soft-delete queries
                CREATE INDEX idx_api_keys_deleted_at ON api_keys(deleted_at)
                    WHERE deleted_at IS NULL;
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
                DROP TABLE IF EXISTS api_keys CASCADE;
                "#,
            )
            .await?;

        Ok(())
    }
}
