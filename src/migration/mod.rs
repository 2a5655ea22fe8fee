//! SeaORM database migrations.

pub use sea_orm_migration::prelude::*;

mod m20260601_000001_create_molds;
mod m20260601_000002_create_workflow_records;
mod m20260601_000003_create_check_items;
mod m20260601_000004_create_approval_events;
mod m20260601_000005_create_api_keys;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260601_000001_create_molds::Migration),
            Box::new(m20260601_000002_create_workflow_records::Migration),
            Box::new(m20260601_000003_create_check_items::Migration),
            Box::new(m20260601_000004_create_approval_events::Migration),
            Box::new(m20260601_000005_create_api_keys::Migration),
        ]
    }
}
