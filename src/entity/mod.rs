//! SeaORM entity definitions for PostgreSQL database.

pub mod api_key;
pub mod approval_event;
pub mod check_item;
pub mod mold;
pub mod workflow_record;
