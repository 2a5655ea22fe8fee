//! Workflow E2E test suite.
//!
//! Exercises the approval workflow end-to-end against a real database.
//! Requires a running PostgreSQL database; tests are marked `#[ignore]`
//! so the default `cargo test` run stays database-free.
//!
//! Run with: cargo test --test workflow_e2e -- --ignored

mod test_helpers;

mod test_api_keys;
mod test_auth;
mod test_checklist_flow;
mod test_molds;
mod test_records_api;
