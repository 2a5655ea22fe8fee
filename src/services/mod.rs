//! Business logic services.

pub mod api_key;
pub mod auth_admin;
pub mod checklist;
pub mod workflow;

pub use auth_admin::configure_routes as configure_auth_routes;
