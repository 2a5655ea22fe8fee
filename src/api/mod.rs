//! HTTP API handlers.

pub mod checklists;
pub mod dashboard;
pub mod health;
pub mod molds;
pub mod openapi;
pub mod records;
pub mod repairs;
pub mod scrappings;
pub mod transfers;

pub use checklists::configure_routes as configure_checklist_routes;
pub use dashboard::configure_routes as configure_dashboard_routes;
pub use health::configure_health_routes;
pub use molds::configure_routes as configure_mold_routes;
pub use openapi::ApiDoc;
pub use records::configure_routes as configure_record_routes;
pub use repairs::configure_routes as configure_repair_routes;
pub use scrappings::configure_routes as configure_scrapping_routes;
pub use transfers::configure_routes as configure_transfer_routes;
