//! OpenAPI documentation configuration.

use utoipa::OpenApi;

use crate::{api, error, models, services};

/// OpenAPI documentation.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "MoldTrack Server",
        version = "0.3.0",
        description = "API server for the mold lifecycle: shipment checklists, transfer, repair and scrapping requests moving through a draft / approval workflow"
    ),
    servers(
        (url = "/", description = "Local server")
    ),
    paths(
        // Health endpoints
        api::health::health,
        api::health::ready,
        // Mold registry
        api::molds::register_mold,
        api::molds::list_molds,
        api::molds::get_mold,
        api::molds::update_mold_status,
        // Record creation
        api::checklists::create_checklist,
        api::transfers::create_transfer,
        api::repairs::create_repair,
        api::scrappings::create_scrapping,
        // Records and transitions
        api::records::list_records,
        api::records::get_record,
        api::records::update_check_item,
        api::records::submit_record,
        api::records::approve_record,
        api::records::reject_record,
        api::records::reopen_record,
        api::records::ship_record,
        api::records::get_record_progress,
        api::records::get_record_events,
        // Dashboard
        api::dashboard::get_summary,
        // Auth endpoints
        services::auth_admin::create_api_key,
        services::auth_admin::list_api_keys,
        services::auth_admin::get_api_key,
        services::auth_admin::revoke_api_key,
        services::auth_admin::restore_api_key,
    ),
    components(
        schemas(
            // Common
            error::ErrorResponse,
            // Health
            api::health::HealthResponse,
            api::health::ReadyResponse,
            // Molds
            models::MoldStatus,
            models::RegisterMoldRequest,
            models::UpdateMoldStatusRequest,
            models::MoldResponse,
            models::MoldListResponse,
            models::ListMoldsQuery,
            // Records
            models::RecordKind,
            models::RecordStatus,
            models::CreateChecklistRequest,
            models::CreateTransferRequest,
            models::CreateRepairRequest,
            models::CreateScrappingRequest,
            models::DecisionRequest,
            models::RecordSummary,
            models::RecordListResponse,
            models::RecordDetailResponse,
            models::ListRecordsQuery,
            models::TransitionResponse,
            // Kind-specific details
            models::RecordDetails,
            models::TransferDetails,
            models::RepairDetails,
            models::ScrapDetails,
            // Checklist items
            models::ItemResult,
            models::NewCheckItem,
            models::UpdateCheckItemRequest,
            models::CheckItemResponse,
            models::ItemProgress,
            // Approval history
            models::EventAction,
            models::ApprovalEventResponse,
            models::EventListResponse,
            // Dashboard
            models::StatusCounts,
            models::KindCounts,
            models::DashboardSummary,
            // Auth
            models::UserRole,
            models::ApiKeyCreateResponse,
            models::ApiKeyListItem,
            models::CreateApiKeyRequest,
            services::auth_admin::ListApiKeysResponse,
            services::auth_admin::RevokeApiKeyResponse,
            services::auth_admin::RestoreApiKeyResponse,
        )
    ),
    tags(
        (name = "Health", description = "Health check endpoints"),
        (name = "Molds", description = "Mold registry"),
        (name = "Records", description = "Workflow records and transitions"),
        (name = "Dashboard", description = "Role-based summary"),
        (name = "Auth", description = "API key management")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

/// Add API key security scheme.
struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "api_key",
                utoipa::openapi::security::SecurityScheme::ApiKey(
                    utoipa::openapi::security::ApiKey::Header(
                        utoipa::openapi::security::ApiKeyValue::new("X-API-Key"),
                    ),
                ),
            );
        }
    }
}
