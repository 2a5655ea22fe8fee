//! Domain models and DTOs for the mold lifecycle API.

pub mod api_key;
pub mod approval_event;
pub mod check_item;
pub mod dashboard;
pub mod details;
pub mod mold;
pub mod record;

// Re-export commonly used types
pub use api_key::{
    ApiKeyCreateResponse, ApiKeyListItem, AuthenticatedCaller, CreateApiKeyRequest, UserRole,
};
pub use approval_event::{ApprovalEventResponse, EventAction, EventListResponse};
pub use check_item::{
    CheckItemResponse, ItemProgress, ItemResult, NewCheckItem, UpdateCheckItemRequest,
};
pub use dashboard::{DashboardSummary, KindCounts, StatusCounts};
pub use details::{RecordDetails, RepairDetails, ScrapDetails, TransferDetails};
pub use mold::{
    ListMoldsQuery, MoldListResponse, MoldResponse, MoldStatus, RegisterMoldRequest,
    UpdateMoldStatusRequest,
};
pub use record::{
    CreateChecklistRequest, CreateRepairRequest, CreateScrappingRequest, CreateTransferRequest,
    DecisionRequest, ListRecordsQuery, RecordDetailResponse, RecordKind, RecordListResponse,
    RecordStatus, RecordSummary, TransitionResponse, WorkflowAction,
};
