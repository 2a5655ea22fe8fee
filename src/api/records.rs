//! Workflow record API handlers.
//!
//! Read endpoints plus the transition endpoints (submit, approve, reject,
//! reopen, ship). Transition rules live in `services::workflow`; handlers
//! only translate between HTTP and the engine.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use crate::auth::ApiKeyAuth;
use crate::db::DbPool;
use crate::entity::workflow_record;
use crate::error::{AppError, AppResult};
use crate::models::{
    ApprovalEventResponse, CheckItemResponse, DecisionRequest, EventListResponse, ItemProgress,
    ListRecordsQuery, RecordDetailResponse, RecordDetails, RecordKind, RecordListResponse,
    RecordStatus, RecordSummary, TransitionResponse, UpdateCheckItemRequest,
};
use crate::services::workflow::{self, Decision};

/// Assemble the full detail response for a record.
///
/// Items and progress are populated for checklist records only; other
/// kinds carry their typed details payload instead.
pub(crate) async fn build_detail(
    pool: &DbPool,
    record: &workflow_record::Model,
) -> AppResult<RecordDetailResponse> {
    let kind = RecordKind::parse(&record.kind).unwrap_or(RecordKind::Checklist);
    let status = RecordStatus::parse(&record.status).unwrap_or(RecordStatus::Draft);

    let (items, progress) = if kind == RecordKind::Checklist {
        let models = pool.list_check_items(record.id).await?;
        let progress = ItemProgress::scan(&models);
        let items = models.iter().map(CheckItemResponse::from_model).collect();
        (items, Some(progress))
    } else {
        (Vec::new(), None)
    };

    let events = pool
        .list_approval_events(record.id)
        .await?
        .iter()
        .map(ApprovalEventResponse::from_model)
        .collect();

    Ok(RecordDetailResponse {
        id: record.id,
        kind,
        mold_id: record.mold_id,
        title: record.title.clone(),
        status,
        submitter_id: record.submitter_id,
        submitter_name: record.submitter_name.clone(),
        approver_name: record.approver_name.clone(),
        rejection_reason: record.rejection_reason.clone(),
        details: RecordDetails::from_json(kind, record.details.as_ref()),
        items,
        progress,
        events,
        shipped_at: record.shipped_at,
        created_at: record.created_at,
        submitted_at: record.submitted_at,
        decided_at: record.decided_at,
        updated_at: record.updated_at,
    })
}

fn transition_response(record: &workflow_record::Model) -> TransitionResponse {
    TransitionResponse {
        id: record.id,
        status: RecordStatus::parse(&record.status).unwrap_or(RecordStatus::Draft),
        shipped_at: record.shipped_at,
    }
}

async fn load_record(pool: &DbPool, record_id: Uuid) -> AppResult<workflow_record::Model> {
    pool.get_record_by_id(record_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Record {}", record_id)))
}

/// List workflow records across all kinds.
#[utoipa::path(
    get,
    path = "/records",
    tag = "Records",
    params(
        ("kind" = Option<String>, Query, description = "Filter by record kind"),
        ("status" = Option<String>, Query, description = "Filter by lifecycle status"),
        ("mold_id" = Option<Uuid>, Query, description = "Filter by mold"),
        ("submitter_id" = Option<Uuid>, Query, description = "Filter by submitter key ID"),
        ("limit" = Option<i32>, Query, description = "Results per page (default 20, max 100)"),
        ("offset" = Option<i32>, Query, description = "Pagination offset")
    ),
    responses(
        (status = 200, description = "List of records", body = RecordListResponse),
    ),
    security(
        ("api_key" = [])
    )
)]
pub async fn list_records(
    _auth: ApiKeyAuth,
    pool: web::Data<DbPool>,
    query: web::Query<ListRecordsQuery>,
) -> AppResult<HttpResponse> {
    let query = query.into_inner().normalized();
    let (records, total) = pool.list_records(&query).await?;

    let response = RecordListResponse {
        records: records.iter().map(RecordSummary::from_model).collect(),
        total: total as i64,
        limit: query.limit,
        offset: query.offset,
    };

    Ok(HttpResponse::Ok().json(response))
}

/// Get a single record with items, details, progress and history.
#[utoipa::path(
    get,
    path = "/records/{record_id}",
    tag = "Records",
    params(
        ("record_id" = Uuid, Path, description = "Record ID")
    ),
    responses(
        (status = 200, description = "Record detail", body = RecordDetailResponse),
        (status = 404, description = "Record not found", body = crate::error::ErrorResponse),
    ),
    security(
        ("api_key" = [])
    )
)]
pub async fn get_record(
    _auth: ApiKeyAuth,
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let record = load_record(&pool, path.into_inner()).await?;
    let detail = build_detail(&pool, &record).await?;
    Ok(HttpResponse::Ok().json(detail))
}

/// Answer a checklist item on a draft record.
///
/// Patch semantics: omitted notes/photo_urls keep their stored value.
#[utoipa::path(
    put,
    path = "/records/{record_id}/items/{item_id}",
    tag = "Records",
    params(
        ("record_id" = Uuid, Path, description = "Record ID"),
        ("item_id" = Uuid, Path, description = "Checklist item ID")
    ),
    request_body = UpdateCheckItemRequest,
    responses(
        (status = 200, description = "Item updated", body = CheckItemResponse),
        (status = 403, description = "Caller may not update this record", body = crate::error::ErrorResponse),
        (status = 404, description = "Record or item not found", body = crate::error::ErrorResponse),
        (status = 409, description = "Record is not in draft", body = crate::error::ErrorResponse),
        (status = 422, description = "Invalid item update", body = crate::error::ErrorResponse),
    ),
    security(
        ("api_key" = [])
    )
)]
pub async fn update_check_item(
    auth: ApiKeyAuth,
    pool: web::Data<DbPool>,
    path: web::Path<(Uuid, Uuid)>,
    body: web::Json<UpdateCheckItemRequest>,
) -> AppResult<HttpResponse> {
    let (record_id, item_id) = path.into_inner();
    let item =
        workflow::update_item(&pool, record_id, item_id, &auth.caller, &body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(CheckItemResponse::from_model(&item)))
}

/// Submit a draft record for approval.
#[utoipa::path(
    post,
    path = "/records/{record_id}/submit",
    tag = "Records",
    params(
        ("record_id" = Uuid, Path, description = "Record ID")
    ),
    responses(
        (status = 200, description = "Record submitted", body = TransitionResponse),
        (status = 403, description = "Caller may not submit this record", body = crate::error::ErrorResponse),
        (status = 404, description = "Record not found", body = crate::error::ErrorResponse),
        (status = 409, description = "Record is not in draft", body = crate::error::ErrorResponse),
        (status = 422, description = "Record is not ready for submission", body = crate::error::ErrorResponse),
    ),
    security(
        ("api_key" = [])
    )
)]
pub async fn submit_record(
    auth: ApiKeyAuth,
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let record = workflow::submit(&pool, path.into_inner(), &auth.caller).await?;
    Ok(HttpResponse::Ok().json(transition_response(&record)))
}

/// Approve a pending record.
#[utoipa::path(
    post,
    path = "/records/{record_id}/approve",
    tag = "Records",
    params(
        ("record_id" = Uuid, Path, description = "Record ID")
    ),
    request_body = DecisionRequest,
    responses(
        (status = 200, description = "Record approved", body = TransitionResponse),
        (status = 403, description = "Caller may not decide records", body = crate::error::ErrorResponse),
        (status = 404, description = "Record not found", body = crate::error::ErrorResponse),
        (status = 409, description = "Record is not pending approval", body = crate::error::ErrorResponse),
    ),
    security(
        ("api_key" = [])
    )
)]
pub async fn approve_record(
    auth: ApiKeyAuth,
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
    body: Option<web::Json<DecisionRequest>>,
) -> AppResult<HttpResponse> {
    let reason = body.and_then(|b| b.into_inner().reason);
    let record = workflow::decide(
        &pool,
        path.into_inner(),
        &auth.caller,
        Decision::Approve,
        reason.as_deref(),
    )
    .await?;
    Ok(HttpResponse::Ok().json(transition_response(&record)))
}

/// Reject a pending record with a reason.
#[utoipa::path(
    post,
    path = "/records/{record_id}/reject",
    tag = "Records",
    params(
        ("record_id" = Uuid, Path, description = "Record ID")
    ),
    request_body = DecisionRequest,
    responses(
        (status = 200, description = "Record rejected", body = TransitionResponse),
        (status = 403, description = "Caller may not decide records", body = crate::error::ErrorResponse),
        (status = 404, description = "Record not found", body = crate::error::ErrorResponse),
        (status = 409, description = "Record is not pending approval", body = crate::error::ErrorResponse),
        (status = 422, description = "Rejection reason missing", body = crate::error::ErrorResponse),
    ),
    security(
        ("api_key" = [])
    )
)]
pub async fn reject_record(
    auth: ApiKeyAuth,
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
    body: Option<web::Json<DecisionRequest>>,
) -> AppResult<HttpResponse> {
    let reason = body.and_then(|b| b.into_inner().reason);
    let record = workflow::decide(
        &pool,
        path.into_inner(),
        &auth.caller,
        Decision::Reject,
        reason.as_deref(),
    )
    .await?;
    Ok(HttpResponse::Ok().json(transition_response(&record)))
}

/// Reopen a rejected record for rework.
#[utoipa::path(
    post,
    path = "/records/{record_id}/reopen",
    tag = "Records",
    params(
        ("record_id" = Uuid, Path, description = "Record ID")
    ),
    responses(
        (status = 200, description = "Record reopened as draft", body = TransitionResponse),
        (status = 403, description = "Caller may not reopen this record", body = crate::error::ErrorResponse),
        (status = 404, description = "Record not found", body = crate::error::ErrorResponse),
        (status = 409, description = "Record is not rejected", body = crate::error::ErrorResponse),
    ),
    security(
        ("api_key" = [])
    )
)]
pub async fn reopen_record(
    auth: ApiKeyAuth,
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let record = workflow::reopen(&pool, path.into_inner(), &auth.caller).await?;
    Ok(HttpResponse::Ok().json(transition_response(&record)))
}

/// Mark an approved shipment checklist as shipped.
#[utoipa::path(
    post,
    path = "/records/{record_id}/ship",
    tag = "Records",
    params(
        ("record_id" = Uuid, Path, description = "Record ID")
    ),
    responses(
        (status = 200, description = "Record marked shipped", body = TransitionResponse),
        (status = 403, description = "Caller may not mark shipments", body = crate::error::ErrorResponse),
        (status = 404, description = "Record not found", body = crate::error::ErrorResponse),
        (status = 409, description = "Record is not approved or already shipped", body = crate::error::ErrorResponse),
        (status = 422, description = "Record is not a shipment checklist", body = crate::error::ErrorResponse),
    ),
    security(
        ("api_key" = [])
    )
)]
pub async fn ship_record(
    auth: ApiKeyAuth,
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let record = workflow::mark_shipped(&pool, path.into_inner(), &auth.caller).await?;
    Ok(HttpResponse::Ok().json(transition_response(&record)))
}

/// Get item progress counters for a checklist record.
#[utoipa::path(
    get,
    path = "/records/{record_id}/progress",
    tag = "Records",
    params(
        ("record_id" = Uuid, Path, description = "Record ID")
    ),
    responses(
        (status = 200, description = "Item progress", body = ItemProgress),
        (status = 404, description = "Record not found", body = crate::error::ErrorResponse),
        (status = 422, description = "Record is not a checklist", body = crate::error::ErrorResponse),
    ),
    security(
        ("api_key" = [])
    )
)]
pub async fn get_record_progress(
    _auth: ApiKeyAuth,
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let record_id = path.into_inner();
    let record = load_record(&pool, record_id).await?;

    let kind = RecordKind::parse(&record.kind).unwrap_or(RecordKind::Checklist);
    if kind != RecordKind::Checklist {
        return Err(AppError::validation(
            "Only checklist records carry items",
            vec![format!("record {} is a {} record", record_id, kind)],
        ));
    }

    let items = pool.list_check_items(record.id).await?;
    Ok(HttpResponse::Ok().json(ItemProgress::scan(&items)))
}

/// Get the approval history of a record, oldest first.
#[utoipa::path(
    get,
    path = "/records/{record_id}/events",
    tag = "Records",
    params(
        ("record_id" = Uuid, Path, description = "Record ID")
    ),
    responses(
        (status = 200, description = "Approval history", body = EventListResponse),
        (status = 404, description = "Record not found", body = crate::error::ErrorResponse),
    ),
    security(
        ("api_key" = [])
    )
)]
pub async fn get_record_events(
    _auth: ApiKeyAuth,
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let record = load_record(&pool, path.into_inner()).await?;

    let events = pool
        .list_approval_events(record.id)
        .await?
        .iter()
        .map(ApprovalEventResponse::from_model)
        .collect();

    Ok(HttpResponse::Ok().json(EventListResponse { events }))
}

/// Configure record routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/records").route(web::get().to(list_records)))
        .service(web::resource("/records/{record_id}").route(web::get().to(get_record)))
        .service(
            web::resource("/records/{record_id}/items/{item_id}")
                .route(web::put().to(update_check_item)),
        )
        .service(web::resource("/records/{record_id}/submit").route(web::post().to(submit_record)))
        .service(
            web::resource("/records/{record_id}/approve").route(web::post().to(approve_record)),
        )
        .service(web::resource("/records/{record_id}/reject").route(web::post().to(reject_record)))
        .service(web::resource("/records/{record_id}/reopen").route(web::post().to(reopen_record)))
        .service(web::resource("/records/{record_id}/ship").route(web::post().to(ship_record)))
        .service(
            web::resource("/records/{record_id}/progress")
                .route(web::get().to(get_record_progress)),
        )
        .service(
            web::resource("/records/{record_id}/events").route(web::get().to(get_record_events)),
        );
}
