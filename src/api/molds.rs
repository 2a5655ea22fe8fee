//! Mold registry API handlers.

use actix_web::{HttpResponse, web};
use tracing::info;
use uuid::Uuid;

use crate::auth::ApiKeyAuth;
use crate::db::DbPool;
use crate::error::{AppError, AppResult};
use crate::models::{
    ListMoldsQuery, MoldListResponse, MoldResponse, RegisterMoldRequest, UpdateMoldStatusRequest,
};

/// Register a new mold.
///
/// Restricted to HQ roles (system_admin, mold_developer). The mold code
/// must be unique across the registry.
#[utoipa::path(
    post,
    path = "/molds",
    tag = "Molds",
    request_body = RegisterMoldRequest,
    responses(
        (status = 201, description = "Mold registered", body = MoldResponse),
        (status = 403, description = "Caller may not register molds", body = crate::error::ErrorResponse),
        (status = 422, description = "Invalid mold data", body = crate::error::ErrorResponse),
    ),
    security(
        ("api_key" = [])
    )
)]
pub async fn register_mold(
    auth: ApiKeyAuth,
    pool: web::Data<DbPool>,
    body: web::Json<RegisterMoldRequest>,
) -> AppResult<HttpResponse> {
    if !auth.caller.is_hq() {
        return Err(AppError::PermissionDenied(format!(
            "Role {} may not register molds",
            auth.caller.role
        )));
    }

    let req = body.into_inner();

    let errors = req.validation_errors();
    if !errors.is_empty() {
        return Err(AppError::validation("Invalid mold registration", errors));
    }

    let code = req.mold_code.trim();
    if pool.find_mold_by_code(code).await?.is_some() {
        return Err(AppError::validation(
            "Invalid mold registration",
            vec![format!("mold_code '{}' is already registered", code)],
        ));
    }

    let mold = pool.insert_mold(&req).await?;

    info!(
        "Mold registered: id={}, code={}, by={}",
        mold.id, mold.mold_code, auth.caller.name
    );

    Ok(HttpResponse::Created().json(MoldResponse::from_model(&mold)))
}

/// List molds with pagination and filtering.
#[utoipa::path(
    get,
    path = "/molds",
    tag = "Molds",
    params(
        ("status" = Option<String>, Query, description = "Filter by mold status"),
        ("plant" = Option<String>, Query, description = "Filter by plant name"),
        ("limit" = Option<i32>, Query, description = "Results per page (default 20, max 100)"),
        ("offset" = Option<i32>, Query, description = "Pagination offset")
    ),
    responses(
        (status = 200, description = "List of molds", body = MoldListResponse),
    ),
    security(
        ("api_key" = [])
    )
)]
pub async fn list_molds(
    _auth: ApiKeyAuth,
    pool: web::Data<DbPool>,
    query: web::Query<ListMoldsQuery>,
) -> AppResult<HttpResponse> {
    let query = query.into_inner().normalized();
    let (molds, total) = pool.list_molds(&query).await?;

    let response = MoldListResponse {
        molds: molds.iter().map(MoldResponse::from_model).collect(),
        total: total as i64,
        limit: query.limit,
        offset: query.offset,
    };

    Ok(HttpResponse::Ok().json(response))
}

/// Get a single mold by ID.
#[utoipa::path(
    get,
    path = "/molds/{mold_id}",
    tag = "Molds",
    params(
        ("mold_id" = Uuid, Path, description = "Mold ID")
    ),
    responses(
        (status = 200, description = "Mold detail", body = MoldResponse),
        (status = 404, description = "Mold not found", body = crate::error::ErrorResponse),
    ),
    security(
        ("api_key" = [])
    )
)]
pub async fn get_mold(
    _auth: ApiKeyAuth,
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let mold_id = path.into_inner();
    let mold = pool
        .get_mold_by_id(mold_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Mold {}", mold_id)))?;

    Ok(HttpResponse::Ok().json(MoldResponse::from_model(&mold)))
}

/// Update a mold's lifecycle status.
///
/// Restricted to HQ roles. Status moves between active, under_repair and
/// scrapped; workflow approvals do not change it automatically.
#[utoipa::path(
    put,
    path = "/molds/{mold_id}/status",
    tag = "Molds",
    params(
        ("mold_id" = Uuid, Path, description = "Mold ID")
    ),
    request_body = UpdateMoldStatusRequest,
    responses(
        (status = 200, description = "Status updated", body = MoldResponse),
        (status = 403, description = "Caller may not update mold status", body = crate::error::ErrorResponse),
        (status = 404, description = "Mold not found", body = crate::error::ErrorResponse),
    ),
    security(
        ("api_key" = [])
    )
)]
pub async fn update_mold_status(
    auth: ApiKeyAuth,
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
    body: web::Json<UpdateMoldStatusRequest>,
) -> AppResult<HttpResponse> {
    if !auth.caller.is_hq() {
        return Err(AppError::PermissionDenied(format!(
            "Role {} may not update mold status",
            auth.caller.role
        )));
    }

    let mold_id = path.into_inner();
    let mold = pool.update_mold_status(mold_id, body.status).await?;

    info!(
        "Mold status updated: id={}, status={}, by={}",
        mold.id, mold.status, auth.caller.name
    );

    Ok(HttpResponse::Ok().json(MoldResponse::from_model(&mold)))
}

/// Configure mold routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/molds")
            .route(web::get().to(list_molds))
            .route(web::post().to(register_mold)),
    )
    .service(web::resource("/molds/{mold_id}").route(web::get().to(get_mold)))
    .service(web::resource("/molds/{mold_id}/status").route(web::put().to(update_mold_status)));
}
