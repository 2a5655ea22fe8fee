//! Mold scrapping request API handlers.

use actix_web::{HttpResponse, web};
use tracing::info;
use uuid::Uuid;

use crate::auth::ApiKeyAuth;
use crate::db::DbPool;
use crate::error::{AppError, AppResult};
use crate::models::{CreateScrappingRequest, RecordKind, WorkflowAction};
use crate::services::workflow;

use super::records::build_detail;

/// Create a mold scrapping request in draft.
#[utoipa::path(
    post,
    path = "/scrappings",
    tag = "Records",
    request_body = CreateScrappingRequest,
    responses(
        (status = 201, description = "Scrapping request created", body = crate::models::RecordDetailResponse),
        (status = 403, description = "Caller may not create scrapping requests", body = crate::error::ErrorResponse),
        (status = 404, description = "Mold not found", body = crate::error::ErrorResponse),
        (status = 422, description = "Invalid scrapping data", body = crate::error::ErrorResponse),
    ),
    security(
        ("api_key" = [])
    )
)]
pub async fn create_scrapping(
    auth: ApiKeyAuth,
    pool: web::Data<DbPool>,
    body: web::Json<CreateScrappingRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let mold = pool
        .get_mold_by_id(req.mold_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Mold {}", req.mold_id)))?;

    workflow::authorize(RecordKind::Scrapping, WorkflowAction::Create, auth.caller.role)?;

    let title = req.title.trim();
    let mut errors = Vec::new();
    if title.is_empty() {
        errors.push("title must not be empty".to_string());
    }
    errors.extend(req.details.validation_errors());
    if !errors.is_empty() {
        return Err(AppError::validation("Invalid scrapping request", errors));
    }

    let payload = serde_json::to_value(&req.details)?;
    let record = pool
        .insert_record(
            Uuid::now_v7(),
            RecordKind::Scrapping,
            mold.id,
            title,
            auth.caller.key_id,
            &auth.caller.name,
            Some(payload),
        )
        .await?;

    info!(
        "Scrapping request created: id={}, mold={}, by={}",
        record.id, mold.mold_code, auth.caller.name
    );

    let detail = build_detail(&pool, &record).await?;
    Ok(HttpResponse::Created().json(detail))
}

/// Configure scrapping routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/scrappings").route(web::post().to(create_scrapping)));
}
