//! Shipment checklist API handlers.

use actix_web::{HttpResponse, web};
use tracing::info;
use uuid::Uuid;

use crate::auth::ApiKeyAuth;
use crate::db::DbPool;
use crate::error::{AppError, AppResult};
use crate::models::{CreateChecklistRequest, RecordKind, WorkflowAction};
use crate::services::{checklist, workflow};

use super::records::build_detail;

/// Create a shipment checklist in draft.
///
/// When no custom items are supplied the standard shipment template is
/// instantiated. The caller becomes the record's submitter.
#[utoipa::path(
    post,
    path = "/checklists",
    tag = "Records",
    request_body = CreateChecklistRequest,
    responses(
        (status = 201, description = "Checklist created", body = crate::models::RecordDetailResponse),
        (status = 403, description = "Caller may not create checklists", body = crate::error::ErrorResponse),
        (status = 404, description = "Mold not found", body = crate::error::ErrorResponse),
        (status = 422, description = "Invalid checklist data", body = crate::error::ErrorResponse),
    ),
    security(
        ("api_key" = [])
    )
)]
pub async fn create_checklist(
    auth: ApiKeyAuth,
    pool: web::Data<DbPool>,
    body: web::Json<CreateChecklistRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let mold = pool
        .get_mold_by_id(req.mold_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Mold {}", req.mold_id)))?;

    workflow::authorize(RecordKind::Checklist, WorkflowAction::Create, auth.caller.role)?;

    let title = req.title.trim();
    if title.is_empty() {
        return Err(AppError::validation(
            "Invalid checklist",
            vec!["title must not be empty".to_string()],
        ));
    }

    let items = match req.items {
        Some(custom) => {
            let errors = checklist::validate_custom_items(&custom);
            if !errors.is_empty() {
                return Err(AppError::validation("Invalid checklist items", errors));
            }
            custom
        }
        None => checklist::shipment_template_items(),
    };

    let record_id = Uuid::now_v7();
    let record = pool
        .insert_record(
            record_id,
            RecordKind::Checklist,
            mold.id,
            title,
            auth.caller.key_id,
            &auth.caller.name,
            None,
        )
        .await?;
    pool.insert_check_items(record.id, &items).await?;

    info!(
        "Checklist created: id={}, mold={}, items={}, by={}",
        record.id,
        mold.mold_code,
        items.len(),
        auth.caller.name
    );

    let detail = build_detail(&pool, &record).await?;
    Ok(HttpResponse::Created().json(detail))
}

/// Configure checklist routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/checklists").route(web::post().to(create_checklist)));
}
