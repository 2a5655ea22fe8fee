//! Dashboard summary API handler.

use actix_web::{HttpResponse, web};

use crate::auth::ApiKeyAuth;
use crate::db::DbPool;
use crate::error::AppResult;
use crate::models::{
    DashboardSummary, KindCounts, RecordKind, RecordStatus, RecordSummary, StatusCounts,
};

/// Queue length shown on the landing page.
const QUEUE_LIMIT: u64 = 20;

fn status_counts(
    counts: &std::collections::HashMap<(RecordKind, RecordStatus), i64>,
    kind: RecordKind,
) -> StatusCounts {
    let get = |status: RecordStatus| counts.get(&(kind, status)).copied().unwrap_or(0);
    StatusCounts {
        draft: get(RecordStatus::Draft),
        pending_approval: get(RecordStatus::PendingApproval),
        approved: get(RecordStatus::Approved),
        rejected: get(RecordStatus::Rejected),
    }
}

/// Role-based dashboard summary.
///
/// Counts cover every record kind. HQ callers additionally get the
/// pending-approval queue (oldest submission first); field callers get
/// their own open records instead.
#[utoipa::path(
    get,
    path = "/dashboard/summary",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Dashboard summary", body = DashboardSummary),
    ),
    security(
        ("api_key" = [])
    )
)]
pub async fn get_summary(auth: ApiKeyAuth, pool: web::Data<DbPool>) -> AppResult<HttpResponse> {
    let counts = pool.count_records_by_kind_and_status().await?;

    let mut totals = StatusCounts::default();
    let mut by_kind = Vec::with_capacity(RecordKind::ALL.len());
    for kind in RecordKind::ALL {
        let kind_counts = status_counts(&counts, kind);
        totals.draft += kind_counts.draft;
        totals.pending_approval += kind_counts.pending_approval;
        totals.approved += kind_counts.approved;
        totals.rejected += kind_counts.rejected;
        by_kind.push(KindCounts {
            kind,
            counts: kind_counts,
            total: kind_counts.total(),
        });
    }

    let (pending_queue, my_open_records) = if auth.caller.is_hq() {
        let queue = pool
            .list_pending_queue(QUEUE_LIMIT)
            .await?
            .iter()
            .map(RecordSummary::from_model)
            .collect();
        (Some(queue), None)
    } else {
        let own = pool
            .list_open_records_for(auth.caller.key_id, QUEUE_LIMIT)
            .await?
            .iter()
            .map(RecordSummary::from_model)
            .collect();
        (None, Some(own))
    };

    let summary = DashboardSummary {
        totals,
        by_kind,
        pending_queue,
        my_open_records,
    };

    Ok(HttpResponse::Ok().json(summary))
}

/// Configure dashboard routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/dashboard/summary").route(web::get().to(get_summary)));
}
