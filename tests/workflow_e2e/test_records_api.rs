//! E2E tests: record listing, detail shape and dashboard.

use super::test_helpers::*;
use serde_json::Value;

#[actix_rt::test]
#[ignore = "requires a running PostgreSQL database"]
async fn test_list_records_filters() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;

    let maker_key = create_role_key(&app, "Daesung QA", "maker").await;
    let mold_id = create_test_mold(&app).await;

    create_test_checklist(&app, &maker_key, &mold_id).await;
    let (status, _) = api_post(
        &app,
        "/api/v1/repairs",
        &maker_key,
        serde_json::json!({
            "mold_id": mold_id,
            "title": "Vent blocked",
            "fault_description": "Vent channel blocked with residue",
            "requested_action": "Clean and polish",
        }),
    )
    .await;
    assert_eq!(status, 201);

    // All records for this mold
    let (status, body) = api_get(
        &app,
        &format!("/api/v1/records?mold_id={}", mold_id),
        &maker_key,
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(body["total"], 2, "expected both records: {}", body);

    // Narrowed by kind
    let (status, body) = api_get(
        &app,
        &format!("/api/v1/records?mold_id={}&kind=repair", mold_id),
        &maker_key,
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(body["total"], 1);
    assert_eq!(body["records"][0]["kind"], "repair");

    // Narrowed by status with no matches
    let (status, body) = api_get(
        &app,
        &format!("/api/v1/records?mold_id={}&status=approved", mold_id),
        &maker_key,
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(body["total"], 0);
}

#[actix_rt::test]
#[ignore = "requires a running PostgreSQL database"]
async fn test_detail_shape_differs_by_kind() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;

    let maker_key = create_role_key(&app, "Daesung QA", "maker").await;
    let mold_id = create_test_mold(&app).await;

    let checklist = create_test_checklist(&app, &maker_key, &mold_id).await;
    assert!(checklist["progress"].is_object());
    assert!(checklist["details"].is_null());
    assert_eq!(checklist["items"].as_array().unwrap().len(), 10);

    let (_, repair) = api_post(
        &app,
        "/api/v1/repairs",
        &maker_key,
        serde_json::json!({
            "mold_id": mold_id,
            "title": "Vent blocked",
            "fault_description": "Vent channel blocked with residue",
            "requested_action": "Clean and polish",
        }),
    )
    .await;
    assert!(repair["progress"].is_null());
    assert!(repair["items"].as_array().unwrap().is_empty());
    assert_eq!(
        repair["details"]["fault_description"],
        "Vent channel blocked with residue"
    );
}

#[actix_rt::test]
#[ignore = "requires a running PostgreSQL database"]
async fn test_item_endpoints_reject_non_checklist_kinds() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;

    let maker_key = create_role_key(&app, "Daesung QA", "maker").await;
    let mold_id = create_test_mold(&app).await;

    let (_, repair) = api_post(
        &app,
        "/api/v1/repairs",
        &maker_key,
        serde_json::json!({
            "mold_id": mold_id,
            "title": "Vent blocked",
            "fault_description": "Vent channel blocked with residue",
            "requested_action": "Clean and polish",
        }),
    )
    .await;
    let record_id = repair["id"].as_str().unwrap();

    let (status, body) = api_get(
        &app,
        &format!("/api/v1/records/{}/progress", record_id),
        &maker_key,
    )
    .await;
    assert_eq!(status, 422, "progress on repair must fail: {}", body);

    let (status, body) = api_put(
        &app,
        &format!(
            "/api/v1/records/{}/items/{}",
            record_id,
            uuid::Uuid::new_v4()
        ),
        &maker_key,
        serde_json::json!({ "result": "pass" }),
    )
    .await;
    assert_eq!(status, 422, "item update on repair must fail: {}", body);
}

#[actix_rt::test]
#[ignore = "requires a running PostgreSQL database"]
async fn test_unknown_record_returns_not_found() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;

    let maker_key = create_role_key(&app, "Daesung QA", "maker").await;
    let missing = uuid::Uuid::new_v4();

    let (status, body) = api_get(&app, &format!("/api/v1/records/{}", missing), &maker_key).await;
    assert_eq!(status, 404);
    assert_eq!(body["error"], "NOT_FOUND");

    let (status, _) = api_post_empty(
        &app,
        &format!("/api/v1/records/{}/submit", missing),
        &maker_key,
    )
    .await;
    assert_eq!(status, 404);
}

#[actix_rt::test]
#[ignore = "requires a running PostgreSQL database"]
async fn test_dashboard_summary_by_role() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;

    let maker_key = create_role_key(&app, "Daesung QA", "maker").await;
    let dev_key = create_role_key(&app, "HQ tooling", "mold_developer").await;
    let mold_id = create_test_mold(&app).await;

    // One draft owned by this maker
    let checklist = create_test_checklist(&app, &maker_key, &mold_id).await;
    let record_id = checklist["id"].as_str().unwrap();

    // Field caller sees their open records, not the approval queue
    let (status, body) = api_get(&app, "/api/v1/dashboard/summary", &maker_key).await;
    assert_eq!(status, 200);
    assert!(body["pending_queue"].is_null());
    let own: Vec<&str> = body["my_open_records"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r: &Value| r["id"].as_str().unwrap())
        .collect();
    assert!(
        own.contains(&record_id),
        "draft should appear in my_open_records: {}",
        body
    );

    // HQ caller sees the approval queue instead
    let (status, body) = api_get(&app, "/api/v1/dashboard/summary", &dev_key).await;
    assert_eq!(status, 200);
    assert!(body["my_open_records"].is_null());
    assert!(body["pending_queue"].is_array());
    assert!(body["totals"]["draft"].as_i64().unwrap() >= 1);
    assert_eq!(body["by_kind"].as_array().unwrap().len(), 4);
}
