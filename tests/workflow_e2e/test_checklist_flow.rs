//! E2E tests: shipment checklist lifecycle.
//!
//! Covers the full maker-side flow: create from template, answer items,
//! submit, and the HQ-side decision and shipment marking.

use super::test_helpers::*;
use serde_json::Value;

#[actix_rt::test]
#[ignore = "requires a running PostgreSQL database"]
async fn test_checklist_created_from_template() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;

    let maker_key = create_role_key(&app, "Daesung QA", "maker").await;
    let mold_id = create_test_mold(&app).await;

    let detail = create_test_checklist(&app, &maker_key, &mold_id).await;
    assert_eq!(detail["kind"], "checklist");
    assert_eq!(detail["status"], "draft");

    let items = detail["items"].as_array().unwrap();
    assert_eq!(items.len(), 10, "template should produce 10 items");
    assert!(items.iter().all(|i: &Value| i["result"] == "pending"));
    assert!(
        items.iter().any(|i| i["photo_required"] == true),
        "template should mark some items photo-required"
    );

    let progress = &detail["progress"];
    assert_eq!(progress["total"], 10);
    assert_eq!(progress["pending"], 10);
}

#[actix_rt::test]
#[ignore = "requires a running PostgreSQL database"]
async fn test_plant_role_cannot_create_checklist() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;

    let plant_key = create_role_key(&app, "Busan plant", "plant").await;
    let mold_id = create_test_mold(&app).await;

    let (status, body) = api_post(
        &app,
        "/api/v1/checklists",
        &plant_key,
        serde_json::json!({ "mold_id": mold_id, "title": "Not allowed" }),
    )
    .await;
    assert_eq!(status, 403, "plant must not create checklists: {}", body);
}

#[actix_rt::test]
#[ignore = "requires a running PostgreSQL database"]
async fn test_submit_blocked_until_items_resolved() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;

    let maker_key = create_role_key(&app, "Daesung QA", "maker").await;
    let mold_id = create_test_mold(&app).await;
    let detail = create_test_checklist(&app, &maker_key, &mold_id).await;
    let record_id = detail["id"].as_str().unwrap();

    // All items pending: submission must fail with the pending codes listed
    let (status, body) =
        api_post_empty(&app, &format!("/api/v1/records/{}/submit", record_id), &maker_key).await;
    assert_eq!(status, 422, "submit should be blocked: {}", body);
    assert_eq!(body["error"], "VALIDATION_FAILED");
    let details = body["details"].as_array().unwrap();
    assert!(
        details.iter().any(|d| d.as_str().unwrap().contains("not yet answered")),
        "expected pending-items problem: {}",
        body
    );
}

#[actix_rt::test]
#[ignore = "requires a running PostgreSQL database"]
async fn test_failing_item_requires_notes_and_blocks_submit() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;

    let maker_key = create_role_key(&app, "Daesung QA", "maker").await;
    let mold_id = create_test_mold(&app).await;
    let detail = create_test_checklist(&app, &maker_key, &mold_id).await;
    let record_id = detail["id"].as_str().unwrap();
    let first_item = detail["items"][0]["id"].as_str().unwrap();

    // Fail without notes is rejected
    let (status, body) = api_put(
        &app,
        &format!("/api/v1/records/{}/items/{}", record_id, first_item),
        &maker_key,
        serde_json::json!({ "result": "fail" }),
    )
    .await;
    assert_eq!(status, 422, "fail without notes must be rejected: {}", body);

    // Fail with notes is stored
    let (status, body) = api_put(
        &app,
        &format!("/api/v1/records/{}/items/{}", record_id, first_item),
        &maker_key,
        serde_json::json!({ "result": "fail", "notes": "Scratch on cavity 2" }),
    )
    .await;
    assert_eq!(status, 200, "fail with notes should work: {}", body);
    assert_eq!(body["result"], "fail");

    // Resolve the rest, the failing item still blocks submission
    pass_all_items(&app, &maker_key, &detail).await;
    let (status, body) = api_put(
        &app,
        &format!("/api/v1/records/{}/items/{}", record_id, first_item),
        &maker_key,
        serde_json::json!({ "result": "fail", "notes": "Scratch on cavity 2" }),
    )
    .await;
    assert_eq!(status, 200, "re-fail should work: {}", body);

    let (status, body) =
        api_post_empty(&app, &format!("/api/v1/records/{}/submit", record_id), &maker_key).await;
    assert_eq!(status, 422);
    let details = body["details"].as_array().unwrap();
    assert!(
        details.iter().any(|d| d.as_str().unwrap().contains("still failing")),
        "expected failing-items problem: {}",
        body
    );
}

#[actix_rt::test]
#[ignore = "requires a running PostgreSQL database"]
async fn test_photo_required_items_block_submit() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;

    let maker_key = create_role_key(&app, "Daesung QA", "maker").await;
    let mold_id = create_test_mold(&app).await;
    let detail = create_test_checklist(&app, &maker_key, &mold_id).await;
    let record_id = detail["id"].as_str().unwrap();

    // Pass everything but leave photo-required items without photos
    for item in detail["items"].as_array().unwrap() {
        let item_id = item["id"].as_str().unwrap();
        let (status, _) = api_put(
            &app,
            &format!("/api/v1/records/{}/items/{}", record_id, item_id),
            &maker_key,
            serde_json::json!({ "result": "pass" }),
        )
        .await;
        assert_eq!(status, 200);
    }

    let (status, body) =
        api_post_empty(&app, &format!("/api/v1/records/{}/submit", record_id), &maker_key).await;
    assert_eq!(status, 422, "missing photos must block submit: {}", body);
    let details = body["details"].as_array().unwrap();
    assert!(
        details.iter().any(|d| d.as_str().unwrap().contains("photo")),
        "expected photo problem: {}",
        body
    );
}

#[actix_rt::test]
#[ignore = "requires a running PostgreSQL database"]
async fn test_full_approval_and_shipment_flow() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;

    let maker_key = create_role_key(&app, "Daesung QA", "maker").await;
    let dev_key = create_role_key(&app, "HQ tooling", "mold_developer").await;
    let mold_id = create_test_mold(&app).await;

    let detail = create_test_checklist(&app, &maker_key, &mold_id).await;
    let record_id = detail["id"].as_str().unwrap();
    pass_all_items(&app, &maker_key, &detail).await;

    // Ship before approval is rejected
    let (status, _) =
        api_post_empty(&app, &format!("/api/v1/records/{}/ship", record_id), &dev_key).await;
    assert_eq!(status, 409, "cannot ship a draft");

    // Submit
    let (status, body) =
        api_post_empty(&app, &format!("/api/v1/records/{}/submit", record_id), &maker_key).await;
    assert_eq!(status, 200, "submit failed: {}", body);
    assert_eq!(body["status"], "pending_approval");

    // Maker cannot approve
    let (status, _) =
        api_post_empty(&app, &format!("/api/v1/records/{}/approve", record_id), &maker_key).await;
    assert_eq!(status, 403, "maker must not decide");

    // HQ approves
    let (status, body) =
        api_post_empty(&app, &format!("/api/v1/records/{}/approve", record_id), &dev_key).await;
    assert_eq!(status, 200, "approve failed: {}", body);
    assert_eq!(body["status"], "approved");

    // Item updates are frozen after submission
    let first_item = detail["items"][0]["id"].as_str().unwrap();
    let (status, _) = api_put(
        &app,
        &format!("/api/v1/records/{}/items/{}", record_id, first_item),
        &maker_key,
        serde_json::json!({ "result": "na" }),
    )
    .await;
    assert_eq!(status, 409, "approved checklist must be immutable");

    // Mark shipped
    let (status, body) =
        api_post_empty(&app, &format!("/api/v1/records/{}/ship", record_id), &dev_key).await;
    assert_eq!(status, 200, "ship failed: {}", body);
    assert!(body["shipped_at"].is_string());

    // Shipping twice is rejected
    let (status, body) =
        api_post_empty(&app, &format!("/api/v1/records/{}/ship", record_id), &dev_key).await;
    assert_eq!(status, 409, "second ship must fail: {}", body);

    // History carries the full trail
    let (status, body) =
        api_get(&app, &format!("/api/v1/records/{}/events", record_id), &maker_key).await;
    assert_eq!(status, 200);
    let actions: Vec<&str> = body["events"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["action"].as_str().unwrap())
        .collect();
    assert_eq!(actions, vec!["submitted", "approved", "shipped"]);
}

#[actix_rt::test]
#[ignore = "requires a running PostgreSQL database"]
async fn test_only_submitter_may_edit_and_submit() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;

    let owner_key = create_role_key(&app, "Daesung QA", "maker").await;
    let other_key = create_role_key(&app, "Other maker", "maker").await;
    let mold_id = create_test_mold(&app).await;

    let detail = create_test_checklist(&app, &owner_key, &mold_id).await;
    let record_id = detail["id"].as_str().unwrap();
    let first_item = detail["items"][0]["id"].as_str().unwrap();

    let (status, body) = api_put(
        &app,
        &format!("/api/v1/records/{}/items/{}", record_id, first_item),
        &other_key,
        serde_json::json!({ "result": "pass" }),
    )
    .await;
    assert_eq!(status, 403, "non-owner edit must fail: {}", body);

    let (status, body) =
        api_post_empty(&app, &format!("/api/v1/records/{}/submit", record_id), &other_key).await;
    assert_eq!(status, 403, "non-owner submit must fail: {}", body);
}
