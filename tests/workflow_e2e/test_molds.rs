//! E2E tests: mold registry.

use super::test_helpers::*;
use actix_web::test;
use serde_json::Value;

#[actix_rt::test]
#[ignore = "requires a running PostgreSQL database"]
async fn test_register_and_fetch_mold() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;

    let dev_key = create_role_key(&app, "HQ tooling", "mold_developer").await;
    let code = unique_code("M");

    let (status, body) = api_post(
        &app,
        "/api/v1/molds",
        &dev_key,
        serde_json::json!({
            "mold_code": code,
            "name": "Door trim upper",
            "maker_name": "Daesung Precision",
            "plant_name": "Ulsan",
            "cavity_count": 2,
        }),
    )
    .await;
    assert_eq!(status, 201, "registration failed: {}", body);
    assert_eq!(body["mold_code"], code.as_str());
    assert_eq!(body["status"], "active");

    let mold_id = body["id"].as_str().unwrap();
    let (status, fetched) = api_get(&app, &format!("/api/v1/molds/{}", mold_id), &dev_key).await;
    assert_eq!(status, 200);
    assert_eq!(fetched["id"], body["id"]);
}

#[actix_rt::test]
#[ignore = "requires a running PostgreSQL database"]
async fn test_field_roles_cannot_register_molds() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;

    let plant_key = create_role_key(&app, "Busan plant", "plant").await;

    let (status, body) = api_post(
        &app,
        "/api/v1/molds",
        &plant_key,
        serde_json::json!({
            "mold_code": unique_code("M"),
            "name": "Unauthorized mold",
            "maker_name": "Daesung Precision",
            "plant_name": "Busan",
        }),
    )
    .await;
    assert_eq!(status, 403, "plant must not register molds: {}", body);
    assert_eq!(body["error"], "PERMISSION_DENIED");
}

#[actix_rt::test]
#[ignore = "requires a running PostgreSQL database"]
async fn test_duplicate_mold_code_is_rejected() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;

    let dev_key = create_role_key(&app, "HQ tooling", "mold_developer").await;
    let code = unique_code("M");
    let payload = serde_json::json!({
        "mold_code": code,
        "name": "Original",
        "maker_name": "Daesung Precision",
        "plant_name": "Busan",
    });

    let (status, _) = api_post(&app, "/api/v1/molds", &dev_key, payload.clone()).await;
    assert_eq!(status, 201);

    let (status, body) = api_post(&app, "/api/v1/molds", &dev_key, payload).await;
    assert_eq!(status, 422, "duplicate code must fail: {}", body);
    assert_eq!(body["error"], "VALIDATION_FAILED");
}

#[actix_rt::test]
#[ignore = "requires a running PostgreSQL database"]
async fn test_mold_validation_errors() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;

    let dev_key = create_role_key(&app, "HQ tooling", "mold_developer").await;

    let (status, body) = api_post(
        &app,
        "/api/v1/molds",
        &dev_key,
        serde_json::json!({
            "mold_code": "  ",
            "name": "",
            "maker_name": "Daesung Precision",
            "plant_name": "Busan",
            "cavity_count": 0,
        }),
    )
    .await;
    assert_eq!(status, 422);
    let details = body["details"].as_array().unwrap();
    assert!(details.len() >= 3, "expected several problems: {}", body);
}

#[actix_rt::test]
#[ignore = "requires a running PostgreSQL database"]
async fn test_update_mold_status() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;

    let dev_key = create_role_key(&app, "HQ tooling", "mold_developer").await;
    let maker_key = create_role_key(&app, "Daesung", "maker").await;
    let mold_id = create_test_mold(&app).await;

    // Field role may not change mold status
    let (status, _) = api_put(
        &app,
        &format!("/api/v1/molds/{}/status", mold_id),
        &maker_key,
        serde_json::json!({ "status": "under_repair" }),
    )
    .await;
    assert_eq!(status, 403);

    // HQ role may
    let (status, body) = api_put(
        &app,
        &format!("/api/v1/molds/{}/status", mold_id),
        &dev_key,
        serde_json::json!({ "status": "under_repair" }),
    )
    .await;
    assert_eq!(status, 200, "status update failed: {}", body);
    assert_eq!(body["status"], "under_repair");
}

#[actix_rt::test]
#[ignore = "requires a running PostgreSQL database"]
async fn test_list_molds_filters_by_plant() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;

    let dev_key = create_role_key(&app, "HQ tooling", "mold_developer").await;
    let plant = unique_code("plant");

    for i in 0..2 {
        let req = test::TestRequest::post()
            .uri("/api/v1/molds")
            .insert_header(("X-Admin-Key", TEST_ADMIN_KEY))
            .set_json(serde_json::json!({
                "mold_code": unique_code("M"),
                "name": format!("Fixture {}", i),
                "maker_name": "Daesung Precision",
                "plant_name": plant,
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status().as_u16(), 201);
    }

    let (status, body) = api_get(
        &app,
        &format!("/api/v1/molds?plant={}&limit=10", plant),
        &dev_key,
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(body["total"], 2, "unexpected list: {}", body);
    let molds = body["molds"].as_array().unwrap();
    assert!(
        molds
            .iter()
            .all(|m: &Value| m["plant_name"] == plant.as_str())
    );
}
