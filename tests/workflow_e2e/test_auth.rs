//! E2E tests: API key authentication.

use actix_web::test;
use serde_json::Value;

use super::test_helpers::*;

#[actix_rt::test]
#[ignore = "requires a running PostgreSQL database"]
async fn test_health_endpoints_are_public() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;

    let (status, body) = raw_get(&app, "/api/v1/health").await;
    assert_eq!(status, 200);
    assert_eq!(body["status"], "healthy");

    let (status, body) = raw_get(&app, "/api/v1/ready").await;
    assert_eq!(status, 200);
    assert_eq!(body["database"], "connected");
}

#[actix_rt::test]
#[ignore = "requires a running PostgreSQL database"]
async fn test_missing_api_key_is_rejected() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;

    let (status, body) = raw_get(&app, "/api/v1/records").await;
    assert_eq!(status, 401);
    assert_eq!(body["error"], "UNAUTHORIZED");
}

#[actix_rt::test]
#[ignore = "requires a running PostgreSQL database"]
async fn test_invalid_api_key_is_rejected() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;

    let (status, body) = api_get(&app, "/api/v1/records", "mld_not-a-real-key").await;
    assert_eq!(status, 401);
    assert_eq!(body["error"], "UNAUTHORIZED");
}

#[actix_rt::test]
#[ignore = "requires a running PostgreSQL database"]
async fn test_admin_header_grants_bootstrap_access() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;

    let req = test::TestRequest::get()
        .uri("/api/v1/auth/keys")
        .insert_header(("X-Admin-Key", TEST_ADMIN_KEY))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 200);

    let body: Value = test::read_body_json(resp).await;
    assert!(body["keys"].is_array());
}

#[actix_rt::test]
#[ignore = "requires a running PostgreSQL database"]
async fn test_revoked_key_is_rejected() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;

    // Create a key and capture both the id and the full key
    let req = test::TestRequest::post()
        .uri("/api/v1/auth/keys")
        .insert_header(("X-Admin-Key", TEST_ADMIN_KEY))
        .set_json(serde_json::json!({ "name": "Revocation target", "role": "maker" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 201);
    let created: Value = test::read_body_json(resp).await;
    let key_id = created["id"].as_str().unwrap().to_string();
    let full_key = created["key"].as_str().unwrap().to_string();

    // Key works before revocation
    let (status, _) = api_get(&app, "/api/v1/records", &full_key).await;
    assert_eq!(status, 200);

    // Revoke it
    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/auth/keys/{}", key_id))
        .insert_header(("X-Admin-Key", TEST_ADMIN_KEY))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 200);

    // Key no longer works
    let (status, body) = api_get(&app, "/api/v1/records", &full_key).await;
    assert_eq!(status, 401, "revoked key should be rejected: {}", body);
}

#[actix_rt::test]
#[ignore = "requires a running PostgreSQL database"]
async fn test_non_admin_cannot_manage_keys() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;

    let maker_key = create_role_key(&app, "Maker without admin", "maker").await;

    let (status, body) = api_post(
        &app,
        "/api/v1/auth/keys",
        &maker_key,
        serde_json::json!({ "name": "Should fail", "role": "plant" }),
    )
    .await;
    assert_eq!(status, 401, "maker must not mint keys: {}", body);
}
