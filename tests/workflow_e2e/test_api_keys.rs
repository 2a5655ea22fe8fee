//! E2E tests: API key management endpoints.

use actix_web::test;
use serde_json::Value;

use super::test_helpers::*;

#[actix_rt::test]
#[ignore = "requires a running PostgreSQL database"]
async fn test_create_list_revoke_restore_cycle() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;

    // Create
    let req = test::TestRequest::post()
        .uri("/api/v1/auth/keys")
        .insert_header(("X-Admin-Key", TEST_ADMIN_KEY))
        .set_json(serde_json::json!({
            "name": "Cycle test key",
            "role": "mold_developer",
            "expires_in": "30d",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 201);
    let created: Value = test::read_body_json(resp).await;
    let key_id = created["id"].as_str().unwrap().to_string();
    assert_eq!(created["role"], "mold_developer");
    assert!(created["key"].as_str().unwrap().starts_with("mld_"));
    assert!(created["expires_at"].is_string());

    // The listing masks the key down to its prefix
    let req = test::TestRequest::get()
        .uri("/api/v1/auth/keys")
        .insert_header(("X-Admin-Key", TEST_ADMIN_KEY))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let listing: Value = test::read_body_json(resp).await;
    let entry = listing["keys"]
        .as_array()
        .unwrap()
        .iter()
        .find(|k| k["id"] == key_id.as_str())
        .expect("created key should be listed");
    assert!(entry.get("key").is_none(), "full key must not be listed");
    assert_eq!(entry["is_revoked"], false);

    // Revoke
    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/auth/keys/{}", key_id))
        .insert_header(("X-Admin-Key", TEST_ADMIN_KEY))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 200);

    // Revoking again fails
    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/auth/keys/{}", key_id))
        .insert_header(("X-Admin-Key", TEST_ADMIN_KEY))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 404);

    // Restore
    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/auth/keys/{}/restore", key_id))
        .insert_header(("X-Admin-Key", TEST_ADMIN_KEY))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 200);

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/auth/keys/{}", key_id))
        .insert_header(("X-Admin-Key", TEST_ADMIN_KEY))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let detail: Value = test::read_body_json(resp).await;
    assert_eq!(detail["is_revoked"], false);
}

#[actix_rt::test]
#[ignore = "requires a running PostgreSQL database"]
async fn test_system_admin_key_can_manage_keys() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;

    let admin_key = create_role_key(&app, "Admin user", "system_admin").await;

    let (status, body) = api_post(
        &app,
        "/api/v1/auth/keys",
        &admin_key,
        serde_json::json!({ "name": "Minted by admin key", "role": "plant" }),
    )
    .await;
    assert_eq!(status, 201, "system_admin should mint keys: {}", body);
    assert_eq!(body["role"], "plant");
}

#[actix_rt::test]
#[ignore = "requires a running PostgreSQL database"]
async fn test_key_cannot_revoke_itself() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;

    // Need the id and the key itself
    let req = test::TestRequest::post()
        .uri("/api/v1/auth/keys")
        .insert_header(("X-Admin-Key", TEST_ADMIN_KEY))
        .set_json(serde_json::json!({ "name": "Self-revoker", "role": "system_admin" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let created: Value = test::read_body_json(resp).await;
    let key_id = created["id"].as_str().unwrap().to_string();
    let full_key = created["key"].as_str().unwrap().to_string();

    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/auth/keys/{}", key_id))
        .insert_header(("X-API-Key", full_key))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 400, "self-revocation must fail");
}

#[actix_rt::test]
#[ignore = "requires a running PostgreSQL database"]
async fn test_create_key_requires_name() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/keys")
        .insert_header(("X-Admin-Key", TEST_ADMIN_KEY))
        .set_json(serde_json::json!({ "name": "", "role": "maker" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 400);
}
