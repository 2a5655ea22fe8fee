//! Shared test helpers for workflow E2E tests.

use actix_web::{App, dev::ServiceResponse, test, web};
use moldtrack_lib::auth::AdminKey;
use moldtrack_lib::config::Config;
use moldtrack_lib::db::DbPool;
use moldtrack_lib::{api, services};
use serde_json::Value;
use std::sync::OnceLock;
use uuid::Uuid;

/// Admin key used in tests.
pub const TEST_ADMIN_KEY: &str = "test-admin-key-for-workflow-e2e";

static MIGRATIONS_RUN: OnceLock<()> = OnceLock::new();

/// Create a fresh DB pool. Migrations run only once.
pub async fn create_test_pool() -> DbPool {
    let mut config = Config::from_env().expect(
        "Failed to load config. Ensure RUST_ENV and DATABASE_URL are set, \
         and that PostgreSQL is running.",
    );
    config.max_db_connections = 2;

    let pool = DbPool::connect(&config)
        .await
        .expect("Failed to connect to database");

    if MIGRATIONS_RUN.get().is_none() {
        pool.run_migrations()
            .await
            .expect("Failed to run migrations");
        let _ = MIGRATIONS_RUN.set(());
    }

    pool
}

/// Generate a unique code for test isolation.
pub fn unique_code(prefix: &str) -> String {
    format!(
        "{}-{}",
        prefix,
        Uuid::new_v4().to_string().split('-').next().unwrap()
    )
}

/// Create a test app with the full API route tree.
pub async fn create_test_app(
    pool: &DbPool,
) -> impl actix_web::dev::Service<
    actix_http::Request,
    Response = ServiceResponse,
    Error = actix_web::Error,
> {
    let admin_key = AdminKey::new(Some(TEST_ADMIN_KEY.to_string()));

    test::init_service(
        App::new()
            .app_data(web::Data::new(pool.clone()))
            .app_data(web::Data::new(admin_key))
            .service(
                web::scope("/api/v1")
                    .configure(api::configure_health_routes)
                    .configure(api::configure_mold_routes)
                    .configure(api::configure_checklist_routes)
                    .configure(api::configure_transfer_routes)
                    .configure(api::configure_repair_routes)
                    .configure(api::configure_scrapping_routes)
                    .configure(api::configure_record_routes)
                    .configure(api::configure_dashboard_routes)
                    .configure(services::configure_auth_routes),
            ),
    )
    .await
}

/// GET without any auth header.
pub async fn raw_get<S>(app: &S, uri: &str) -> (u16, Value)
where
    S: actix_web::dev::Service<
            actix_http::Request,
            Response = ServiceResponse,
            Error = actix_web::Error,
        >,
{
    let req = test::TestRequest::get().uri(uri).to_request();
    let resp = test::call_service(app, req).await;
    let status = resp.status().as_u16();
    let body: Value = test::read_body_json(resp).await;
    (status, body)
}

/// GET with an API key.
pub async fn api_get<S>(app: &S, uri: &str, key: &str) -> (u16, Value)
where
    S: actix_web::dev::Service<
            actix_http::Request,
            Response = ServiceResponse,
            Error = actix_web::Error,
        >,
{
    let req = test::TestRequest::get()
        .uri(uri)
        .insert_header(("X-API-Key", key))
        .to_request();
    let resp = test::call_service(app, req).await;
    let status = resp.status().as_u16();
    let body: Value = test::read_body_json(resp).await;
    (status, body)
}

/// POST a JSON body with an API key.
pub async fn api_post<S>(app: &S, uri: &str, key: &str, body: Value) -> (u16, Value)
where
    S: actix_web::dev::Service<
            actix_http::Request,
            Response = ServiceResponse,
            Error = actix_web::Error,
        >,
{
    let req = test::TestRequest::post()
        .uri(uri)
        .insert_header(("X-API-Key", key))
        .set_json(body)
        .to_request();
    let resp = test::call_service(app, req).await;
    let status = resp.status().as_u16();
    let body: Value = test::read_body_json(resp).await;
    (status, body)
}

/// POST with an API key and no body.
pub async fn api_post_empty<S>(app: &S, uri: &str, key: &str) -> (u16, Value)
where
    S: actix_web::dev::Service<
            actix_http::Request,
            Response = ServiceResponse,
            Error = actix_web::Error,
        >,
{
    let req = test::TestRequest::post()
        .uri(uri)
        .insert_header(("X-API-Key", key))
        .to_request();
    let resp = test::call_service(app, req).await;
    let status = resp.status().as_u16();
    let body: Value = test::read_body_json(resp).await;
    (status, body)
}

/// PUT a JSON body with an API key.
pub async fn api_put<S>(app: &S, uri: &str, key: &str, body: Value) -> (u16, Value)
where
    S: actix_web::dev::Service<
            actix_http::Request,
            Response = ServiceResponse,
            Error = actix_web::Error,
        >,
{
    let req = test::TestRequest::put()
        .uri(uri)
        .insert_header(("X-API-Key", key))
        .set_json(body)
        .to_request();
    let resp = test::call_service(app, req).await;
    let status = resp.status().as_u16();
    let body: Value = test::read_body_json(resp).await;
    (status, body)
}

/// Create an API key via the admin bootstrap header. Returns the full key.
pub async fn create_role_key<S>(app: &S, name: &str, role: &str) -> String
where
    S: actix_web::dev::Service<
            actix_http::Request,
            Response = ServiceResponse,
            Error = actix_web::Error,
        >,
{
    let req = test::TestRequest::post()
        .uri("/api/v1/auth/keys")
        .insert_header(("X-Admin-Key", TEST_ADMIN_KEY))
        .set_json(serde_json::json!({
            "name": name,
            "role": role,
        }))
        .to_request();

    let resp = test::call_service(app, req).await;
    let status = resp.status();
    let body: Value = test::read_body_json(resp).await;
    assert!(
        status.is_success(),
        "Failed to create {} key ({}): {}",
        role,
        status,
        body
    );
    body["key"].as_str().unwrap().to_string()
}

/// Register a mold via the admin bootstrap header. Returns its ID.
pub async fn create_test_mold<S>(app: &S) -> String
where
    S: actix_web::dev::Service<
            actix_http::Request,
            Response = ServiceResponse,
            Error = actix_web::Error,
        >,
{
    let req = test::TestRequest::post()
        .uri("/api/v1/molds")
        .insert_header(("X-Admin-Key", TEST_ADMIN_KEY))
        .set_json(serde_json::json!({
            "mold_code": unique_code("M"),
            "name": "Center console bezel",
            "maker_name": "Daesung Precision",
            "plant_name": "Busan",
            "cavity_count": 4,
        }))
        .to_request();

    let resp = test::call_service(app, req).await;
    let status = resp.status();
    let body: Value = test::read_body_json(resp).await;
    assert!(
        status.is_success(),
        "Failed to register mold ({}): {}",
        status,
        body
    );
    body["id"].as_str().unwrap().to_string()
}

/// Create a checklist from the standard template. Returns the detail body.
pub async fn create_test_checklist<S>(app: &S, key: &str, mold_id: &str) -> Value
where
    S: actix_web::dev::Service<
            actix_http::Request,
            Response = ServiceResponse,
            Error = actix_web::Error,
        >,
{
    let (status, body) = api_post(
        app,
        "/api/v1/checklists",
        key,
        serde_json::json!({
            "mold_id": mold_id,
            "title": "Shipment inspection",
        }),
    )
    .await;
    assert_eq!(status, 201, "Failed to create checklist: {}", body);
    body
}

/// Answer every item on a checklist with a passing result.
///
/// Items that require a photo get one attached so the record is
/// submittable afterwards.
pub async fn pass_all_items<S>(app: &S, key: &str, detail: &Value)
where
    S: actix_web::dev::Service<
            actix_http::Request,
            Response = ServiceResponse,
            Error = actix_web::Error,
        >,
{
    let record_id = detail["id"].as_str().unwrap();
    for item in detail["items"].as_array().unwrap() {
        let item_id = item["id"].as_str().unwrap();
        let mut update = serde_json::json!({ "result": "pass" });
        if item["photo_required"].as_bool().unwrap_or(false) {
            update["photo_urls"] = serde_json::json!(["https://photos.test/item.jpg"]);
        }
        let (status, body) = api_put(
            app,
            &format!("/api/v1/records/{}/items/{}", record_id, item_id),
            key,
            update,
        )
        .await;
        assert_eq!(status, 200, "Failed to update item {}: {}", item_id, body);
    }
}
