//! Management API tests
//!
//! `/api/links`, `/qr/{slug}.svg`, `/api/payloads` and `/health` through
//! the full route table.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::test::{self, TestRequest};
use actix_web::{App, web};
use serde_json::{Value, json};

use qryft::api::configure;
use qryft::api::services::AppStartTime;
use qryft::config::StaticConfig;
use qryft::services::LinkService;
use qryft::storage::{LinkStore, MemoryBlobStore};

fn create_service() -> LinkService {
    let store = Arc::new(LinkStore::new(Arc::new(MemoryBlobStore::new()), "test.links"));
    LinkService::new(store, &StaticConfig::default())
}

macro_rules! api_app {
    ($service:expr) => {{
        test::init_service(
            App::new()
                .app_data(web::Data::new($service.clone()))
                .app_data(web::Data::new(AppStartTime {
                    start_datetime: chrono::Utc::now(),
                }))
                .configure(configure),
        )
        .await
    }};
}

macro_rules! post_link {
    ($app:expr, $body:expr) => {{
        let req = TestRequest::post()
            .uri("/api/links")
            .set_json($body)
            .to_request();
        test::call_service(&$app, req).await
    }};
}

// =============================================================================
// /api/links
// =============================================================================

#[actix_rt::test]
async fn test_create_link_returns_record_and_qr_value() {
    let service = create_service();
    let app = api_app!(service);

    let resp = post_link!(app, json!({ "destinationUrl": "example.com", "name": "Menu" }));
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["destinationUrl"], "https://example.com");
    assert_eq!(body["name"], "Menu");
    assert_eq!(body["isActive"], true);
    assert_eq!(body["version"], 1);
    let slug = body["slug"].as_str().unwrap();
    assert_eq!(
        body["qrValue"],
        format!("http://127.0.0.1:8080/q/{}", slug)
    );
}

#[actix_rt::test]
async fn test_create_link_validation_error() {
    let service = create_service();
    let app = api_app!(service);

    let resp = post_link!(app, json!({ "destinationUrl": "javascript:alert(1)" }));
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], "E004");
    assert_eq!(body["error"], "Validation Error");
    assert!(service.list_links().is_empty());
}

#[actix_rt::test]
async fn test_list_and_get_links() {
    let service = create_service();
    let app = api_app!(service);

    post_link!(app, json!({ "destinationUrl": "a.example" }));
    let created: Value =
        test::read_body_json(post_link!(app, json!({ "destinationUrl": "b.example" }))).await;

    let req = TestRequest::get().uri("/api/links").to_request();
    let list: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(list.as_array().unwrap().len(), 2);

    let id = created["id"].as_str().unwrap();
    let req = TestRequest::get()
        .uri(&format!("/api/links/{}", id))
        .to_request();
    let one: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(one["destinationUrl"], "https://b.example");

    let req = TestRequest::get().uri("/api/links/missing").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn test_patch_link_and_version_conflict() {
    let service = create_service();
    let app = api_app!(service);

    let created: Value =
        test::read_body_json(post_link!(app, json!({ "destinationUrl": "a.example" }))).await;
    let id = created["id"].as_str().unwrap();
    let slug = created["slug"].as_str().unwrap();

    let req = TestRequest::patch()
        .uri(&format!("/api/links/{}", id))
        .set_json(json!({ "destinationUrl": "b.example", "expectedVersion": 1 }))
        .to_request();
    let updated: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(updated["destinationUrl"], "https://b.example");
    assert_eq!(updated["slug"], slug);
    assert_eq!(updated["version"], 2);

    // 旧版本号写入被拒绝
    let req = TestRequest::patch()
        .uri(&format!("/api/links/{}", id))
        .set_json(json!({ "isActive": false, "expectedVersion": 1 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    assert!(service.get_link(id).unwrap().is_active);
}

#[actix_rt::test]
async fn test_patch_without_fields_is_rejected() {
    let service = create_service();
    let app = api_app!(service);

    let created: Value =
        test::read_body_json(post_link!(app, json!({ "destinationUrl": "a.example" }))).await;
    let req = TestRequest::patch()
        .uri(&format!("/api/links/{}", created["id"].as_str().unwrap()))
        .set_json(json!({}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_rt::test]
async fn test_disable_via_api_changes_resolution() {
    let service = create_service();
    let app = api_app!(service);

    let created: Value =
        test::read_body_json(post_link!(app, json!({ "destinationUrl": "a.example" }))).await;
    let req = TestRequest::patch()
        .uri(&format!("/api/links/{}", created["id"].as_str().unwrap()))
        .set_json(json!({ "isActive": false }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = TestRequest::get()
        .uri(&format!("/q/{}", created["slug"].as_str().unwrap()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::GONE);
}

#[actix_rt::test]
async fn test_delete_link() {
    let service = create_service();
    let app = api_app!(service);

    let created: Value =
        test::read_body_json(post_link!(app, json!({ "destinationUrl": "a.example" }))).await;
    let uri = format!("/api/links/{}", created["id"].as_str().unwrap());

    let req = TestRequest::delete()
        .uri(&format!("{}?version=7", uri))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    let req = TestRequest::delete().uri(&uri).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let req = TestRequest::delete().uri(&uri).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// =============================================================================
// QR images and payloads
// =============================================================================

#[actix_rt::test]
async fn test_slug_svg() {
    let service = create_service();
    let app = api_app!(service);

    let req = TestRequest::get().uri("/qr/Ab3dE9.svg").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get("Content-Type").unwrap().to_str().unwrap(),
        "image/svg+xml"
    );
    let body = test::read_body(resp).await;
    assert!(String::from_utf8_lossy(&body).contains("<svg"));

    let req = TestRequest::get().uri("/qr/Ab3dE9.png").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn test_encode_payloads() {
    let service = create_service();
    let app = api_app!(service);

    let req = TestRequest::post()
        .uri("/api/payloads")
        .set_json(json!({ "kind": "wifi", "ssid": "home", "password": "pw" }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["kind"], "wifi");
    assert_eq!(body["payload"], "WIFI:T:WPA;S:home;P:pw;;");

    let req = TestRequest::post()
        .uri("/api/payloads")
        .set_json(json!({ "kind": "geo", "latitude": 40.7128, "longitude": -74.006 }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["payload"], "geo:40.7128,-74.006");

    let req = TestRequest::post()
        .uri("/api/payloads")
        .set_json(json!({ "kind": "geo", "latitude": 120.0, "longitude": 0.0 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_rt::test]
async fn test_payload_svg() {
    let service = create_service();
    let app = api_app!(service);

    let req = TestRequest::post()
        .uri("/api/payloads/svg")
        .set_json(json!({ "kind": "url", "url": "example.com" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

// =============================================================================
// Health
// =============================================================================

#[actix_rt::test]
async fn test_health_reports_backend_and_count() {
    let service = create_service();
    let app = api_app!(service);
    post_link!(app, json!({ "destinationUrl": "a.example" }));

    let req = TestRequest::get().uri("/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["backend"], "memory");
    assert_eq!(body["linksCount"], 1);
}
