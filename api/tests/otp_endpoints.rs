//! Endpoint tests over the in-memory store and recording gateway

use std::sync::Arc;
use std::time::Duration;

use actix_web::{http::StatusCode, test, web};
use serde_json::{json, Value};

use otp_api::app::create_app;
use otp_api::routes::otp::AppState;
use otp_core::services::otp::mock::{MemoryStore, MockGateway};
use otp_core::services::otp::OtpService;
use otp_shared::config::OtpConfig;

const PHONE: &str = "+15550001234";

struct TestContext {
    store: Arc<MemoryStore>,
    gateway: Arc<MockGateway>,
    state: web::Data<AppState<MemoryStore, MockGateway>>,
}

fn test_context() -> TestContext {
    let store = Arc::new(MemoryStore::new());
    let gateway = Arc::new(MockGateway::new());
    let otp_service = Arc::new(OtpService::new(
        Arc::clone(&store),
        Arc::clone(&gateway),
        OtpConfig::default(),
    ));
    let state = web::Data::new(AppState {
        otp_service,
        flow_timeout: Duration::from_secs(10),
    });
    TestContext {
        store,
        gateway,
        state,
    }
}

fn wrong_code_for(sent: &str) -> &'static str {
    if sent == "000000" {
        "000001"
    } else {
        "000000"
    }
}

#[actix_web::test]
async fn test_send_otp_success() {
    let ctx = test_context();
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let req = test::TestRequest::post()
        .uri("/api/send-otp")
        .set_json(json!({ "phoneNumber": PHONE }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 200);
    assert_eq!(body["data"]["trials"], 3);
    assert_eq!(body["data"]["user"]["phoneNumber"], PHONE);
    assert_eq!(ctx.gateway.sent_count(), 1);
}

#[actix_web::test]
async fn test_send_otp_rejects_invalid_phone() {
    let ctx = test_context();
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let req = test::TestRequest::post()
        .uri("/api/send-otp")
        .set_json(json!({ "phoneNumber": "5550001234" }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // Nothing was sent and nothing was stored
    assert_eq!(ctx.gateway.sent_count(), 0);
    assert_eq!(ctx.store.live_entries(), 0);
}

#[actix_web::test]
async fn test_send_otp_rejects_missing_field() {
    let ctx = test_context();
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let req = test::TestRequest::post()
        .uri("/api/send-otp")
        .set_json(json!({}))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_verify_otp_wrong_code_is_unauthorized() {
    let ctx = test_context();
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let req = test::TestRequest::post()
        .uri("/api/send-otp")
        .set_json(json!({ "phoneNumber": PHONE }))
        .to_request();
    test::call_service(&app, req).await;

    let sent = ctx.gateway.last_code_to(PHONE).unwrap();
    let req = test::TestRequest::post()
        .uri("/api/verify-otp")
        .set_json(json!({
            "user": { "phoneNumber": PHONE },
            "code": wrong_code_for(&sent),
        }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 401);
    assert_eq!(body["data"]["trials"], 2);
}

#[actix_web::test]
async fn test_verify_otp_correct_code_succeeds() {
    let ctx = test_context();
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let req = test::TestRequest::post()
        .uri("/api/send-otp")
        .set_json(json!({ "phoneNumber": PHONE }))
        .to_request();
    test::call_service(&app, req).await;

    let code = ctx.gateway.last_code_to(PHONE).unwrap();
    let req = test::TestRequest::post()
        .uri("/api/verify-otp")
        .set_json(json!({
            "user": { "phoneNumber": PHONE },
            "code": code,
        }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 200);
    assert_eq!(body["data"], PHONE);

    // Cleanup removed both per-number entries
    assert_eq!(ctx.store.live_entries(), 0);
}

#[actix_web::test]
async fn test_exhausted_trials_lock_the_number() {
    let ctx = test_context();
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let req = test::TestRequest::post()
        .uri("/api/send-otp")
        .set_json(json!({ "phoneNumber": PHONE }))
        .to_request();
    test::call_service(&app, req).await;

    let sent = ctx.gateway.last_code_to(PHONE).unwrap();
    let wrong = wrong_code_for(&sent);

    for expected in [StatusCode::UNAUTHORIZED, StatusCode::UNAUTHORIZED, StatusCode::FORBIDDEN] {
        let req = test::TestRequest::post()
            .uri("/api/verify-otp")
            .set_json(json!({
                "user": { "phoneNumber": PHONE },
                "code": wrong,
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), expected);
    }

    // The lock now blocks sends as well
    let req = test::TestRequest::post()
        .uri("/api/send-otp")
        .set_json(json!({ "phoneNumber": PHONE }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 403);
    assert_eq!(body["data"]["ttl"], 30);
}

#[actix_web::test]
async fn test_expired_code_reports_retry() {
    let ctx = test_context();
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let req = test::TestRequest::post()
        .uri("/api/send-otp")
        .set_json(json!({ "phoneNumber": PHONE }))
        .to_request();
    test::call_service(&app, req).await;

    let code = ctx.gateway.last_code_to(PHONE).unwrap();
    ctx.store.advance(Duration::from_secs(301));

    let req = test::TestRequest::post()
        .uri("/api/verify-otp")
        .set_json(json!({
            "user": { "phoneNumber": PHONE },
            "code": code,
        }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "OTP expired, try again");
    assert_eq!(body["data"]["trials"], 2);
}

#[actix_web::test]
async fn test_store_outage_is_internal_error() {
    let ctx = test_context();
    let app = test::init_service(create_app(ctx.state.clone())).await;

    ctx.store.set_fail(true);

    let req = test::TestRequest::post()
        .uri("/api/send-otp")
        .set_json(json!({ "phoneNumber": PHONE }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 500);
}

#[actix_web::test]
async fn test_health_endpoint() {
    let ctx = test_context();
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "healthy");
}

#[actix_web::test]
async fn test_unknown_route_is_not_found() {
    let ctx = test_context();
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let req = test::TestRequest::get().uri("/api/unknown").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
