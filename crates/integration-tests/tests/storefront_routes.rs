//! Storefront router tests that need no database.

#![allow(clippy::unwrap_used)]

use axum::http::StatusCode;

use umkm_integration_tests::{body_text, get, post_form, send, storefront_app};

#[tokio::test]
async fn test_health_is_ok() {
    let response = send(storefront_app(), get("/health")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "ok");
}

#[tokio::test]
async fn test_readiness_reports_unreachable_database() {
    let response = send(storefront_app(), get("/health/ready")).await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_manifest_served_as_web_manifest() {
    let response = send(storefront_app(), get("/manifest.json")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()["content-type"],
        "application/manifest+json"
    );

    let manifest: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(manifest["short_name"], "UMKM-GO");
    assert_eq!(manifest["name"], "UMKM-GO UMKM Tiro Sompe");
    assert_eq!(manifest["display"], "standalone");
}

#[tokio::test]
async fn test_responses_carry_security_headers_and_request_id() {
    let response = send(storefront_app(), get("/health")).await;
    let headers = response.headers();
    assert_eq!(headers["x-frame-options"], "DENY");
    assert_eq!(headers["x-content-type-options"], "nosniff");
    assert!(headers.contains_key("content-security-policy"));

    let request_id = headers["x-request-id"].to_str().unwrap();
    assert!(uuid::Uuid::parse_str(request_id).is_ok());
}

#[tokio::test]
async fn test_malformed_umkm_id_is_rejected_before_database() {
    let response = send(storefront_app(), get("/umkm/not-a-uuid")).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_database_failure_hides_details() {
    let response = send(storefront_app(), get("/")).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = body_text(response).await;
    assert_eq!(body, "Terjadi kesalahan pada server");
    assert!(!body.contains("127.0.0.1"));
}

#[tokio::test]
async fn test_order_without_database_is_server_error_not_redirect() {
    let uri = format!("/umkm/{}/order", uuid::Uuid::new_v4());
    let response = send(storefront_app(), post_form(&uri, "address=Jl.+Poros")).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(!response.headers().contains_key("location"));
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let response = send(storefront_app(), get("/products/nasi-kuning")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
