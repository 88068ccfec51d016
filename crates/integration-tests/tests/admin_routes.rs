//! Admin router tests that need no database.
//!
//! Without a session cookie the session store is never consulted, so the
//! authentication gate and the login form can be exercised in-process.

#![allow(clippy::unwrap_used)]

use axum::http::StatusCode;
use serde_json::json;

use umkm_integration_tests::{
    TEST_ADMIN_EMAIL, admin_app, body_text, get, post_form, post_json, send,
};

#[tokio::test]
async fn test_health_is_ok() {
    let response = send(admin_app(), get("/health")).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_readiness_reports_unreachable_database() {
    let response = send(admin_app(), get("/health/ready")).await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_pages_redirect_to_login_when_logged_out() {
    for uri in [
        "/",
        "/umkm/new",
        &format!("/umkm/{}/edit", uuid::Uuid::new_v4()),
        &format!("/umkm/{}/products", uuid::Uuid::new_v4()),
    ] {
        let response = send(admin_app(), get(uri)).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER, "{uri}");
        assert_eq!(response.headers()["location"], "/auth/login", "{uri}");
    }
}

#[tokio::test]
async fn test_form_posts_redirect_to_login_when_logged_out() {
    let uri = format!("/umkm/{}/delete", uuid::Uuid::new_v4());
    let response = send(admin_app(), post_form(&uri, "")).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()["location"], "/auth/login");
}

#[tokio::test]
async fn test_api_answers_unauthorized_when_logged_out() {
    let body = json!({ "url": "https://maps.google.com/?q=-4.0098,119.6231" });
    let response = send(admin_app(), post_json("/api/maps/parse", &body)).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(!response.headers().contains_key("location"));
}

#[tokio::test]
async fn test_login_page_renders() {
    let response = send(admin_app(), get("/auth/login")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["cache-control"], "no-store");
    assert_eq!(response.headers()["referrer-policy"], "no-referrer");

    let body = body_text(response).await;
    assert!(body.contains("action=\"/auth/login\""));
    assert!(body.contains("name=\"password\""));
}

#[tokio::test]
async fn test_wrong_password_rerenders_login() {
    let form = format!("email={TEST_ADMIN_EMAIL}&password=salah");
    let response = send(admin_app(), post_form("/auth/login", &form)).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(response.headers().get("set-cookie").is_none());

    let body = body_text(response).await;
    assert!(body.contains("Email atau password salah"));
    assert!(body.contains(TEST_ADMIN_EMAIL));
}

#[tokio::test]
async fn test_unknown_email_rerenders_login() {
    let response = send(
        admin_app(),
        post_form("/auth/login", "email=someone%40else.test&password=rahasia-tiro-sompe"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_redirects_to_login() {
    let response = send(admin_app(), post_form("/auth/logout", "")).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()["location"], "/auth/login");
}
