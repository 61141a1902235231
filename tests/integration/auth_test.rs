//! Login, current user, and health.

use axum::http::StatusCode;
use serde_json::json;

use auditvault_entity::user::UserRole;

use crate::helpers::{PASSWORD, TestApp};

#[tokio::test]
async fn test_login_success() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };
    let client = app.create_user(UserRole::Client).await;

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "email": client.email.to_uppercase(), "password": PASSWORD })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    let data = &response.body["data"];
    assert!(data["access_token"].as_str().is_some_and(|t| !t.is_empty()));
    assert_eq!(data["token_type"], "Bearer");
    assert_eq!(data["user"]["role"], "client");
    assert!(data["user"].get("password_hash").is_none());
}

#[tokio::test]
async fn test_login_rejects_wrong_password_and_unknown_email_alike() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };
    let client = app.create_user(UserRole::Client).await;

    let wrong_password = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "email": client.email, "password": "Not-The-Password-99" })),
            None,
        )
        .await;
    let unknown_email = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "email": "nobody@example.test", "password": PASSWORD })),
            None,
        )
        .await;

    assert_eq!(wrong_password.status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_email.status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_password.body["message"], unknown_email.body["message"]);
}

#[tokio::test]
async fn test_me_returns_current_user() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };
    let auditor = app.create_user(UserRole::Auditor).await;

    let response = app
        .request("GET", "/api/auth/me", None, Some(&auditor.token))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["id"], auditor.id.to_string());
    assert_eq!(response.body["data"]["role"], "auditor");
}

#[tokio::test]
async fn test_me_requires_token() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };

    let missing = app.request("GET", "/api/auth/me", None, None).await;
    let garbage = app
        .request("GET", "/api/auth/me", None, Some("not-a-jwt"))
        .await;

    assert_eq!(missing.status, StatusCode::UNAUTHORIZED);
    assert_eq!(garbage.status, StatusCode::UNAUTHORIZED);
    assert_eq!(missing.body["success"], false);
}

#[tokio::test]
async fn test_health() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };

    let response = app.request("GET", "/api/health", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["status"], "ok");
    assert_eq!(response.body["data"]["storage"], "memory");
}
