//! Bearer-protected retention cleanup.

use axum::http::StatusCode;
use uuid::Uuid;

use auditvault_entity::user::UserRole;

use crate::helpers::{CRON_SECRET, TestApp};

async fn age_document(app: &TestApp, id: Uuid, days: i32) {
    sqlx::query("UPDATE documents SET created_at = NOW() - make_interval(days => $2) WHERE id = $1")
        .bind(id)
        .bind(days)
        .execute(&app.db_pool)
        .await
        .expect("age document");
}

async fn document_exists(app: &TestApp, id: Uuid) -> bool {
    sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM documents WHERE id = $1)")
        .bind(id)
        .fetch_one(&app.db_pool)
        .await
        .expect("query document")
}

async fn document_key(app: &TestApp, id: Uuid) -> String {
    sqlx::query_scalar::<_, String>("SELECT url FROM documents WHERE id = $1")
        .bind(id)
        .fetch_one(&app.db_pool)
        .await
        .expect("query document key")
}

#[tokio::test]
async fn test_cron_requires_bearer_secret() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };
    let surveyor = app.create_user(UserRole::Surveyor).await;

    let missing = app.request("POST", "/api/cron/cleanup", None, None).await;
    assert_eq!(missing.status, StatusCode::UNAUTHORIZED);

    let wrong = app
        .request("GET", "/api/cron/cleanup", None, Some("not-the-secret"))
        .await;
    assert_eq!(wrong.status, StatusCode::UNAUTHORIZED);

    // a user token is not a cron secret
    let user_token = app
        .request("POST", "/api/cron/cleanup", None, Some(&surveyor.token))
        .await;
    assert_eq!(user_token.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_cron_disabled_without_secret() {
    let Some(app) = TestApp::with_config(|c| c.cleanup.cron_secret.clear()).await else {
        return;
    };

    let response = app
        .request("POST", "/api/cron/cleanup", None, Some(CRON_SECRET))
        .await;

    assert_eq!(response.status, StatusCode::SERVICE_UNAVAILABLE);
}

/// The only test that runs a cleanup, since it sweeps the whole table.
#[tokio::test]
async fn test_cleanup_removes_expired_documents() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };
    let owner = app.create_user(UserRole::Client).await;
    let folder_id = app.create_folder(&owner, &owner).await;

    let expired = app.upload(&owner, folder_id, "2025-report.pdf").await;
    let stuck = app.upload(&owner, folder_id, "locked.pdf").await;
    let fresh = app.upload(&owner, folder_id, "current.pdf").await;
    let borderline = app.upload(&owner, folder_id, "recent.pdf").await;
    age_document(&app, expired, 31).await;
    age_document(&app, stuck, 45).await;
    age_document(&app, borderline, 29).await;

    let expired_key = document_key(&app, expired).await;
    app.store.fail_deletes_for(document_key(&app, stuck).await).await;

    let response = app
        .request("POST", "/api/cron/cleanup", None, Some(CRON_SECRET))
        .await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);

    let report = &response.body["data"];
    assert!(report["scanned"].as_u64().unwrap() >= 2);
    assert!(report["deleted"].as_u64().unwrap() >= 1);
    assert!(report["failed"].as_u64().unwrap() >= 1);

    assert!(!document_exists(&app, expired).await);
    assert!(app.store.get(&expired_key).await.is_none());
    // a failed object delete keeps the row for the next run
    assert!(document_exists(&app, stuck).await);
    assert!(document_exists(&app, fresh).await);
    assert!(document_exists(&app, borderline).await);
}
