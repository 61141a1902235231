//! Folder lifecycle, period validation, and role scoping.

use axum::http::StatusCode;
use serde_json::json;

use auditvault_entity::user::UserRole;

use crate::helpers::{TestApp, date};

#[tokio::test]
async fn test_folder_period_must_end_after_start() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };
    let client = app.create_user(UserRole::Client).await;

    for (start, end) in [
        (date(2026, 3, 1), date(2026, 3, 1)),
        (date(2026, 3, 1), date(2026, 2, 1)),
    ] {
        let response = app
            .request(
                "POST",
                "/api/folders",
                Some(json!({ "name": "Q1 evidence", "start_date": start, "end_date": end })),
                Some(&client.token),
            )
            .await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST, "{start}..{end}");
    }

    // a patch is checked against the merged period
    let folder_id = app.create_folder(&client, &client).await;
    let response = app
        .request(
            "PATCH",
            &format!("/api/folders/{folder_id}"),
            Some(json!({ "end_date": date(2025, 6, 1) })),
            Some(&client.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let response = app
        .request(
            "PATCH",
            &format!("/api/folders/{folder_id}"),
            Some(json!({ "name": "Renamed" })),
            Some(&client.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["name"], "Renamed");
    assert_eq!(response.body["data"]["end_date"], "2026-12-31");
}

#[tokio::test]
async fn test_folder_delete_rejected_with_documents() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };
    let client = app.create_user(UserRole::Client).await;
    let folder_id = app.create_folder(&client, &client).await;
    app.upload(&client, folder_id, "policy.pdf").await;

    let response = app
        .request(
            "DELETE",
            &format!("/api/folders/{folder_id}"),
            None,
            Some(&client.token),
        )
        .await;

    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.body["error"], "CONFLICT");
}

#[tokio::test]
async fn test_folder_delete_rejected_with_project() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };
    let surveyor = app.create_user(UserRole::Surveyor).await;
    let client = app.create_user(UserRole::Client).await;
    let folder_id = app.create_folder(&surveyor, &client).await;
    app.create_project(&surveyor, folder_id, &[]).await;

    let response = app
        .request(
            "DELETE",
            &format!("/api/folders/{folder_id}"),
            None,
            Some(&surveyor.token),
        )
        .await;

    assert_eq!(response.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_empty_folder_can_be_deleted() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };
    let client = app.create_user(UserRole::Client).await;
    let folder_id = app.create_folder(&client, &client).await;

    let response = app
        .request(
            "DELETE",
            &format!("/api/folders/{folder_id}"),
            None,
            Some(&client.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app
        .request(
            "GET",
            &format!("/api/folders/{folder_id}"),
            None,
            Some(&client.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_folder_listing_is_scoped_by_role() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };
    let surveyor = app.create_user(UserRole::Surveyor).await;
    let client_a = app.create_user(UserRole::Client).await;
    let client_b = app.create_user(UserRole::Client).await;
    let auditor = app.create_user(UserRole::Auditor).await;

    let folder_a = app.create_folder(&client_a, &client_a).await;
    let folder_b = app.create_folder(&surveyor, &client_b).await;
    app.create_project(&surveyor, folder_b, &[&auditor]).await;

    let listed = app
        .request("GET", "/api/folders?per_page=100", None, Some(&client_a.token))
        .await;
    assert_eq!(listed.item_ids(), vec![folder_a]);

    let listed = app
        .request("GET", "/api/folders?per_page=100", None, Some(&auditor.token))
        .await;
    assert_eq!(listed.item_ids(), vec![folder_b]);

    // direct access to another client's folder is refused
    let response = app
        .request(
            "GET",
            &format!("/api/folders/{folder_b}"),
            None,
            Some(&client_a.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_project_auditor_has_read_only_folder_access() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };
    let surveyor = app.create_user(UserRole::Surveyor).await;
    let client = app.create_user(UserRole::Client).await;
    let auditor = app.create_user(UserRole::Auditor).await;
    let folder_id = app.create_folder(&surveyor, &client).await;
    app.create_project(&surveyor, folder_id, &[&auditor]).await;

    let view = app
        .request(
            "GET",
            &format!("/api/folders/{folder_id}"),
            None,
            Some(&auditor.token),
        )
        .await;
    assert_eq!(view.status, StatusCode::OK);

    let edit = app
        .request(
            "PATCH",
            &format!("/api/folders/{folder_id}"),
            Some(json!({ "name": "Hijacked" })),
            Some(&auditor.token),
        )
        .await;
    assert_eq!(edit.status, StatusCode::FORBIDDEN);

    let create = app
        .request(
            "POST",
            "/api/folders",
            Some(json!({
                "name": "Auditor folder",
                "start_date": date(2026, 1, 1),
                "end_date": date(2026, 2, 1),
            })),
            Some(&auditor.token),
        )
        .await;
    assert_eq!(create.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_client_cannot_create_folder_for_someone_else() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };
    let client = app.create_user(UserRole::Client).await;
    let other = app.create_user(UserRole::Client).await;

    let response = app
        .request(
            "POST",
            "/api/folders",
            Some(json!({
                "name": "Not mine",
                "owner_id": other.id,
                "start_date": date(2026, 1, 1),
                "end_date": date(2026, 2, 1),
            })),
            Some(&client.token),
        )
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
}
