//! Document visibility: uploader, folder owner, or project auditor.

use axum::http::StatusCode;
use uuid::Uuid;

use auditvault_entity::user::UserRole;

use crate::helpers::{TestApp, TestUser};

async fn status_of(app: &TestApp, user: &TestUser, path: &str) -> StatusCode {
    app.request("GET", path, None, Some(&user.token)).await.status
}

#[tokio::test]
async fn test_document_visibility_follows_access_rules() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };
    let surveyor = app.create_user(UserRole::Surveyor).await;
    let owner = app.create_user(UserRole::Client).await;
    let other_client = app.create_user(UserRole::Client).await;
    let assigned = app.create_user(UserRole::Auditor).await;
    let unassigned = app.create_user(UserRole::Auditor).await;

    let folder_id = app.create_folder(&surveyor, &owner).await;
    app.create_project(&surveyor, folder_id, &[&assigned]).await;

    let by_surveyor = app.upload(&surveyor, folder_id, "Scope Letter.pdf").await;
    let by_owner = app.upload(&owner, folder_id, "evidence.xlsx").await;

    for doc in [by_surveyor, by_owner] {
        let path = format!("/api/documents/{doc}");
        assert_eq!(status_of(&app, &owner, &path).await, StatusCode::OK);
        assert_eq!(status_of(&app, &assigned, &path).await, StatusCode::OK);
        assert_eq!(status_of(&app, &unassigned, &path).await, StatusCode::FORBIDDEN);
        assert_eq!(status_of(&app, &other_client, &path).await, StatusCode::FORBIDDEN);
    }

    // the surveyor sees what they uploaded, not every document
    let path = format!("/api/documents/{by_surveyor}");
    assert_eq!(status_of(&app, &surveyor, &path).await, StatusCode::OK);
    let path = format!("/api/documents/{by_owner}");
    assert_eq!(status_of(&app, &surveyor, &path).await, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_document_listing_uses_the_same_rules() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };
    let surveyor = app.create_user(UserRole::Surveyor).await;
    let owner = app.create_user(UserRole::Client).await;
    let assigned = app.create_user(UserRole::Auditor).await;
    let unassigned = app.create_user(UserRole::Auditor).await;

    let folder_id = app.create_folder(&surveyor, &owner).await;
    app.create_project(&surveyor, folder_id, &[&assigned]).await;
    let by_surveyor = app.upload(&surveyor, folder_id, "plan.pdf").await;
    let by_owner = app.upload(&owner, folder_id, "minutes.docx").await;

    let path = format!("/api/documents?folder_id={folder_id}");
    let mut owner_ids = app
        .request("GET", &path, None, Some(&owner.token))
        .await
        .item_ids();
    owner_ids.sort();
    let mut expected = vec![by_surveyor, by_owner];
    expected.sort();
    assert_eq!(owner_ids, expected);

    let mut auditor_ids = app
        .request(
            "GET",
            &format!("/api/folders/{folder_id}/documents"),
            None,
            Some(&assigned.token),
        )
        .await
        .item_ids();
    auditor_ids.sort();
    assert_eq!(auditor_ids, expected);

    let surveyor_ids = app
        .request("GET", &path, None, Some(&surveyor.token))
        .await
        .item_ids();
    assert_eq!(surveyor_ids, vec![by_surveyor]);

    let unassigned_ids = app
        .request("GET", &path, None, Some(&unassigned.token))
        .await
        .item_ids();
    assert!(unassigned_ids.is_empty());
}

#[tokio::test]
async fn test_document_view_exposes_display_name() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };
    let owner = app.create_user(UserRole::Client).await;
    let folder_id = app.create_folder(&owner, &owner).await;
    let doc = app.upload(&owner, folder_id, "Risk Register.PDF").await;

    let response = app
        .request("GET", &format!("/api/documents/{doc}"), None, Some(&owner.token))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let data = &response.body["data"];
    assert_eq!(data["extension"], "pdf");
    assert_eq!(data["folder_id"], folder_id.to_string());
    let key = data["url"].as_str().unwrap();
    assert!(key.starts_with(&format!("acmeaudits/{folder_id}/")), "{key}");
    assert!(key.ends_with("-riskregister.pdf"), "{key}");
}

#[tokio::test]
async fn test_download_returns_presigned_url() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };
    let owner = app.create_user(UserRole::Client).await;
    let stranger = app.create_user(UserRole::Client).await;
    let folder_id = app.create_folder(&owner, &owner).await;
    let doc = app.upload(&owner, folder_id, "report.pdf").await;
    let path = format!("/api/documents/{doc}/download");

    let response = app.request("GET", &path, None, Some(&owner.token)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["document_id"], doc.to_string());
    assert_eq!(
        response.body["data"]["expires_in"],
        app.config.storage.presign_get_seconds
    );
    assert!(
        response.body["data"]["url"]
            .as_str()
            .is_some_and(|u| u.contains("X-Method=GET"))
    );

    assert_eq!(status_of(&app, &stranger, &path).await, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_delete_document_removes_row_and_object() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };
    let owner = app.create_user(UserRole::Client).await;
    let auditor = app.create_user(UserRole::Auditor).await;
    let surveyor = app.create_user(UserRole::Surveyor).await;
    let folder_id = app.create_folder(&surveyor, &owner).await;
    app.create_project(&surveyor, folder_id, &[&auditor]).await;
    let doc = app.upload(&owner, folder_id, "obsolete.pdf").await;

    let key = app
        .request("GET", &format!("/api/documents/{doc}"), None, Some(&owner.token))
        .await
        .body["data"]["url"]
        .as_str()
        .map(str::to_string)
        .unwrap();
    assert!(app.store.get(&key).await.is_some());

    let response = app
        .request(
            "DELETE",
            &format!("/api/documents/{doc}"),
            None,
            Some(&owner.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(app.store.get(&key).await.is_none());

    let response = app
        .request("GET", &format!("/api/documents/{doc}"), None, Some(&owner.token))
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unknown_document_is_not_found() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };
    let owner = app.create_user(UserRole::Client).await;

    let response = app
        .request(
            "GET",
            &format!("/api/documents/{}", Uuid::new_v4()),
            None,
            Some(&owner.token),
        )
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}
