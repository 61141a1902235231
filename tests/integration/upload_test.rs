//! Presigned and chunked uploads.

use axum::http::StatusCode;
use bytes::Bytes;
use serde_json::json;

use auditvault_core::traits::storage::ObjectStore;
use auditvault_entity::user::UserRole;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_only_final_chunk_is_stored() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };
    let owner = app.create_user(UserRole::Client).await;
    let folder_id = app.create_folder(&owner, &owner).await;
    let before = app.store.len().await;

    for index in 0..2 {
        let response = app
            .upload_chunk(&owner, folder_id, "ledger.csv", index, 3, b"partial")
            .await;
        assert_eq!(response.status, StatusCode::ACCEPTED, "{:?}", response.body);
        assert_eq!(response.body["data"]["status"], "accepted");
        assert_eq!(response.body["data"]["chunk_index"], index);
    }
    assert_eq!(app.store.len().await, before);

    let response = app
        .upload_chunk(&owner, folder_id, "ledger.csv", 2, 3, b"final bytes")
        .await;
    assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
    assert_eq!(response.body["data"]["status"], "completed");

    let key = response.body["data"]["document"]["url"].as_str().unwrap();
    let stored = app.store.get(key).await.expect("final chunk stored");
    assert_eq!(stored.data, Bytes::from_static(b"final bytes"));
}

#[tokio::test]
async fn test_chunk_position_and_size_are_validated() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };
    let owner = app.create_user(UserRole::Client).await;
    let folder_id = app.create_folder(&owner, &owner).await;

    let out_of_range = app
        .upload_chunk(&owner, folder_id, "a.pdf", 3, 3, b"x")
        .await;
    assert_eq!(out_of_range.status, StatusCode::BAD_REQUEST);

    let zero_total = app
        .upload_chunk(&owner, folder_id, "a.pdf", 0, 0, b"x")
        .await;
    assert_eq!(zero_total.status, StatusCode::BAD_REQUEST);

    let oversized = vec![0u8; app.config.storage.max_chunk_bytes + 1];
    let too_big = app
        .upload_chunk(&owner, folder_id, "a.pdf", 0, 1, &oversized)
        .await;
    assert_eq!(too_big.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_upload_requires_folder_management_rights() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };
    let surveyor = app.create_user(UserRole::Surveyor).await;
    let owner = app.create_user(UserRole::Client).await;
    let other = app.create_user(UserRole::Client).await;
    let auditor = app.create_user(UserRole::Auditor).await;
    let folder_id = app.create_folder(&surveyor, &owner).await;
    app.create_project(&surveyor, folder_id, &[&auditor]).await;

    for user in [&other, &auditor] {
        let response = app
            .upload_chunk(user, folder_id, "intrusion.pdf", 0, 1, b"x")
            .await;
        assert_eq!(response.status, StatusCode::FORBIDDEN);
    }

    let response = app
        .upload_chunk(&surveyor, folder_id, "scope.pdf", 0, 1, b"x")
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_presign_then_complete() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };
    let owner = app.create_user(UserRole::Client).await;
    let folder_id = app.create_folder(&owner, &owner).await;

    let presigned = app
        .request(
            "POST",
            "/api/uploads/presign",
            Some(json!({ "folder_id": folder_id, "file_name": "Audit Plan.pdf" })),
            Some(&owner.token),
        )
        .await;
    assert_eq!(presigned.status, StatusCode::OK, "{:?}", presigned.body);
    let data = &presigned.body["data"];
    assert_eq!(data["method"], "PUT");
    assert_eq!(data["content_type"], "application/pdf");
    assert_eq!(data["expires_in"], app.config.storage.presign_put_seconds);
    let key = data["key"].as_str().unwrap().to_string();
    assert!(key.starts_with(&format!("acmeaudits/{folder_id}/")));
    assert!(key.ends_with("-auditplan.pdf"));

    // nothing has been uploaded yet
    let early = app
        .request(
            "POST",
            "/api/uploads/complete",
            Some(json!({ "folder_id": folder_id, "key": key })),
            Some(&owner.token),
        )
        .await;
    assert_eq!(early.status, StatusCode::BAD_REQUEST);

    app.store
        .put(&key, Bytes::from_static(b"%PDF"), "application/pdf")
        .await
        .unwrap();

    let completed = app
        .request(
            "POST",
            "/api/uploads/complete",
            Some(json!({ "folder_id": folder_id, "key": key })),
            Some(&owner.token),
        )
        .await;
    assert_eq!(completed.status, StatusCode::CREATED, "{:?}", completed.body);
    assert_eq!(completed.body["data"]["url"], key);
    assert_eq!(completed.body["data"]["uploaded_by"], owner.id.to_string());
}

#[tokio::test]
async fn test_complete_rejects_key_from_another_folder() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };
    let owner = app.create_user(UserRole::Client).await;
    let folder_a = app.create_folder(&owner, &owner).await;
    let folder_b = app.create_folder(&owner, &owner).await;

    let key = format!("acmeaudits/{folder_a}/1767225600000-notes.txt");
    app.store
        .put(&key, Bytes::from_static(b"notes"), "text/plain")
        .await
        .unwrap();

    let response = app
        .request(
            "POST",
            "/api/uploads/complete",
            Some(json!({ "folder_id": folder_b, "key": key })),
            Some(&owner.token),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}
