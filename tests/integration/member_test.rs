//! Client and auditor management.

use axum::http::StatusCode;
use serde_json::json;
use uuid::Uuid;

use auditvault_entity::user::UserRole;

use crate::helpers::{PASSWORD, TestApp};

#[tokio::test]
async fn test_role_scoped_listing_only_returns_that_role() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };
    let surveyor = app.create_user(UserRole::Surveyor).await;
    let client = app.create_user(UserRole::Client).await;
    let auditor = app.create_user(UserRole::Auditor).await;

    let clients = app
        .request("GET", "/api/clients?per_page=100", None, Some(&surveyor.token))
        .await;
    assert_eq!(clients.status, StatusCode::OK);
    assert!(clients.items().iter().all(|u| u["role"] == "client"));

    let found = app
        .request(
            "GET",
            &format!("/api/clients?search={}", client.email),
            None,
            Some(&surveyor.token),
        )
        .await;
    assert_eq!(found.item_ids(), vec![client.id]);

    // an auditor is not reachable through the client endpoints
    let wrong_role = app
        .request(
            "GET",
            &format!("/api/clients/{}", auditor.id),
            None,
            Some(&surveyor.token),
        )
        .await;
    assert_eq!(wrong_role.status, StatusCode::NOT_FOUND);

    let auditors = app
        .request("GET", "/api/auditors?per_page=100", None, Some(&surveyor.token))
        .await;
    assert!(auditors.items().iter().all(|u| u["role"] == "auditor"));
}

#[tokio::test]
async fn test_search_treats_wildcards_literally() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };
    let surveyor = app.create_user(UserRole::Surveyor).await;
    let tag = Uuid::new_v4().simple().to_string();
    let email = format!("ledger_{tag}@example.test");

    let created = app
        .request(
            "POST",
            "/api/clients",
            Some(json!({ "name": "Ledger Works", "email": email, "password": PASSWORD })),
            Some(&surveyor.token),
        )
        .await;
    assert_eq!(created.status, StatusCode::CREATED, "{:?}", created.body);

    let underscore = app
        .request("GET", "/api/clients?search=_&per_page=100", None, Some(&surveyor.token))
        .await;
    assert_eq!(underscore.status, StatusCode::OK);
    assert!(!underscore.items().is_empty());
    assert!(underscore.items().iter().all(|u| {
        u["email"].as_str().unwrap_or_default().contains('_')
            || u["name"].as_str().unwrap_or_default().contains('_')
    }));

    let percent = app
        .request("GET", "/api/clients?search=%25&per_page=100", None, Some(&surveyor.token))
        .await;
    assert!(percent.items().iter().all(|u| {
        u["email"].as_str().unwrap_or_default().contains('%')
            || u["name"].as_str().unwrap_or_default().contains('%')
    }));

    let exact = app
        .request(
            "GET",
            &format!("/api/clients?search=ledger_{tag}"),
            None,
            Some(&surveyor.token),
        )
        .await;
    assert_eq!(exact.item_ids(), vec![created.id()]);
}

#[tokio::test]
async fn test_member_management_is_surveyor_only() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };
    let client = app.create_user(UserRole::Client).await;
    let auditor = app.create_user(UserRole::Auditor).await;

    for user in [&client, &auditor] {
        let response = app
            .request("GET", "/api/clients", None, Some(&user.token))
            .await;
        assert_eq!(response.status, StatusCode::FORBIDDEN);
    }
}

#[tokio::test]
async fn test_create_and_patch_client() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };
    let surveyor = app.create_user(UserRole::Surveyor).await;
    let email = format!("new-client-{}@example.test", Uuid::new_v4().simple());

    let created = app
        .request(
            "POST",
            "/api/clients",
            Some(json!({
                "name": "Harbor Foods",
                "email": email,
                "password": PASSWORD,
                "company": "Harbor Foods Ltd",
            })),
            Some(&surveyor.token),
        )
        .await;
    assert_eq!(created.status, StatusCode::CREATED, "{:?}", created.body);
    assert_eq!(created.body["data"]["role"], "client");
    let id = created.id();

    let patched = app
        .request(
            "PATCH",
            &format!("/api/clients/{id}"),
            Some(json!({ "name": "Harbor Foods Group" })),
            Some(&surveyor.token),
        )
        .await;
    assert_eq!(patched.status, StatusCode::OK, "{:?}", patched.body);
    assert_eq!(patched.body["data"]["name"], "Harbor Foods Group");
    assert_eq!(patched.body["data"]["email"], email);
    assert_eq!(patched.body["data"]["company"], "Harbor Foods Ltd");

    let duplicate = app
        .request(
            "POST",
            "/api/clients",
            Some(json!({ "name": "Copy", "email": email, "password": PASSWORD })),
            Some(&surveyor.token),
        )
        .await;
    assert_eq!(duplicate.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_weak_password_rejected() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };
    let surveyor = app.create_user(UserRole::Surveyor).await;

    let response = app
        .request(
            "POST",
            "/api/auditors",
            Some(json!({
                "name": "Weak Auditor",
                "email": format!("weak-{}@example.test", Uuid::new_v4().simple()),
                "password": "password1",
            })),
            Some(&surveyor.token),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_auditor_delete_rejected_while_on_a_project() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };
    let surveyor = app.create_user(UserRole::Surveyor).await;
    let client = app.create_user(UserRole::Client).await;
    let auditor = app.create_user(UserRole::Auditor).await;

    let folder_id = app.create_folder(&surveyor, &client).await;
    let project_id = app.create_project(&surveyor, folder_id, &[&auditor]).await;

    let projects = app
        .request(
            "GET",
            &format!("/api/auditors/{}/projects", auditor.id),
            None,
            Some(&surveyor.token),
        )
        .await;
    assert_eq!(projects.item_ids(), vec![project_id]);

    let blocked = app
        .request(
            "DELETE",
            &format!("/api/auditors/{}", auditor.id),
            None,
            Some(&surveyor.token),
        )
        .await;
    assert_eq!(blocked.status, StatusCode::CONFLICT);

    let removed = app
        .request(
            "DELETE",
            &format!("/api/projects/{project_id}"),
            None,
            Some(&surveyor.token),
        )
        .await;
    assert_eq!(removed.status, StatusCode::OK);

    let deleted = app
        .request(
            "DELETE",
            &format!("/api/auditors/{}", auditor.id),
            None,
            Some(&surveyor.token),
        )
        .await;
    assert_eq!(deleted.status, StatusCode::OK, "{:?}", deleted.body);
}

#[tokio::test]
async fn test_client_delete_rejected_while_owning_folders() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };
    let surveyor = app.create_user(UserRole::Surveyor).await;
    let client = app.create_user(UserRole::Client).await;
    app.create_folder(&surveyor, &client).await;

    let response = app
        .request(
            "DELETE",
            &format!("/api/clients/{}", client.id),
            None,
            Some(&surveyor.token),
        )
        .await;

    assert_eq!(response.status, StatusCode::CONFLICT);
}
