//! Route definitions for the AuditVault HTTP API.
//!
//! All routes are organized by resource and mounted under `/api`.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{get, post},
};

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Multipart framing on top of the raw chunk bytes.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// Build the API router.
///
/// Receives the fully-constructed `AppState` and threads it through
/// every route via `.with_state(state)`.
pub fn build_router(state: AppState) -> Router {
    let max_body = state.config.storage.max_chunk_bytes + MULTIPART_OVERHEAD_BYTES;

    let api_routes = Router::new()
        .merge(health_routes())
        .merge(auth_routes())
        .merge(client_routes())
        .merge(auditor_routes())
        .merge(folder_routes())
        .merge(project_routes())
        .merge(document_routes())
        .merge(upload_routes())
        .merge(cron_routes());

    Router::new()
        .nest("/api", api_routes)
        .layer(DefaultBodyLimit::max(max_body))
        .layer(axum_middleware::from_fn(
            middleware::logging::request_logging,
        ))
        .with_state(state)
}

/// Liveness
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}

/// Login and current user
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/me", get(handlers::auth::me))
}

/// Client management (surveyor)
fn client_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/clients",
            get(handlers::clients::list_clients).post(handlers::clients::create_client),
        )
        .route(
            "/clients/{id}",
            get(handlers::clients::get_client)
                .patch(handlers::clients::update_client)
                .delete(handlers::clients::delete_client),
        )
}

/// Auditor management (surveyor)
fn auditor_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/auditors",
            get(handlers::auditors::list_auditors).post(handlers::auditors::create_auditor),
        )
        .route(
            "/auditors/{id}",
            get(handlers::auditors::get_auditor)
                .patch(handlers::auditors::update_auditor)
                .delete(handlers::auditors::delete_auditor),
        )
        .route(
            "/auditors/{id}/projects",
            get(handlers::auditors::auditor_projects),
        )
}

/// Folder CRUD and listing
fn folder_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/folders",
            get(handlers::folders::list_folders).post(handlers::folders::create_folder),
        )
        .route(
            "/folders/{id}",
            get(handlers::folders::get_folder)
                .patch(handlers::folders::update_folder)
                .delete(handlers::folders::delete_folder),
        )
        .route(
            "/folders/{id}/documents",
            get(handlers::folders::folder_documents),
        )
}

/// Projects
fn project_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/projects",
            get(handlers::projects::list_projects).post(handlers::projects::create_project),
        )
        .route(
            "/projects/{id}",
            get(handlers::projects::get_project)
                .patch(handlers::projects::update_project)
                .delete(handlers::projects::delete_project),
        )
}

/// Documents
fn document_routes() -> Router<AppState> {
    Router::new()
        .route("/documents", get(handlers::documents::list_documents))
        .route(
            "/documents/{id}",
            get(handlers::documents::get_document).delete(handlers::documents::delete_document),
        )
        .route(
            "/documents/{id}/download",
            get(handlers::documents::download_document),
        )
}

/// Presigned and chunked uploads
fn upload_routes() -> Router<AppState> {
    Router::new()
        .route("/uploads/presign", post(handlers::uploads::presign_upload))
        .route("/uploads/complete", post(handlers::uploads::complete_upload))
        .route("/uploads/chunk", post(handlers::uploads::upload_chunk))
}

/// External cron trigger
fn cron_routes() -> Router<AppState> {
    Router::new().route(
        "/cron/cleanup",
        get(handlers::cron::cleanup).post(handlers::cron::cleanup),
    )
}
