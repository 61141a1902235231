//! Application state shared across all handlers and extractors.

use std::sync::Arc;
use std::time::Duration;

use sqlx::PgPool;

use auditvault_auth::jwt::{JwtDecoder, JwtEncoder};
use auditvault_auth::password::{PasswordHasher, PasswordValidator};
use auditvault_core::config::AppConfig;
use auditvault_core::traits::storage::ObjectStore;
use auditvault_database::repositories::{
    DocumentRepository, FolderRepository, ProjectRepository, UserRepository,
};
use auditvault_entity::user::UserRole;
use auditvault_service::{
    AuditorService, AuthService, CleanupService, ClientService, DocumentService, FolderService,
    ProjectService, RoleDirectory, UploadService,
};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,

    // ── Infrastructure ───────────────────────────────────────
    /// PostgreSQL connection pool
    pub db_pool: PgPool,
    /// Object store holding document bytes
    pub store: Arc<dyn ObjectStore>,

    // ── Auth ─────────────────────────────────────────────────
    /// JWT token decoder and validator
    pub jwt_decoder: Arc<JwtDecoder>,

    // ── Services ─────────────────────────────────────────────
    pub auth_service: Arc<AuthService>,
    pub client_service: Arc<ClientService>,
    pub auditor_service: Arc<AuditorService>,
    pub folder_service: Arc<FolderService>,
    pub project_service: Arc<ProjectService>,
    pub document_service: Arc<DocumentService>,
    pub upload_service: Arc<UploadService>,
    pub cleanup_service: Arc<CleanupService>,
}

impl AppState {
    /// Wire repositories, auth components, and services.
    pub fn new(config: AppConfig, db_pool: PgPool, store: Arc<dyn ObjectStore>) -> Self {
        // ── Repositories ─────────────────────────────────────
        let user_repo = Arc::new(UserRepository::new(db_pool.clone()));
        let folder_repo = Arc::new(FolderRepository::new(db_pool.clone()));
        let project_repo = Arc::new(ProjectRepository::new(db_pool.clone()));
        let document_repo = Arc::new(DocumentRepository::new(db_pool.clone()));

        // ── Auth ─────────────────────────────────────────────
        let password_hasher = Arc::new(PasswordHasher::new());
        let password_validator = Arc::new(PasswordValidator::new(&config.auth));
        let jwt_encoder = Arc::new(JwtEncoder::new(&config.auth));
        let jwt_decoder = Arc::new(JwtDecoder::new(&config.auth));

        // ── Services ─────────────────────────────────────────
        let directory = |role| {
            RoleDirectory::new(
                role,
                Arc::clone(&user_repo),
                Arc::clone(&password_hasher),
                Arc::clone(&password_validator),
            )
        };

        let auth_service = Arc::new(AuthService::new(
            Arc::clone(&user_repo),
            Arc::clone(&password_hasher),
            jwt_encoder,
        ));
        let client_service = Arc::new(ClientService::new(
            directory(UserRole::Client),
            Arc::clone(&folder_repo),
        ));
        let auditor_service = Arc::new(AuditorService::new(
            directory(UserRole::Auditor),
            Arc::clone(&project_repo),
        ));
        let folder_service = Arc::new(FolderService::new(
            Arc::clone(&folder_repo),
            Arc::clone(&user_repo),
            Arc::clone(&document_repo),
        ));
        let project_service = Arc::new(ProjectService::new(
            Arc::clone(&project_repo),
            Arc::clone(&folder_repo),
            Arc::clone(&user_repo),
        ));
        let document_service = Arc::new(DocumentService::new(
            Arc::clone(&document_repo),
            Arc::clone(&store),
            Duration::from_secs(config.storage.presign_get_seconds),
        ));
        let upload_service = Arc::new(UploadService::new(
            Arc::clone(&folder_service),
            Arc::clone(&document_repo),
            Arc::clone(&store),
            config.storage.company.clone(),
            Duration::from_secs(config.storage.presign_put_seconds),
            config.storage.max_chunk_bytes,
        ));
        let cleanup_service = Arc::new(CleanupService::new(
            Arc::clone(&document_repo),
            Arc::clone(&store),
            config.cleanup.retention_days,
        ));

        Self {
            config: Arc::new(config),
            db_pool,
            store,
            jwt_decoder,
            auth_service,
            client_service,
            auditor_service,
            folder_service,
            project_service,
            document_service,
            upload_service,
            cleanup_service,
        }
    }
}
