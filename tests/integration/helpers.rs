//! Shared test helpers for integration tests.

use std::sync::{Arc, OnceLock};

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::NaiveDate;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

use auditvault_api::{AppState, build_app};
use auditvault_auth::jwt::JwtEncoder;
use auditvault_auth::password::PasswordHasher;
use auditvault_core::config::AppConfig;
use auditvault_core::traits::storage::ObjectStore;
use auditvault_database::DatabasePool;
use auditvault_database::repositories::UserRepository;
use auditvault_entity::user::{CreateUser, UserRole};
use auditvault_storage::MemoryObjectStore;

pub const PASSWORD: &str = "Granite-Harbor-Lantern-47";
pub const CRON_SECRET: &str = "integration-cron-secret";
const JWT_SECRET: &str = "integration-test-secret-with-enough-length";
const BOUNDARY: &str = "auditvault-test-boundary";

/// Hashing is slow in debug builds; every test user shares one hash.
fn password_hash() -> &'static str {
    static HASH: OnceLock<String> = OnceLock::new();
    HASH.get_or_init(|| {
        PasswordHasher::new()
            .hash_password(PASSWORD)
            .expect("hash test password")
    })
}

/// Test application context
pub struct TestApp {
    /// The Axum app with the full middleware stack
    pub router: Router,
    /// Database pool for direct queries
    pub db_pool: PgPool,
    /// The in-memory store behind the app
    pub store: MemoryObjectStore,
    /// Application config
    pub config: AppConfig,
}

/// A user created for one test, with a ready bearer token.
#[derive(Debug, Clone)]
pub struct TestUser {
    pub id: Uuid,
    pub email: String,
    pub token: String,
}

impl TestApp {
    /// Build the app, or `None` when no test database is configured.
    pub async fn try_new() -> Option<Self> {
        Self::with_config(|_| {}).await
    }

    /// Like [`TestApp::try_new`] with a config tweak applied first.
    pub async fn with_config(tweak: impl FnOnce(&mut AppConfig)) -> Option<Self> {
        let Ok(url) = std::env::var("DATABASE_URL") else {
            eprintln!("DATABASE_URL not set; skipping integration test");
            return None;
        };

        let mut config = AppConfig {
            environment: "test".to_string(),
            ..AppConfig::default()
        };
        config.database.url = url;
        config.database.max_connections = 4;
        config.auth.jwt_secret = JWT_SECRET.to_string();
        config.cleanup.cron_secret = CRON_SECRET.to_string();
        config.storage.provider = "memory".to_string();
        config.storage.company = "Acme Audits".to_string();
        config.storage.max_chunk_bytes = 64 * 1024;
        tweak(&mut config);

        let db = DatabasePool::connect(&config.database)
            .await
            .expect("Failed to connect to test database");
        auditvault_database::migration::run_migrations(db.pool())
            .await
            .expect("Failed to run migrations");

        let store = MemoryObjectStore::new("test-bucket");
        let shared: Arc<dyn ObjectStore> = Arc::new(store.clone());
        let state = AppState::new(config.clone(), db.handle(), shared);
        let router = build_app(state, &config.server.cors);

        Some(Self {
            router,
            db_pool: db.handle(),
            store,
            config,
        })
    }

    /// Insert a user directly and mint a token for them.
    pub async fn create_user(&self, role: UserRole) -> TestUser {
        let email = format!("{}-{}@example.test", role, Uuid::new_v4().simple());
        let user = UserRepository::new(self.db_pool.clone())
            .create(&CreateUser {
                name: format!("Test {}", role.display_name()),
                email: email.clone(),
                password_hash: password_hash().to_string(),
                role,
                company: Some("Acme Audits".to_string()),
            })
            .await
            .expect("Failed to create test user");

        let token = JwtEncoder::new(&self.config.auth)
            .issue(&user)
            .expect("Failed to issue token")
            .access_token;

        TestUser {
            id: user.id,
            email,
            token,
        }
    }

    /// Create a folder owned by `owner` through the API as `actor`.
    pub async fn create_folder(&self, actor: &TestUser, owner: &TestUser) -> Uuid {
        let response = self
            .request(
                "POST",
                "/api/folders",
                Some(json!({
                    "name": format!("Audit {}", Uuid::new_v4().simple()),
                    "owner_id": owner.id,
                    "start_date": date(2026, 1, 1),
                    "end_date": date(2026, 12, 31),
                })),
                Some(&actor.token),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
        response.id()
    }

    /// Create a project on `folder_id` with the given auditors.
    pub async fn create_project(
        &self,
        surveyor: &TestUser,
        folder_id: Uuid,
        auditors: &[&TestUser],
    ) -> Uuid {
        let ids: Vec<Uuid> = auditors.iter().map(|a| a.id).collect();
        let response = self
            .request(
                "POST",
                "/api/projects",
                Some(json!({ "folder_id": folder_id, "auditor_ids": ids })),
                Some(&surveyor.token),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
        response.id()
    }

    /// Upload a single-chunk document and return its id.
    pub async fn upload(&self, user: &TestUser, folder_id: Uuid, file_name: &str) -> Uuid {
        let response = self
            .upload_chunk(user, folder_id, file_name, 0, 1, b"%PDF-1.7 test")
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
        response.body["data"]["document"]["id"]
            .as_str()
            .and_then(|s| Uuid::parse_str(s).ok())
            .expect("document id in upload response")
    }

    /// POST one chunk as multipart form data.
    pub async fn upload_chunk(
        &self,
        user: &TestUser,
        folder_id: Uuid,
        file_name: &str,
        chunk_index: u32,
        total_chunks: u32,
        data: &[u8],
    ) -> TestResponse {
        let mut body = Vec::new();
        for (name, value) in [
            ("folder_id", folder_id.to_string()),
            ("file_name", file_name.to_string()),
            ("chunk_index", chunk_index.to_string()),
            ("total_chunks", total_chunks.to_string()),
        ] {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
                )
                .as_bytes(),
            );
        }
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"blob\"\r\n\
                 Content-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(data);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

        let req = Request::builder()
            .method("POST")
            .uri("/api/uploads/chunk")
            .header(
                "Content-Type",
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .header("Authorization", format!("Bearer {}", user.token))
            .body(Body::from(body))
            .expect("Failed to build request");

        self.send(req).await
    }

    /// Make a JSON request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {}", token));
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        self.send(req).await
    }

    async fn send(&self, req: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to read body")
            .to_bytes();

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}

impl TestResponse {
    /// The `data.id` of a created resource.
    pub fn id(&self) -> Uuid {
        self.body["data"]["id"]
            .as_str()
            .and_then(|s| Uuid::parse_str(s).ok())
            .unwrap_or_else(|| panic!("no data.id in {:?}", self.body))
    }

    /// The `data.items` array of a page response.
    pub fn items(&self) -> &Vec<Value> {
        self.body["data"]["items"]
            .as_array()
            .unwrap_or_else(|| panic!("no data.items in {:?}", self.body))
    }

    /// Ids of the items on a page response.
    pub fn item_ids(&self) -> Vec<Uuid> {
        self.items()
            .iter()
            .filter_map(|item| item["id"].as_str())
            .filter_map(|s| Uuid::parse_str(s).ok())
            .collect()
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}
