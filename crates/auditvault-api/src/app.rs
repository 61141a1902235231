//! Application builder: wires router, middleware, and state into an Axum app.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::http::StatusCode;
use sqlx::PgPool;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use auditvault_core::config::AppConfig;
use auditvault_core::config::app::CorsConfig;
use auditvault_core::error::AppError;
use auditvault_worker::{CronScheduler, DocumentCleanupJob};

use crate::middleware::compression::build_compression_layer;
use crate::middleware::cors::build_cors_layer;
use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState, cors_config: &CorsConfig) -> Router {
    let timeout = Duration::from_secs(state.config.server.request_timeout_seconds);
    build_router(state)
        .layer(build_timeout_layer(timeout))
        .layer(build_compression_layer())
        .layer(build_cors_layer(cors_config))
        .layer(TraceLayer::new_for_http())
}

/// Requests running past `timeout` get `408 Request Timeout`.
fn build_timeout_layer(timeout: Duration) -> TimeoutLayer {
    TimeoutLayer::with_status_code(StatusCode::REQUEST_TIMEOUT, timeout)
}

/// Runs the AuditVault server with the given configuration and database pool.
pub async fn run_server(config: AppConfig, db_pool: PgPool) -> Result<(), AppError> {
    tracing::info!("Starting AuditVault server...");

    // ── Step 1: Initialize object store ──────────────────────────
    tracing::info!(provider = %config.storage.provider, "Initializing object store...");
    let store = auditvault_storage::build_object_store(&config.storage).await?;

    // ── Step 2: Build services ───────────────────────────────────
    let state = AppState::new(config.clone(), db_pool, store);

    // ── Step 3: Retention scheduler ──────────────────────────────
    let mut scheduler = if config.cleanup.scheduler_enabled {
        let scheduler = CronScheduler::new().await?;
        scheduler
            .register(
                &config.cleanup.schedule,
                Arc::new(DocumentCleanupJob::new(Arc::clone(&state.cleanup_service))),
            )
            .await?;
        scheduler.start().await?;
        Some(scheduler)
    } else {
        tracing::info!("In-process cleanup scheduler disabled; relying on the cron endpoint");
        None
    };

    // ── Step 4: Build and start HTTP server ──────────────────────
    let app = build_app(state, &config.server.cors);
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("AuditVault server listening on {}", addr);

    // ── Step 5: Graceful shutdown ────────────────────────────────
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    if let Some(scheduler) = scheduler.as_mut() {
        let grace = Duration::from_secs(config.server.shutdown_grace_seconds);
        match tokio::time::timeout(grace, scheduler.shutdown()).await {
            Ok(Ok(())) => tracing::info!("Cleanup scheduler stopped"),
            Ok(Err(e)) => tracing::warn!(error = %e, "Cleanup scheduler shutdown failed"),
            Err(_) => tracing::warn!("Cleanup scheduler did not stop within the grace period"),
        }
    }

    tracing::info!("AuditVault server shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown...");
}
