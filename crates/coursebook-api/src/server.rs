//! API server implementation.
//!
//! Provides health, ready, and catalog endpoints over a shared document
//! store.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::error_handling::HandleErrorLayer;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use tower::limit::ConcurrencyLimitLayer;
use tower::timeout::TimeoutLayer;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use coursebook_core::storage::{DocumentStore, MemoryStore};
use coursebook_core::{Error, Result};

use crate::config::Config;
use crate::error::{ApiError, ApiErrorBody};
use crate::openapi;
use crate::routes;

/// Health check response.
#[derive(Debug, Serialize)]
#[cfg_attr(test, derive(serde::Deserialize))]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
}

/// Readiness check response.
#[derive(Debug, Serialize)]
#[cfg_attr(test, derive(serde::Deserialize))]
pub struct ReadyResponse {
    /// Service readiness status.
    pub ready: bool,
    /// Optional message about readiness state.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Shared application state for all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Config,
    /// Document store holding course documents.
    storage: Arc<dyn DocumentStore>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .field("storage", &"<DocumentStore>")
            .finish()
    }
}

impl AppState {
    /// Creates new application state with the given store.
    #[must_use]
    pub fn new(config: Config, storage: Arc<dyn DocumentStore>) -> Self {
        Self { config, storage }
    }

    /// Creates new application state with an in-memory store.
    #[must_use]
    pub fn with_memory_store(config: Config) -> Self {
        Self::new(config, Arc::new(MemoryStore::new()))
    }

    /// Returns the document store.
    #[must_use]
    pub fn storage(&self) -> Arc<dyn DocumentStore> {
        Arc::clone(&self.storage)
    }
}

/// Health check endpoint handler.
///
/// Returns 200 OK if the service is alive. A shallow check that doesn't
/// verify dependencies.
async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// Readiness check endpoint handler.
///
/// Returns 200 OK if the service is ready to accept requests. A `head` on
/// a missing key is sufficient to validate the store path.
async fn ready(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let check_key = "__coursebook/ready-check";
    match state.storage().head(check_key).await {
        Ok(_) => (
            StatusCode::OK,
            Json(ReadyResponse {
                ready: true,
                message: None,
            }),
        ),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ReadyResponse {
                ready: false,
                message: Some(format!("storage check failed: {e}")),
            }),
        ),
    }
}

async fn not_found() -> ApiError {
    ApiError::not_found("Not Found")
}

async fn handle_timeout_error(_err: tower::BoxError) -> (StatusCode, Json<ApiErrorBody>) {
    (
        StatusCode::SERVICE_UNAVAILABLE,
        Json(ApiErrorBody {
            detail: "Request timed out".to_string(),
        }),
    )
}

/// Creates the API router.
pub fn router(state: Arc<AppState>) -> Router {
    let request_timeout = state.config.request_timeout_secs.map(Duration::from_secs);
    let concurrency_limit = state.config.concurrency_limit;

    let router = Router::new()
        .route("/health", get(health))
        .route("/ready", get(ready))
        .route("/openapi.json", get(openapi::get_openapi_json))
        .merge(routes::catalog_routes())
        .fallback(not_found)
        .layer(TraceLayer::new_for_http());

    let router = match concurrency_limit {
        Some(limit) => router.layer(ConcurrencyLimitLayer::new(limit)),
        None => router,
    };

    let router = match request_timeout {
        Some(timeout) => router.layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(handle_timeout_error))
                .layer(TimeoutLayer::new(timeout)),
        ),
        None => router,
    };

    router.with_state(state)
}

/// The Coursebook API server.
pub struct Server {
    state: Arc<AppState>,
}

impl Server {
    /// Creates a server with an in-memory store.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            state: Arc::new(AppState::with_memory_store(config)),
        }
    }

    /// Creates a server over the given document store.
    #[must_use]
    pub fn with_storage(config: Config, storage: Arc<dyn DocumentStore>) -> Self {
        Self {
            state: Arc::new(AppState::new(config, storage)),
        }
    }

    /// Returns the router without binding a listener (for tests).
    #[must_use]
    pub fn test_router(&self) -> Router {
        router(Arc::clone(&self.state))
    }

    /// Binds the configured port and serves requests until shutdown.
    ///
    /// # Errors
    ///
    /// Returns an error if the listener cannot be bound or the server
    /// fails while running.
    pub async fn serve(self) -> Result<()> {
        let addr = SocketAddr::from(([0, 0, 0, 0], self.state.config.http_port));
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| Error::Internal {
                message: format!("failed to bind {addr}: {e}"),
            })?;

        tracing::info!(%addr, "HTTP server listening");

        axum::serve(listener, router(self.state)).await.map_err(|e| Error::Internal {
            message: format!("server error: {e}"),
        })
    }
}
