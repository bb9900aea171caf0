use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tower_http::cors::{Any, CorsLayer};
use utoipa::ToSchema;

use crate::error::{CoreError, CoreResult};
use crate::service::StringService;
use crate::storage::SharedRecordStore;

pub mod error;
pub mod openapi;
pub mod strings;

pub struct Server {
    addr: SocketAddr,
    shutdown: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
}

impl Server {
    /// Bind `bind_addr` and serve the API over `store` in a background task.
    pub async fn start(bind_addr: &str, store: SharedRecordStore) -> CoreResult<Self> {
        let app = router(StringService::new(store));
        let listener = TcpListener::bind(bind_addr).await.map_err(|error| {
            CoreError::Internal(format!("failed to bind {bind_addr}: {error}"))
        })?;
        let addr = listener
            .local_addr()
            .map_err(|error| CoreError::Internal(error.to_string()))?;
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        let task = tokio::spawn(async move {
            if let Err(error) = axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    let _ = shutdown_rx.await;
                })
                .await
            {
                tracing::error!("server stopped with error: {error}");
            }
        });
        tracing::info!("listening on http://{addr}");

        Ok(Server {
            addr,
            shutdown: Some(shutdown_tx),
            task: Some(task),
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn shutdown(&mut self) -> CoreResult<()> {
        if let Some(sender) = self.shutdown.take() {
            sender
                .send(())
                .map_err(|_| CoreError::Internal("failed to send server shutdown signal".to_string()))
        } else {
            Ok(())
        }
    }

    /// Signal shutdown and wait for in-flight requests to drain.
    pub async fn stop(mut self) -> CoreResult<()> {
        self.shutdown()?;
        if let Some(task) = self.task.take() {
            task.await
                .map_err(|error| CoreError::Internal(format!("server task failed: {error}")))?;
        }
        Ok(())
    }
}

impl Drop for Server {
    fn drop(&mut self) {
        let _ = self.shutdown();
    }
}

/// The full HTTP surface over `service`.
pub fn router(service: StringService) -> Router {
    let state = Arc::new(ServerState { service });
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route(
            "/strings",
            get(strings::list_strings).post(strings::create_string),
        )
        .route(
            "/strings/filter-by-natural-language",
            get(strings::filter_by_natural_language),
        )
        .route(
            "/strings/:value",
            get(strings::get_string).delete(strings::delete_string),
        )
        .with_state(state)
        .layer(cors)
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ServiceInfo {
    pub message: String,
    pub version: String,
    pub endpoints: BTreeMap<String, String>,
}

#[utoipa::path(
    get,
    path = "/",
    tag = "system",
    responses((status = 200, body = ServiceInfo))
)]
pub(crate) async fn index() -> Json<ServiceInfo> {
    let endpoints = [
        ("POST /strings", "Create/analyze string"),
        ("GET /strings/{value}", "Get specific string"),
        ("GET /strings", "Get all strings with filtering"),
        (
            "GET /strings/filter-by-natural-language",
            "Natural language filtering",
        ),
        ("DELETE /strings/{value}", "Delete string"),
    ]
    .into_iter()
    .map(|(route, description)| (route.to_string(), description.to_string()))
    .collect();

    Json(ServiceInfo {
        message: "String Analyzer API".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        endpoints,
    })
}

async fn health() -> &'static str {
    "ok"
}

pub(crate) struct ServerState {
    pub(crate) service: StringService,
}
