pub mod error;
pub mod reports;
pub mod resources;

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Result;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::Config;
use crate::server::error::ApiError;
use crate::server::resources::{resource_routes, Courses, Enrollments, Programs, Students};
use crate::store::RecordStore;

/// Handlers open their own store connection per request from `db_path`.
#[derive(Debug, Clone)]
pub struct ApiState {
    db_path: PathBuf,
}

impl ApiState {
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
        }
    }
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

pub fn build_router(state: ApiState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        .route("/health", get(health))
        .route(
            "/api/enrollment/average_grade",
            get(reports::enrollment_average_grade),
        )
        .route(
            "/api/enrollment/get_metrics_by_program",
            get(reports::enrollment_metrics_by_program),
        )
        .route("/api/course", get(reports::list_courses));
    let api = resource_routes::<Students>(api, "/api/student", true);
    let api = resource_routes::<Programs>(api, "/api/undergraduate-program", true);
    let api = resource_routes::<Courses>(api, "/api/course", false);
    let api = resource_routes::<Enrollments>(api, "/api/enrollment", true);

    api.layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

pub async fn run_server(config: Config, bind: SocketAddr) -> Result<()> {
    let db_path = config.resolved_db_path();
    // Migrate once up front so a bad path fails at startup, not on first request.
    RecordStore::open(&db_path)?;
    info!("using record store at {}", db_path.display());

    let app = build_router(ApiState::new(db_path));
    let listener = tokio::net::TcpListener::bind(bind).await?;
    info!("REST API listening on http://{bind}");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("REST API stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!("failed listening for shutdown signal: {err}");
    }
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

fn open_store(state: &ApiState) -> std::result::Result<RecordStore, ApiError> {
    RecordStore::open(&state.db_path).map_err(ApiError::from)
}
