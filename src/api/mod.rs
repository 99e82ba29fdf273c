pub mod routes;
pub mod models;
pub mod errors;

use std::sync::Arc;
use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use crate::config::ReportConfig;
use crate::errors::ReportError;
use crate::pipeline::ReportService;

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<ReportService>,
}

pub async fn create_app_state(config: &ReportConfig) -> Result<AppState, ReportError> {
    let service = ReportService::from_config(config).await?;
    Ok(AppState { service: Arc::new(service) })
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(routes::health::health_check))
        .route("/api/reports", get(routes::reports::list_reports))
        .route("/api/reports/generate", post(routes::reports::generate_report))
        .route("/api/reports/download/:file", get(routes::reports::download_report))
        .route("/api/reports/:execution_id", get(routes::reports::get_report))
        .route("/api/reports/:execution_id/download", get(routes::reports::download_for_execution))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
