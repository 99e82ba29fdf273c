use axum::{
    body::Body,
    extract::{rejection::JsonRejection, Path, Query, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use tokio_util::io::ReaderStream;
use crate::api::AppState;
use crate::api::models::{
    GenerateReportRequest, ListQuery, ReportListResponse, ReportResponse, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE,
};
use crate::errors::ReportError;
use crate::reporting::ArtifactStream;

pub async fn generate_report(
    State(state): State<AppState>,
    payload: Result<Json<GenerateReportRequest>, JsonRejection>,
) -> Result<Json<ReportResponse>, ReportError> {
    let Json(request) = payload.map_err(|e| ReportError::Validation(e.body_text()))?;

    // Detached so a client disconnect cannot interrupt a render that already started
    let service = state.service.clone();
    let report = tokio::spawn(async move { service.generate(request).await })
        .await
        .map_err(|e| ReportError::Internal(format!("Generation task failed: {}", e)))??;

    Ok(Json(ReportResponse { success: true, report }))
}

pub async fn list_reports(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<ReportListResponse>, ReportError> {
    let limit = query.limit.unwrap_or(DEFAULT_PAGE_SIZE).min(MAX_PAGE_SIZE);
    let offset = query.offset.unwrap_or(0);

    let reports = state.service.list_reports(limit, offset)?;
    Ok(Json(ReportListResponse { success: true, total: reports.len(), reports }))
}

pub async fn get_report(
    State(state): State<AppState>,
    Path(execution_id): Path<String>,
) -> Result<Json<ReportResponse>, ReportError> {
    let report = state.service.get_report(&execution_id)?;
    Ok(Json(ReportResponse { success: true, report }))
}

pub async fn download_report(
    State(state): State<AppState>,
    Path(file): Path<String>,
) -> Result<Response, ReportError> {
    let artifact = state.service.fetch_artifact(&file).await?;
    Ok(artifact_response(artifact))
}

pub async fn download_for_execution(
    State(state): State<AppState>,
    Path(execution_id): Path<String>,
) -> Result<Response, ReportError> {
    let artifact = state.service.fetch_artifact_for_execution(&execution_id).await?;
    Ok(artifact_response(artifact))
}

fn artifact_response(artifact: ArtifactStream) -> Response {
    let ArtifactStream { file, file_name, size, content_type } = artifact;
    let headers = [
        (header::CONTENT_TYPE, content_type.to_string()),
        (header::CONTENT_LENGTH, size.to_string()),
        (header::CONTENT_DISPOSITION, format!("attachment; filename=\"{}\"", file_name)),
    ];
    (headers, Body::from_stream(ReaderStream::new(file))).into_response()
}
