use axum::{http::StatusCode, response::IntoResponse, Json};
use crate::errors::ReportError;
use super::models::ErrorResponse;

impl ReportError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ReportError::Validation(_) => StatusCode::BAD_REQUEST,
            ReportError::Conflict(_) => StatusCode::CONFLICT,
            ReportError::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ReportError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status_code();
        let body = ErrorResponse {
            success: false,
            error: self.to_string(),
            kind: self.classify().error_type,
        };
        (status, Json(body)).into_response()
    }
}
