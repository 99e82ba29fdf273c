use serde::{Deserialize, Serialize};
use crate::models::ReportRecord;

pub use crate::pipeline::GenerateRequest as GenerateReportRequest;

pub const DEFAULT_PAGE_SIZE: usize = 20;
pub const MAX_PAGE_SIZE: usize = 100;

#[derive(Deserialize)]
pub struct ListQuery {
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

#[derive(Serialize)]
pub struct ReportResponse {
    pub success: bool,
    pub report: ReportRecord,
}

#[derive(Serialize)]
pub struct ReportListResponse {
    pub success: bool,
    pub total: usize,
    pub reports: Vec<ReportRecord>,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
    pub kind: &'static str,
}
