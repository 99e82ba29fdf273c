use std::path::PathBuf;

use chrono::{DateTime, Utc};
use rusqlite::{ErrorCode, OptionalExtension};
use crate::errors::ReportError;
use crate::models::{ArtifactFormat, ReportRecord, ReportStatus, ReportSummary};
use super::{Database, ReportStore};
use tracing::debug;

const SELECT_COLUMNS: &str = "SELECT id, execution_id, input_findings, summary, artifact_path, artifact_url, file_name, file_size, format, status, generated_at, created_at, updated_at FROM reports";

/// Raw column values, converted into a `ReportRecord` outside the rusqlite closure.
struct ReportRow {
    id: String,
    execution_id: String,
    input_findings: String,
    summary: String,
    artifact_path: String,
    artifact_url: String,
    file_name: String,
    file_size: i64,
    format: String,
    status: String,
    generated_at: String,
    created_at: String,
    updated_at: String,
}

impl ReportRow {
    fn from_row(row: &rusqlite::Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            execution_id: row.get(1)?,
            input_findings: row.get(2)?,
            summary: row.get(3)?,
            artifact_path: row.get(4)?,
            artifact_url: row.get(5)?,
            file_name: row.get(6)?,
            file_size: row.get(7)?,
            format: row.get(8)?,
            status: row.get(9)?,
            generated_at: row.get(10)?,
            created_at: row.get(11)?,
            updated_at: row.get(12)?,
        })
    }

    fn into_record(self) -> Result<ReportRecord, ReportError> {
        let summary: ReportSummary = serde_json::from_str(&self.summary)
            .map_err(|e| ReportError::Storage(format!("Corrupt summary for '{}': {}", self.execution_id, e)))?;
        let input_findings: Vec<serde_json::Value> = serde_json::from_str(&self.input_findings)
            .map_err(|e| ReportError::Storage(format!("Corrupt findings for '{}': {}", self.execution_id, e)))?;

        Ok(ReportRecord {
            id: self.id,
            input_findings,
            summary,
            artifact_path: self.artifact_path,
            artifact_url: self.artifact_url,
            file_name: self.file_name,
            file_size: u64::try_from(self.file_size).unwrap_or_default(),
            format: self.format.parse().map_err(ReportError::Storage)?,
            status: self.status.parse().map_err(ReportError::Storage)?,
            generated_at: parse_timestamp(&self.generated_at)?,
            created_at: parse_timestamp(&self.created_at)?,
            updated_at: parse_timestamp(&self.updated_at)?,
            execution_id: self.execution_id,
        })
    }
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, ReportError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| ReportError::Storage(format!("Invalid timestamp '{}': {}", raw, e)))
}

impl ReportStore for Database {
    fn create_unique(&self, record: &ReportRecord) -> Result<(), ReportError> {
        if record.summary.total != record.input_findings.len() {
            return Err(ReportError::Internal(format!(
                "summary total {} does not match {} submitted findings",
                record.summary.total,
                record.input_findings.len()
            )));
        }

        let input_findings = serde_json::to_string(&record.input_findings)?;
        let summary = serde_json::to_string(&record.summary)?;
        let format: ArtifactFormat = record.format;
        let status: ReportStatus = record.status;

        let conn = self.lock()?;
        let result = conn.execute(
            "INSERT INTO reports (id, execution_id, input_findings, summary, total_findings, artifact_path, artifact_url, file_name, file_size, format, status, generated_at, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)",
            rusqlite::params![
                record.id,
                record.execution_id,
                input_findings,
                summary,
                record.summary.total as i64,
                record.artifact_path,
                record.artifact_url,
                record.file_name,
                record.file_size as i64,
                format.as_str(),
                status.as_str(),
                record.generated_at.to_rfc3339(),
                record.created_at.to_rfc3339(),
                record.updated_at.to_rfc3339(),
            ],
        );

        match result {
            Ok(_) => {
                debug!(execution_id = %record.execution_id, "Report record inserted");
                Ok(())
            }
            Err(rusqlite::Error::SqliteFailure(err, _)) if err.code == ErrorCode::ConstraintViolation => {
                Err(ReportError::Conflict(record.execution_id.clone()))
            }
            Err(e) => Err(ReportError::Storage(format!("Failed to create report: {}", e))),
        }
    }

    fn find_by_execution_id(&self, execution_id: &str) -> Result<Option<ReportRecord>, ReportError> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(&format!("{} WHERE execution_id = ?1", SELECT_COLUMNS))
            .map_err(|e| ReportError::Storage(format!("Query failed: {}", e)))?;

        let row = stmt.query_row(rusqlite::params![execution_id], ReportRow::from_row)
            .optional()
            .map_err(|e| ReportError::Storage(format!("Query error: {}", e)))?;

        row.map(ReportRow::into_record).transpose()
    }

    fn lookup_artifact_path(&self, key: &str) -> Result<PathBuf, ReportError> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(
            "SELECT artifact_path FROM reports WHERE execution_id = ?1 OR file_name = ?1 ORDER BY execution_id = ?1 DESC LIMIT 1"
        ).map_err(|e| ReportError::Storage(format!("Query failed: {}", e)))?;

        match stmt.query_row(rusqlite::params![key], |row: &rusqlite::Row| row.get::<_, String>(0)) {
            Ok(path) => Ok(PathBuf::from(path)),
            Err(rusqlite::Error::QueryReturnedNoRows) => {
                Err(ReportError::NotFound(format!("No report for '{}'", key)))
            }
            Err(e) => Err(ReportError::Storage(format!("Query error: {}", e))),
        }
    }

    fn list_reports(&self, limit: usize, offset: usize) -> Result<Vec<ReportRecord>, ReportError> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(&format!(
            "{} ORDER BY created_at DESC, rowid DESC LIMIT ?1 OFFSET ?2",
            SELECT_COLUMNS
        )).map_err(|e| ReportError::Storage(format!("Query failed: {}", e)))?;

        let rows = stmt.query_map(rusqlite::params![limit as i64, offset as i64], ReportRow::from_row)
            .map_err(|e| ReportError::Storage(format!("Query error: {}", e)))?;

        let mut records = Vec::new();
        for row in rows {
            let row = row.map_err(|e| ReportError::Storage(format!("Row error: {}", e)))?;
            records.push(row.into_record()?);
        }
        Ok(records)
    }
}
