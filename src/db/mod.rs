pub mod connection;
pub mod reports;
pub mod schema;

use std::path::PathBuf;

use crate::errors::ReportError;
use crate::models::ReportRecord;

pub use connection::Database;

/// Persistence contract for report records, keyed by execution id.
pub trait ReportStore: Send + Sync {
    /// Insert a record. Fails with `ReportError::Conflict` if the execution id already exists.
    fn create_unique(&self, record: &ReportRecord) -> Result<(), ReportError>;

    fn find_by_execution_id(&self, execution_id: &str) -> Result<Option<ReportRecord>, ReportError>;

    /// Resolve the stored artifact path from an execution id or an artifact file name.
    fn lookup_artifact_path(&self, key: &str) -> Result<PathBuf, ReportError>;

    /// Newest first.
    fn list_reports(&self, limit: usize, offset: usize) -> Result<Vec<ReportRecord>, ReportError>;
}
