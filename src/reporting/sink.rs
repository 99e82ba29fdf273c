use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tokio::fs::File;
use tokio::io::{AsyncWriteExt, BufWriter};
use crate::errors::ReportError;
use tracing::{debug, warn};

/// A write target that only becomes visible at its destination once fully flushed.
///
/// Bytes go to a hidden sibling file. `commit` flushes and fsyncs it, then links it onto the
/// destination without replacing anything already there, so readers never observe a partially
/// written artifact and a finished artifact is never swapped out underneath its record.
pub struct StagedFile {
    writer: BufWriter<File>,
    staging_path: PathBuf,
    destination: PathBuf,
    written: u64,
}

impl StagedFile {
    pub async fn create(destination: &Path) -> Result<Self, ReportError> {
        let file_name = destination
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| ReportError::Render(format!("Invalid destination: {}", destination.display())))?;
        let staging_path = parent_dir(destination).join(format!(".{}.{}.partial", file_name, uuid::Uuid::new_v4()));

        let file = File::create(&staging_path).await.map_err(|e| {
            ReportError::Render(format!("Failed to create {}: {}", staging_path.display(), e))
        })?;

        Ok(Self {
            writer: BufWriter::new(file),
            staging_path,
            destination: destination.to_path_buf(),
            written: 0,
        })
    }

    pub async fn write(&mut self, bytes: &[u8]) -> Result<(), ReportError> {
        if let Err(e) = self.writer.write_all(bytes).await {
            return Err(self.abort(e).await);
        }
        self.written += bytes.len() as u64;
        Ok(())
    }

    /// Flush to disk and publish at the destination. Returns the number of bytes written.
    ///
    /// Fails with `Conflict` when the destination already exists; the existing file is left
    /// untouched.
    pub async fn commit(mut self) -> Result<u64, ReportError> {
        if let Err(e) = self.writer.flush().await {
            return Err(self.abort(e).await);
        }
        if let Err(e) = self.writer.get_ref().sync_all().await {
            return Err(self.abort(e).await);
        }

        match tokio::fs::hard_link(&self.staging_path, &self.destination).await {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                self.discard_staging().await;
                return Err(ReportError::Conflict(self.destination.display().to_string()));
            }
            Err(e) => return Err(self.abort(e).await),
        }
        self.discard_staging().await;

        sync_dir(parent_dir(&self.destination)).await.map_err(|e| {
            ReportError::Render(format!("Failed to sync {}: {}", self.destination.display(), e))
        })?;

        debug!(path = %self.destination.display(), bytes = self.written, "Artifact committed");
        Ok(self.written)
    }

    async fn discard_staging(&self) {
        if let Err(e) = tokio::fs::remove_file(&self.staging_path).await {
            warn!(path = %self.staging_path.display(), error = %e, "Failed to remove staging file");
        }
    }

    async fn abort(&mut self, cause: std::io::Error) -> ReportError {
        self.discard_staging().await;
        ReportError::Render(format!("Failed to write {}: {}", self.destination.display(), cause))
    }
}

fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

/// Persist directory entries so a published artifact survives a crash.
#[cfg(unix)]
async fn sync_dir(dir: &Path) -> std::io::Result<()> {
    File::open(dir).await?.sync_all().await
}

#[cfg(not(unix))]
async fn sync_dir(_dir: &Path) -> std::io::Result<()> {
    Ok(())
}
