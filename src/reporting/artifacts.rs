use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use tokio::fs::File;
use crate::config::ReportConfig;
use crate::errors::ReportError;
use crate::models::ArtifactFormat;
use tracing::warn;

/// Owns the reports root: naming, URL derivation and safe lookup of rendered files.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    root: PathBuf,
    format: ArtifactFormat,
    download_prefix: String,
}

/// An opened artifact, ready to be streamed back unchanged.
pub struct ArtifactStream {
    pub file: File,
    pub file_name: String,
    pub size: u64,
    pub content_type: &'static str,
}

impl ArtifactStore {
    pub fn new(root: impl Into<PathBuf>, format: ArtifactFormat, download_prefix: &str) -> Self {
        Self {
            root: root.into(),
            format,
            download_prefix: download_prefix.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &ReportConfig) -> Self {
        Self::new(
            &config.storage.reports_dir,
            config.output.format,
            &config.output.download_prefix,
        )
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn format(&self) -> ArtifactFormat {
        self.format
    }

    pub async fn ensure_root(&self) -> Result<(), ReportError> {
        tokio::fs::create_dir_all(&self.root).await?;
        Ok(())
    }

    pub fn file_name_for(&self, execution_id: &str) -> String {
        format!("report-{}.{}", execution_id, self.format.extension())
    }

    pub fn path_for(&self, execution_id: &str) -> PathBuf {
        self.root.join(self.file_name_for(execution_id))
    }

    pub fn url_for(&self, file_name: &str) -> String {
        format!("{}/{}", self.download_prefix, file_name)
    }

    /// Map a requested file name to a path inside the root. Anything that is not a plain
    /// file name, does not exist, or resolves outside the root is `NotFound`.
    pub async fn resolve(&self, file_name: &str) -> Result<PathBuf, ReportError> {
        if !is_plain_file_name(file_name) {
            warn!(file = %file_name, "Rejected artifact name outside reports root");
            return Err(ReportError::NotFound(format!("Report file '{}' not found", file_name)));
        }

        let candidate = self.root.join(file_name);
        let canonical = match tokio::fs::canonicalize(&candidate).await {
            Ok(path) => path,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(ReportError::NotFound(format!("Report file '{}' not found", file_name)));
            }
            Err(e) => return Err(e.into()),
        };
        let root = match tokio::fs::canonicalize(&self.root).await {
            Ok(path) => path,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(ReportError::NotFound(format!("Report file '{}' not found", file_name)));
            }
            Err(e) => return Err(e.into()),
        };

        // Symlinks may still point elsewhere
        if !canonical.starts_with(&root) || !canonical.is_file() {
            warn!(file = %file_name, "Rejected artifact name outside reports root");
            return Err(ReportError::NotFound(format!("Report file '{}' not found", file_name)));
        }
        Ok(canonical)
    }

    pub async fn open(&self, file_name: &str) -> Result<ArtifactStream, ReportError> {
        let path = self.resolve(file_name).await?;
        let file = match File::open(&path).await {
            Ok(f) => f,
            // Removed between resolve and open
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(ReportError::NotFound(format!("Report file '{}' not found", file_name)));
            }
            Err(e) => return Err(e.into()),
        };
        let size = file.metadata().await?.len();
        let content_type = ArtifactFormat::from_file_name(file_name)
            .map(|f| f.content_type())
            .unwrap_or("application/octet-stream");

        Ok(ArtifactStream {
            file,
            file_name: file_name.to_string(),
            size,
            content_type,
        })
    }
}

fn is_plain_file_name(name: &str) -> bool {
    if name.is_empty() || name.contains('\0') || name.contains('\\') || name.starts_with('.') {
        return false;
    }
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(c)), None) if c == name
    )
}
