use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use crate::models::ArtifactFormat;

pub const DEFAULT_DOWNLOAD_PREFIX: &str = "/api/reports/download";

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct ReportConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

impl ReportConfig {
    /// Config rooted in a single directory, as used by tests and one-off CLI runs.
    pub fn with_reports_dir(reports_dir: impl Into<PathBuf>) -> Self {
        Self {
            storage: StorageConfig {
                reports_dir: reports_dir.into(),
                ..Default::default()
            },
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory rendered artifacts are written to. Not assumed to survive restarts.
    pub reports_dir: PathBuf,
    /// SQLite database path, or `:memory:`.
    pub database: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            reports_dir: std::env::temp_dir().join("soc-report").join("reports"),
            database: "./data/soc-report.db".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: ArtifactFormat,
    /// Prefix joined with the artifact file name to build `artifactUrl`.
    pub download_prefix: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: ArtifactFormat::Pdf,
            download_prefix: DEFAULT_DOWNLOAD_PREFIX.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}
