use std::path::{Path, PathBuf};

use crate::errors::ReportError;
use super::types::ReportConfig;
use tracing::debug;

const MAX_CONFIG_BYTES: u64 = 1_048_576;

pub async fn parse_config(path: &Path) -> Result<ReportConfig, ReportError> {
    if !path.exists() {
        return Err(ReportError::Config(format!("Config file not found: {}", path.display())));
    }

    let metadata = tokio::fs::metadata(path).await?;
    if metadata.len() > MAX_CONFIG_BYTES {
        return Err(ReportError::Config("Config file exceeds 1MB limit".into()));
    }

    let content = tokio::fs::read_to_string(path).await?;
    let config: ReportConfig = serde_yaml::from_str(&content)?;
    validate_config(&config)?;
    Ok(config)
}

/// Defaults, then the optional YAML file, then `SOC_REPORT_*` environment overrides.
pub async fn load_config(path: Option<&Path>) -> Result<ReportConfig, ReportError> {
    let mut config = match path {
        Some(p) => parse_config(p).await?,
        None => ReportConfig::default(),
    };
    apply_overrides(&mut config, |key| std::env::var(key).ok())?;
    validate_config(&config)?;
    debug!(
        reports_dir = %config.storage.reports_dir.display(),
        database = %config.storage.database,
        format = %config.output.format,
        "Configuration loaded"
    );
    Ok(config)
}

pub(crate) fn apply_overrides<F>(config: &mut ReportConfig, lookup: F) -> Result<(), ReportError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(dir) = lookup("SOC_REPORT_DIR").filter(|v| !v.is_empty()) {
        config.storage.reports_dir = PathBuf::from(dir);
    }
    if let Some(db) = lookup("SOC_REPORT_DB").filter(|v| !v.is_empty()) {
        config.storage.database = db;
    }
    if let Some(format) = lookup("SOC_REPORT_FORMAT").filter(|v| !v.is_empty()) {
        config.output.format = format.parse().map_err(ReportError::Config)?;
    }
    Ok(())
}

fn validate_config(config: &ReportConfig) -> Result<(), ReportError> {
    if config.storage.reports_dir.as_os_str().is_empty() {
        return Err(ReportError::Config("storage.reports_dir must not be empty".into()));
    }
    if config.storage.database.trim().is_empty() {
        return Err(ReportError::Config("storage.database must not be empty".into()));
    }
    let prefix = &config.output.download_prefix;
    if !(prefix.starts_with('/') || prefix.starts_with("http://") || prefix.starts_with("https://")) {
        return Err(ReportError::Config(format!(
            "output.download_prefix must be an absolute path or URL, got '{}'",
            prefix
        )));
    }
    Ok(())
}
