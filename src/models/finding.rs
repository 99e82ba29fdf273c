use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use crate::errors::ReportError;

pub const UNTITLED_FINDING: &str = "Untitled Finding";
pub const NOT_AVAILABLE: &str = "N/A";

/// Severity level for a security finding, ordered from most to least severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Critical,
    High,
    #[default]
    Medium,
    Low,
}

impl Severity {
    /// Returns a numeric rank where lower values indicate higher severity.
    pub fn rank(&self) -> u8 {
        match self {
            Severity::Critical => 0,
            Severity::High => 1,
            Severity::Medium => 2,
            Severity::Low => 3,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "CRITICAL",
            Severity::High => "HIGH",
            Severity::Medium => "MEDIUM",
            Severity::Low => "LOW",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "CRITICAL" => Ok(Severity::Critical),
            "HIGH" => Ok(Severity::High),
            "MEDIUM" => Ok(Severity::Medium),
            "LOW" => Ok(Severity::Low),
            other => Err(format!("unknown severity '{}'", other)),
        }
    }
}

impl<'de> Deserialize<'de> for Severity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Absent, null and empty severities all fall back to MEDIUM.
fn severity_or_default<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Severity, D::Error> {
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(Severity::default()),
        Some(s) => s.parse().map_err(serde::de::Error::custom),
    }
}

/// A single security observation submitted for a report run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "severity_or_default")]
    pub severity: Severity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommendation: Option<String>,
}

impl Finding {
    pub fn new(title: &str, severity: Severity) -> Self {
        Self {
            title: Some(title.to_string()),
            severity,
            ..Default::default()
        }
    }

    /// Parse one element of a submitted findings array. `index` is 0-based.
    pub fn from_value(index: usize, value: &Value) -> Result<Self, ReportError> {
        if !value.is_object() {
            return Err(ReportError::Validation(format!(
                "finding #{} must be an object",
                index + 1
            )));
        }
        Finding::deserialize(value).map_err(|e| {
            ReportError::Validation(format!("finding #{} is invalid: {}", index + 1, e))
        })
    }

    pub fn display_title(&self) -> &str {
        non_blank(self.title.as_deref()).unwrap_or(UNTITLED_FINDING)
    }

    pub fn display_description(&self) -> &str {
        non_blank(self.description.as_deref()).unwrap_or(NOT_AVAILABLE)
    }

    pub fn display_recommendation(&self) -> &str {
        non_blank(self.recommendation.as_deref()).unwrap_or(NOT_AVAILABLE)
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.trim().is_empty())
}
