use super::types::ReportError;

#[derive(Debug, Clone)]
pub struct ErrorClassification {
    pub error_type: &'static str,
    pub retryable: bool,
}

impl ReportError {
    /// Classify this error to determine its type and whether the caller may retry.
    pub fn classify(&self) -> ErrorClassification {
        match self {
            // Nothing was persisted, so the whole generate call can be repeated.
            ReportError::Render(_) => ErrorClassification {
                error_type: "RenderError",
                retryable: true,
            },
            ReportError::Storage(_) => ErrorClassification {
                error_type: "StorageError",
                retryable: true,
            },
            ReportError::Io(_) => ErrorClassification {
                error_type: "IoError",
                retryable: true,
            },

            // Caller must change the request
            ReportError::Validation(_) => ErrorClassification {
                error_type: "ValidationError",
                retryable: false,
            },
            ReportError::Conflict(_) => ErrorClassification {
                error_type: "ConflictError",
                retryable: false,
            },
            ReportError::NotFound(_) => ErrorClassification {
                error_type: "NotFoundError",
                retryable: false,
            },
            ReportError::Config(_) => ErrorClassification {
                error_type: "ConfigError",
                retryable: false,
            },
            ReportError::Json(_) => ErrorClassification {
                error_type: "JsonError",
                retryable: false,
            },
            ReportError::Yaml(_) => ErrorClassification {
                error_type: "YamlError",
                retryable: false,
            },
            ReportError::Internal(_) => ErrorClassification {
                error_type: "InternalError",
                retryable: false,
            },
        }
    }

    pub fn is_retryable(&self) -> bool {
        self.classify().retryable
    }
}
