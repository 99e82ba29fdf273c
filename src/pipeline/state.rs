use std::fmt;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use crate::errors::ReportError;
use tracing::{debug, info, warn};

/// Stages of a single generate call. The last three are terminal failures.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GenerationStage {
    Received,
    Validating,
    Rendering,
    Persisting,
    Completed,
    ValidationFailed,
    RenderFailed,
    PersistFailed,
}

impl GenerationStage {
    pub fn can_advance_to(self, next: GenerationStage) -> bool {
        use GenerationStage::*;
        matches!(
            (self, next),
            (Received, Validating)
                | (Validating, Rendering)
                | (Rendering, Persisting)
                | (Persisting, Completed)
        )
    }

    /// The terminal failure reachable from this stage, if any.
    pub fn failure(self) -> Option<GenerationStage> {
        use GenerationStage::*;
        match self {
            Received | Validating => Some(ValidationFailed),
            Rendering => Some(RenderFailed),
            Persisting => Some(PersistFailed),
            Completed | ValidationFailed | RenderFailed | PersistFailed => None,
        }
    }

    pub fn is_terminal(self) -> bool {
        use GenerationStage::*;
        matches!(self, Completed | ValidationFailed | RenderFailed | PersistFailed)
    }

    pub fn as_str(&self) -> &'static str {
        use GenerationStage::*;
        match self {
            Received => "received",
            Validating => "validating",
            Rendering => "rendering",
            Persisting => "persisting",
            Completed => "completed",
            ValidationFailed => "validation_failed",
            RenderFailed => "render_failed",
            PersistFailed => "persist_failed",
        }
    }
}

impl fmt::Display for GenerationStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tracks one generation through its stages and logs every transition.
#[derive(Debug)]
pub struct GenerationTracker {
    execution_id: String,
    stage: GenerationStage,
    started: Instant,
}

impl GenerationTracker {
    pub fn new(execution_id: &str) -> Self {
        debug!(execution_id = %execution_id, "Report request received");
        Self {
            execution_id: execution_id.to_string(),
            stage: GenerationStage::Received,
            started: Instant::now(),
        }
    }

    pub fn stage(&self) -> GenerationStage {
        self.stage
    }

    pub fn advance(&mut self, next: GenerationStage) -> Result<(), ReportError> {
        if !self.stage.can_advance_to(next) {
            return Err(ReportError::Internal(format!(
                "illegal transition {} -> {} for '{}'",
                self.stage, next, self.execution_id
            )));
        }
        debug!(execution_id = %self.execution_id, from = %self.stage, to = %next, "Generation stage");
        self.stage = next;
        if next == GenerationStage::Completed {
            info!(
                execution_id = %self.execution_id,
                elapsed_ms = self.started.elapsed().as_millis() as u64,
                "Report generation completed"
            );
        }
        Ok(())
    }

    /// Move to the terminal failure for the current stage and hand the error back.
    ///
    /// A duplicate execution id is a persistence outcome wherever it is detected, so
    /// `Conflict` always ends in `PersistFailed`.
    pub fn fail(&mut self, error: ReportError) -> ReportError {
        let classification = error.classify();
        let terminal = match &error {
            ReportError::Conflict(_) if !self.stage.is_terminal() => Some(GenerationStage::PersistFailed),
            _ => self.stage.failure(),
        };
        if let Some(terminal) = terminal {
            self.stage = terminal;
        }
        warn!(
            execution_id = %self.execution_id,
            stage = %self.stage,
            error_type = classification.error_type,
            retryable = classification.retryable,
            error = %error,
            "Report generation failed"
        );
        error
    }
}
