pub mod orchestrator;
pub mod state;

pub use orchestrator::{GenerateRequest, ReportService};
pub use state::{GenerationStage, GenerationTracker};
