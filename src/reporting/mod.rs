pub mod artifacts;
pub mod formatter;
pub mod renderer;
pub mod sink;

pub use artifacts::{ArtifactStore, ArtifactStream};
pub use renderer::{create_renderer, DocumentRenderer, PdfRenderer, TextRenderer};
