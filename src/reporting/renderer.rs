use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};
use crate::errors::ReportError;
use crate::models::{ArtifactFormat, Finding};
use super::formatter::{report_lines, wrap_line};
use super::sink::StagedFile;
use tracing::info;

const PAGE_WIDTH: i64 = 595;
const PAGE_HEIGHT: i64 = 842;
const MARGIN: i64 = 50;
const FONT_SIZE: i64 = 10;
const LEADING: i64 = 14;
const LINES_PER_PAGE: usize = ((PAGE_HEIGHT - 2 * MARGIN) / LEADING) as usize;
/// Courier glyphs are 0.6em wide.
const CHARS_PER_LINE: usize = ((PAGE_WIDTH - 2 * MARGIN) * 10 / (FONT_SIZE * 6)) as usize;
const WRITE_CHUNK: usize = 64 * 1024;

/// Turns an ordered finding list into a document at a storage location.
#[async_trait]
pub trait DocumentRenderer: Send + Sync {
    fn format(&self) -> ArtifactFormat;

    /// Resolves only after the document is fully flushed to `destination`.
    /// Returns the number of bytes written, or `Conflict` if `destination` already exists.
    async fn render(
        &self,
        title: &str,
        findings: &[Finding],
        destination: &Path,
    ) -> Result<u64, ReportError>;
}

pub fn create_renderer(format: ArtifactFormat) -> Arc<dyn DocumentRenderer> {
    match format {
        ArtifactFormat::Pdf => Arc::new(PdfRenderer),
        ArtifactFormat::Text => Arc::new(TextRenderer),
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PdfRenderer;

#[async_trait]
impl DocumentRenderer for PdfRenderer {
    fn format(&self) -> ArtifactFormat {
        ArtifactFormat::Pdf
    }

    async fn render(
        &self,
        title: &str,
        findings: &[Finding],
        destination: &Path,
    ) -> Result<u64, ReportError> {
        let lines = report_lines(title, findings);
        let bytes = tokio::task::spawn_blocking(move || build_pdf(&lines))
            .await
            .map_err(|e| ReportError::Render(format!("PDF task failed: {}", e)))??;

        let mut staged = StagedFile::create(destination).await?;
        for chunk in bytes.chunks(WRITE_CHUNK) {
            staged.write(chunk).await?;
        }
        let written = staged.commit().await?;
        info!(path = %destination.display(), bytes = written, findings = findings.len(), "PDF report rendered");
        Ok(written)
    }
}

fn build_pdf(lines: &[String]) -> Result<Vec<u8>, ReportError> {
    let wrapped: Vec<String> = lines
        .iter()
        .flat_map(|line| wrap_line(line, CHARS_PER_LINE))
        .collect();

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let mut kids: Vec<Object> = Vec::new();
    for page_lines in wrapped.chunks(LINES_PER_PAGE) {
        let mut operations = vec![
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec!["F1".into(), FONT_SIZE.into()]),
            Operation::new("TL", vec![LEADING.into()]),
            Operation::new("Td", vec![MARGIN.into(), (PAGE_HEIGHT - MARGIN).into()]),
        ];
        for line in page_lines {
            operations.push(Operation::new("Tj", vec![Object::string_literal(line.as_str())]));
            operations.push(Operation::new("T*", vec![]));
        }
        operations.push(Operation::new("ET", vec![]));

        let content = Content { operations }
            .encode()
            .map_err(|e| ReportError::Render(format!("Failed to encode page: {}", e)))?;
        let content_id = doc.add_object(Stream::new(dictionary! {}, content));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let page_count = kids.len() as i64;
    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => page_count,
        "Resources" => resources_id,
        "MediaBox" => vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Integer(PAGE_WIDTH),
            Object::Integer(PAGE_HEIGHT),
        ],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer)
        .map_err(|e| ReportError::Render(format!("Failed to serialize PDF: {}", e)))?;
    Ok(buffer)
}

/// Plain-text rendition, streamed line by line.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextRenderer;

#[async_trait]
impl DocumentRenderer for TextRenderer {
    fn format(&self) -> ArtifactFormat {
        ArtifactFormat::Text
    }

    async fn render(
        &self,
        title: &str,
        findings: &[Finding],
        destination: &Path,
    ) -> Result<u64, ReportError> {
        let mut staged = StagedFile::create(destination).await?;
        for line in report_lines(title, findings) {
            staged.write(line.as_bytes()).await?;
            staged.write(b"\n").await?;
        }
        let written = staged.commit().await?;
        info!(path = %destination.display(), bytes = written, findings = findings.len(), "Text report rendered");
        Ok(written)
    }
}
