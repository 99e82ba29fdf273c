use std::path::Path;
use std::sync::{Arc, LazyLock};

use chrono::Utc;
use dashmap::DashSet;
use regex::Regex;
use serde::Deserialize;
use serde_json::Value;
use crate::config::ReportConfig;
use crate::db::{Database, ReportStore};
use crate::errors::ReportError;
use crate::models::{ArtifactFormat, Finding, ReportRecord, ReportStatus, ReportSummary};
use crate::reporting::formatter::report_title;
use crate::reporting::{create_renderer, ArtifactStore, ArtifactStream, DocumentRenderer};
use super::state::{GenerationStage, GenerationTracker};
use tracing::{info, warn};

/// Execution ids become part of the artifact file name.
static EXECUTION_ID_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9][A-Za-z0-9._-]{0,127}$").unwrap()
});

/// Ids that collide with static segments under `/api/reports`.
const RESERVED_EXECUTION_IDS: &[&str] = &["generate", "download"];

/// Payload of a generate call. Fields stay loosely typed so that shape errors surface as
/// validation failures instead of deserialization errors.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    #[serde(default)]
    pub execution_id: Option<String>,
    #[serde(default)]
    pub findings: Option<Value>,
}

impl GenerateRequest {
    pub fn new(execution_id: &str, findings: Value) -> Self {
        Self {
            execution_id: Some(execution_id.to_string()),
            findings: Some(findings),
        }
    }
}

struct ValidatedRequest {
    execution_id: String,
    raw_findings: Vec<Value>,
    findings: Vec<Finding>,
}

fn validate(request: &GenerateRequest) -> Result<ValidatedRequest, ReportError> {
    let execution_id = match request.execution_id.as_deref() {
        Some(id) if !id.trim().is_empty() => id,
        _ => return Err(ReportError::Validation("executionId is required".into())),
    };
    if !EXECUTION_ID_PATTERN.is_match(execution_id) {
        return Err(ReportError::Validation(format!(
            "executionId '{}' may only contain letters, digits, '.', '_' and '-' (max 128 characters)",
            execution_id
        )));
    }
    if RESERVED_EXECUTION_IDS.contains(&execution_id) {
        return Err(ReportError::Validation(format!("executionId '{}' is reserved", execution_id)));
    }

    let raw_findings = match &request.findings {
        Some(Value::Array(items)) => items.clone(),
        Some(_) => return Err(ReportError::Validation("findings must be an array".into())),
        None => return Err(ReportError::Validation("findings is required".into())),
    };
    if raw_findings.is_empty() {
        return Err(ReportError::Validation("findings must not be empty".into()));
    }

    let findings = raw_findings
        .iter()
        .enumerate()
        .map(|(i, value)| Finding::from_value(i, value))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ValidatedRequest {
        execution_id: execution_id.to_string(),
        raw_findings,
        findings,
    })
}

/// Marks an execution id as being generated until dropped.
struct InFlightClaim<'a> {
    in_flight: &'a DashSet<String>,
    execution_id: String,
}

impl<'a> InFlightClaim<'a> {
    fn acquire(in_flight: &'a DashSet<String>, execution_id: &str) -> Option<Self> {
        in_flight.insert(execution_id.to_string()).then(|| Self {
            in_flight,
            execution_id: execution_id.to_string(),
        })
    }
}

impl Drop for InFlightClaim<'_> {
    fn drop(&mut self) {
        self.in_flight.remove(&self.execution_id);
    }
}

/// Orchestrates rendering and persistence of reports.
///
/// A record is only written once the renderer has confirmed the artifact is flushed, so
/// every record handed back to a caller points at a retrievable file.
pub struct ReportService {
    store: Arc<dyn ReportStore>,
    renderer: Arc<dyn DocumentRenderer>,
    artifacts: ArtifactStore,
    in_flight: DashSet<String>,
}

impl ReportService {
    pub async fn from_config(config: &ReportConfig) -> Result<Self, ReportError> {
        let db = Database::new(&config.storage.database)?;
        Self::new(Arc::new(db), create_renderer(config.output.format), config).await
    }

    pub async fn new(
        store: Arc<dyn ReportStore>,
        renderer: Arc<dyn DocumentRenderer>,
        config: &ReportConfig,
    ) -> Result<Self, ReportError> {
        let artifacts = ArtifactStore::new(
            &config.storage.reports_dir,
            renderer.format(),
            &config.output.download_prefix,
        );
        artifacts.ensure_root().await?;
        info!(
            reports_dir = %artifacts.root().display(),
            format = %artifacts.format(),
            "Report service ready"
        );
        Ok(Self { store, renderer, artifacts, in_flight: DashSet::new() })
    }

    pub fn format(&self) -> ArtifactFormat {
        self.artifacts.format()
    }

    pub fn artifacts(&self) -> &ArtifactStore {
        &self.artifacts
    }

    pub async fn generate(&self, request: GenerateRequest) -> Result<ReportRecord, ReportError> {
        let mut tracker = GenerationTracker::new(request.execution_id.as_deref().unwrap_or_default());
        tracker.advance(GenerationStage::Validating)?;

        let ValidatedRequest { execution_id, raw_findings, findings } = match validate(&request) {
            Ok(v) => v,
            Err(e) => return Err(tracker.fail(e)),
        };

        // Same-id calls in this process render one at a time. The no-replace publish and the
        // store's unique index settle anything that gets past this.
        let _claim = match InFlightClaim::acquire(&self.in_flight, &execution_id) {
            Some(claim) => claim,
            None => return Err(tracker.fail(ReportError::Conflict(execution_id))),
        };

        // A sequential repeat must not touch the first run's artifact
        match self.store.find_by_execution_id(&execution_id) {
            Ok(Some(_)) => return Err(tracker.fail(ReportError::Conflict(execution_id))),
            Ok(None) => {}
            Err(e) => return Err(tracker.fail(e)),
        }

        tracker.advance(GenerationStage::Rendering)?;
        let file_name = self.artifacts.file_name_for(&execution_id);
        let destination = self.artifacts.path_for(&execution_id);
        let file_size = match self.render(&execution_id, &findings, &destination).await {
            Ok(size) => size,
            Err(e) => return Err(tracker.fail(e)),
        };

        tracker.advance(GenerationStage::Persisting)?;
        let now = Utc::now();
        let record = ReportRecord {
            id: uuid::Uuid::new_v4().to_string(),
            summary: ReportSummary::from_findings(&findings),
            input_findings: raw_findings,
            artifact_path: destination.display().to_string(),
            artifact_url: self.artifacts.url_for(&file_name),
            file_name,
            file_size,
            format: self.renderer.format(),
            status: ReportStatus::Completed,
            generated_at: now,
            created_at: now,
            updated_at: now,
            execution_id,
        };

        if let Err(e) = self.store.create_unique(&record) {
            if matches!(e, ReportError::Conflict(_)) {
                warn!(
                    execution_id = %record.execution_id,
                    path = %record.artifact_path,
                    "Artifact left without a record after losing the execution id race"
                );
            }
            return Err(tracker.fail(e));
        }

        tracker.advance(GenerationStage::Completed)?;
        Ok(record)
    }

    async fn render(
        &self,
        execution_id: &str,
        findings: &[Finding],
        destination: &Path,
    ) -> Result<u64, ReportError> {
        // The root may live in ephemeral storage that was cleared since startup
        self.artifacts
            .ensure_root()
            .await
            .map_err(|e| ReportError::Render(e.to_string()))?;

        // With the claim held and no record stored, a file already here is a leftover from a
        // failed attempt.
        match tokio::fs::remove_file(destination).await {
            Ok(()) => warn!(path = %destination.display(), "Replacing artifact left without a record"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                return Err(ReportError::Render(format!("Failed to clear {}: {}", destination.display(), e)));
            }
        }

        self.renderer
            .render(&report_title(execution_id), findings, destination)
            .await
            .map_err(|e| match e {
                ReportError::Render(_) => e,
                ReportError::Conflict(_) => ReportError::Conflict(execution_id.to_string()),
                other => ReportError::Render(other.to_string()),
            })
    }

    pub fn get_report(&self, execution_id: &str) -> Result<ReportRecord, ReportError> {
        self.store
            .find_by_execution_id(execution_id)?
            .ok_or_else(|| ReportError::NotFound(format!("No report for execution '{}'", execution_id)))
    }

    pub fn list_reports(&self, limit: usize, offset: usize) -> Result<Vec<ReportRecord>, ReportError> {
        self.store.list_reports(limit, offset)
    }

    pub async fn fetch_artifact(&self, file_name: &str) -> Result<ArtifactStream, ReportError> {
        self.artifacts.open(file_name).await
    }

    pub async fn fetch_artifact_for_execution(&self, execution_id: &str) -> Result<ArtifactStream, ReportError> {
        let path = self.store.lookup_artifact_path(execution_id)?;
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| ReportError::NotFound(format!("No report file for execution '{}'", execution_id)))?;
        self.artifacts.open(file_name).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporting::TextRenderer;
    use async_trait::async_trait;
    use serde_json::json;
    use std::path::PathBuf;
    use std::sync::Mutex;
    use tempfile::TempDir;
    use tokio::io::AsyncReadExt;
    use tokio::sync::oneshot;

    fn config(dir: &TempDir) -> ReportConfig {
        ReportConfig::with_reports_dir(dir.path().join("reports"))
    }

    async fn text_service(dir: &TempDir) -> (ReportService, Database) {
        let db = Database::in_memory().unwrap();
        let service = ReportService::new(Arc::new(db.clone()), Arc::new(TextRenderer), &config(dir))
            .await
            .unwrap();
        (service, db)
    }

    fn reports_dir_entries(dir: &TempDir) -> usize {
        std::fs::read_dir(dir.path().join("reports")).unwrap().count()
    }

    struct FailingRenderer;

    #[async_trait]
    impl DocumentRenderer for FailingRenderer {
        fn format(&self) -> ArtifactFormat {
            ArtifactFormat::Text
        }

        async fn render(&self, _: &str, _: &[Finding], _: &Path) -> Result<u64, ReportError> {
            Err(ReportError::Render("No space left on device".into()))
        }
    }

    /// Blocks inside `render` until released, so tests can observe the mid-render state.
    struct GatedRenderer {
        started: tokio::sync::Mutex<Option<oneshot::Sender<()>>>,
        release: tokio::sync::Mutex<Option<oneshot::Receiver<()>>>,
    }

    #[async_trait]
    impl DocumentRenderer for GatedRenderer {
        fn format(&self) -> ArtifactFormat {
            ArtifactFormat::Text
        }

        async fn render(&self, title: &str, findings: &[Finding], destination: &Path) -> Result<u64, ReportError> {
            let started = self.started.lock().await.take();
            if let Some(tx) = started {
                let _ = tx.send(());
            }
            let release = self.release.lock().await.take();
            if let Some(rx) = release {
                let _ = rx.await;
            }
            TextRenderer.render(title, findings, destination).await
        }
    }

    /// Records what the artifact looked like at the moment the record was inserted.
    struct ObservingStore {
        inner: Database,
        observed: Mutex<Vec<(PathBuf, Option<u64>)>>,
    }

    impl ReportStore for ObservingStore {
        fn create_unique(&self, record: &ReportRecord) -> Result<(), ReportError> {
            let path = PathBuf::from(&record.artifact_path);
            let len = std::fs::metadata(&path).ok().map(|m| m.len());
            self.observed.lock().unwrap().push((path, len));
            self.inner.create_unique(record)
        }
        fn find_by_execution_id(&self, id: &str) -> Result<Option<ReportRecord>, ReportError> {
            self.inner.find_by_execution_id(id)
        }
        fn lookup_artifact_path(&self, key: &str) -> Result<PathBuf, ReportError> {
            self.inner.lookup_artifact_path(key)
        }
        fn list_reports(&self, limit: usize, offset: usize) -> Result<Vec<ReportRecord>, ReportError> {
            self.inner.list_reports(limit, offset)
        }
    }

    struct UnavailableStore;

    impl ReportStore for UnavailableStore {
        fn create_unique(&self, _: &ReportRecord) -> Result<(), ReportError> {
            Err(ReportError::Storage("database is locked".into()))
        }
        fn find_by_execution_id(&self, _: &str) -> Result<Option<ReportRecord>, ReportError> {
            Ok(None)
        }
        fn lookup_artifact_path(&self, key: &str) -> Result<PathBuf, ReportError> {
            Err(ReportError::NotFound(key.to_string()))
        }
        fn list_reports(&self, _: usize, _: usize) -> Result<Vec<ReportRecord>, ReportError> {
            Ok(Vec::new())
        }
    }

    #[tokio::test]
    async fn test_generate_returns_completed_record() {
        let dir = TempDir::new().unwrap();
        let (service, db) = text_service(&dir).await;

        let record = service
            .generate(GenerateRequest::new("run-1", json!([
                {"title": "Open Port", "severity": "HIGH"},
                {"title": "Weak TLS", "severity": "LOW", "description": "TLS 1.0 enabled"},
            ])))
            .await
            .unwrap();

        assert_eq!(record.status, ReportStatus::Completed);
        assert_eq!(record.summary.total, 2);
        assert_eq!(record.summary.total, record.input_findings.len());
        assert!(record.artifact_url.ends_with("report-run-1.txt"));
        assert_eq!(record.file_name, "report-run-1.txt");

        let content = std::fs::read_to_string(&record.artifact_path).unwrap();
        assert_eq!(content.len() as u64, record.file_size);
        assert!(content.find("1. Open Port").unwrap() < content.find("2. Weak TLS").unwrap());

        let stored = db.find_by_execution_id("run-1").unwrap().unwrap();
        assert_eq!(stored, record);
    }

    #[tokio::test]
    async fn test_record_created_only_after_artifact_flushed() {
        let dir = TempDir::new().unwrap();
        let store = Arc::new(ObservingStore {
            inner: Database::in_memory().unwrap(),
            observed: Mutex::new(Vec::new()),
        });
        let service = ReportService::new(store.clone(), Arc::new(TextRenderer), &config(&dir))
            .await
            .unwrap();

        let record = service
            .generate(GenerateRequest::new("run-flush", json!([{"title": "A"}, {"title": "B"}])))
            .await
            .unwrap();

        let observed = store.observed.lock().unwrap();
        assert_eq!(observed.len(), 1);
        assert_eq!(observed[0].0, PathBuf::from(&record.artifact_path));
        assert_eq!(observed[0].1, Some(record.file_size));
    }

    #[tokio::test]
    async fn test_record_not_visible_while_rendering() {
        let dir = TempDir::new().unwrap();
        let db = Database::in_memory().unwrap();
        let (started_tx, started_rx) = oneshot::channel();
        let (release_tx, release_rx) = oneshot::channel();
        let renderer = GatedRenderer {
            started: tokio::sync::Mutex::new(Some(started_tx)),
            release: tokio::sync::Mutex::new(Some(release_rx)),
        };
        let service = Arc::new(
            ReportService::new(Arc::new(db.clone()), Arc::new(renderer), &config(&dir))
                .await
                .unwrap(),
        );

        let task = tokio::spawn({
            let service = service.clone();
            async move {
                service
                    .generate(GenerateRequest::new("run-gated", json!([{"title": "Slow"}])))
                    .await
            }
        });

        started_rx.await.unwrap();
        assert!(db.find_by_execution_id("run-gated").unwrap().is_none());
        assert!(!dir.path().join("reports").join("report-run-gated.txt").exists());

        release_tx.send(()).unwrap();
        let record = task.await.unwrap().unwrap();
        assert!(Path::new(&record.artifact_path).exists());
        assert!(db.find_by_execution_id("run-gated").unwrap().is_some());
    }

    #[tokio::test]
    async fn test_invalid_requests_write_nothing() {
        let dir = TempDir::new().unwrap();
        let (service, db) = text_service(&dir).await;

        let cases = vec![
            GenerateRequest::new("run-empty", json!([])),
            GenerateRequest { execution_id: Some("run-none".into()), findings: None },
            GenerateRequest::new("run-object", json!({"title": "not a list"})),
            GenerateRequest { execution_id: None, findings: Some(json!([{"title": "x"}])) },
            GenerateRequest::new("   ", json!([{"title": "x"}])),
            GenerateRequest::new("../escape", json!([{"title": "x"}])),
            GenerateRequest::new("run-bad-severity", json!([{"title": "x", "severity": "SEVERE"}])),
            GenerateRequest::new("run-bad-item", json!(["just a string"])),
            GenerateRequest::new("generate", json!([{"title": "x"}])),
            GenerateRequest::new("download", json!([{"title": "x"}])),
        ];

        for request in cases {
            let err = service.generate(request.clone()).await.unwrap_err();
            assert!(
                matches!(err, ReportError::Validation(_)),
                "expected validation error for {:?}, got {:?}",
                request,
                err
            );
        }

        assert_eq!(reports_dir_entries(&dir), 0);
        assert!(db.list_reports(100, 0).unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_summary_total_matches_input_length() {
        let dir = TempDir::new().unwrap();
        let (service, _db) = text_service(&dir).await;

        for n in [1usize, 7] {
            let findings: Vec<Value> = (0..n).map(|i| json!({"title": format!("F{}", i)})).collect();
            let record = service
                .generate(GenerateRequest::new(&format!("run-n{}", n), Value::Array(findings)))
                .await
                .unwrap();
            assert_eq!(record.summary.total, n);
            assert_eq!(record.input_findings.len(), n);
        }
    }

    #[tokio::test]
    async fn test_sequential_duplicate_is_conflict() {
        let dir = TempDir::new().unwrap();
        let (service, db) = text_service(&dir).await;

        let first = service
            .generate(GenerateRequest::new("run-dup", json!([{"title": "Original"}])))
            .await
            .unwrap();
        let original_content = std::fs::read_to_string(&first.artifact_path).unwrap();

        let err = service
            .generate(GenerateRequest::new("run-dup", json!([{"title": "Replacement"}, {"title": "Extra"}])))
            .await
            .unwrap_err();
        assert!(matches!(err, ReportError::Conflict(_)));

        let stored = db.find_by_execution_id("run-dup").unwrap().unwrap();
        assert_eq!(stored, first);
        assert_eq!(std::fs::read_to_string(&first.artifact_path).unwrap(), original_content);
    }

    #[tokio::test]
    async fn test_concurrent_duplicate_has_exactly_one_winner() {
        let dir = TempDir::new().unwrap();
        let (service, db) = text_service(&dir).await;

        let (a, b) = tokio::join!(
            service.generate(GenerateRequest::new("run-race", json!([{"title": "A"}]))),
            service.generate(GenerateRequest::new("run-race", json!([{"title": "B"}]))),
        );

        let outcomes = [a, b];
        let wins = outcomes.iter().filter(|r| r.is_ok()).count();
        let conflicts = outcomes.iter().filter(|r| matches!(r, Err(ReportError::Conflict(_)))).count();
        assert_eq!(wins, 1);
        assert_eq!(conflicts, 1);
        assert_eq!(db.list_reports(10, 0).unwrap().len(), 1);

        let winner = outcomes.into_iter().find_map(Result::ok).unwrap();
        let (own, other) = if winner.input_findings[0]["title"] == "A" { ("1. A", "1. B") } else { ("1. B", "1. A") };
        let content = std::fs::read_to_string(&winner.artifact_path).unwrap();
        assert!(content.contains(own));
        assert!(!content.contains(other));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_racing_generates_keep_artifact_matching_record() {
        let dir = TempDir::new().unwrap();
        let (service, db) = text_service(&dir).await;
        let service = Arc::new(service);

        for round in 0..20 {
            let id = format!("run-race-{}", round);
            let first = tokio::spawn({
                let service = service.clone();
                let id = id.clone();
                async move { service.generate(GenerateRequest::new(&id, json!([{"title": "AAAA"}]))).await }
            });
            let second = tokio::spawn({
                let service = service.clone();
                let id = id.clone();
                async move {
                    service
                        .generate(GenerateRequest::new(&id, json!([{"title": "BBBB"}, {"title": "CCCC"}])))
                        .await
                }
            });
            let outcomes = [first.await.unwrap(), second.await.unwrap()];
            assert_eq!(outcomes.iter().filter(|r| r.is_ok()).count(), 1, "round {}", round);

            let stored = db.find_by_execution_id(&id).unwrap().unwrap();
            let expected_title = stored.input_findings[0]["title"].as_str().unwrap().to_string();
            let content = std::fs::read_to_string(&stored.artifact_path).unwrap();
            assert!(content.contains(&format!("1. {}", expected_title)), "round {}", round);
            assert_eq!(content.len() as u64, stored.file_size, "round {}", round);
        }
    }

    #[tokio::test]
    async fn test_leftover_artifact_without_record_is_replaced() {
        let dir = TempDir::new().unwrap();
        let (service, _db) = text_service(&dir).await;
        let leftover = dir.path().join("reports").join("report-run-leftover.txt");
        std::fs::write(&leftover, "stale bytes").unwrap();

        let record = service
            .generate(GenerateRequest::new("run-leftover", json!([{"title": "Fresh"}])))
            .await
            .unwrap();
        let content = std::fs::read_to_string(&record.artifact_path).unwrap();
        assert!(content.contains("1. Fresh"));
        assert!(!content.contains("stale bytes"));
    }

    #[tokio::test]
    async fn test_in_flight_claim_released_after_failure() {
        let dir = TempDir::new().unwrap();
        let db = Database::in_memory().unwrap();
        let failing = ReportService::new(Arc::new(db.clone()), Arc::new(FailingRenderer), &config(&dir))
            .await
            .unwrap();
        let err = failing
            .generate(GenerateRequest::new("run-retry", json!([{"title": "x"}])))
            .await
            .unwrap_err();
        assert!(matches!(err, ReportError::Render(_)));
        assert!(failing.in_flight.is_empty());
    }

    #[tokio::test]
    async fn test_render_failure_skips_store() {
        let dir = TempDir::new().unwrap();
        let db = Database::in_memory().unwrap();
        let service = ReportService::new(Arc::new(db.clone()), Arc::new(FailingRenderer), &config(&dir))
            .await
            .unwrap();

        let err = service
            .generate(GenerateRequest::new("run-fail", json!([{"title": "x"}])))
            .await
            .unwrap_err();
        assert!(matches!(err, ReportError::Render(_)));
        assert!(err.is_retryable());
        assert!(db.find_by_execution_id("run-fail").unwrap().is_none());
    }

    #[tokio::test]
    async fn test_storage_failure_orphans_artifact() {
        let dir = TempDir::new().unwrap();
        let service = ReportService::new(Arc::new(UnavailableStore), Arc::new(TextRenderer), &config(&dir))
            .await
            .unwrap();

        let err = service
            .generate(GenerateRequest::new("run-orphan", json!([{"title": "x"}])))
            .await
            .unwrap_err();
        assert!(matches!(err, ReportError::Storage(_)));
        assert!(dir.path().join("reports").join("report-run-orphan.txt").exists());
    }

    #[tokio::test]
    async fn test_reports_dir_recreated_when_cleared() {
        let dir = TempDir::new().unwrap();
        let (service, _db) = text_service(&dir).await;
        std::fs::remove_dir_all(dir.path().join("reports")).unwrap();

        let record = service
            .generate(GenerateRequest::new("run-cleared", json!([{"title": "x"}])))
            .await
            .unwrap();
        assert!(Path::new(&record.artifact_path).exists());
    }

    #[tokio::test]
    async fn test_fetch_artifact_returns_rendered_bytes() {
        let dir = TempDir::new().unwrap();
        let (service, _db) = text_service(&dir).await;
        let record = service
            .generate(GenerateRequest::new("run-fetch", json!([{"title": "Open Port"}])))
            .await
            .unwrap();
        let on_disk = std::fs::read(&record.artifact_path).unwrap();

        let mut by_name = service.fetch_artifact(&record.file_name).await.unwrap();
        let mut bytes = Vec::new();
        by_name.file.read_to_end(&mut bytes).await.unwrap();
        assert_eq!(bytes, on_disk);
        assert_eq!(by_name.content_type, "text/plain; charset=utf-8");

        let by_id = service.fetch_artifact_for_execution("run-fetch").await.unwrap();
        assert_eq!(by_id.size, on_disk.len() as u64);
    }

    #[tokio::test]
    async fn test_unknown_lookups_are_not_found() {
        let dir = TempDir::new().unwrap();
        let (service, _db) = text_service(&dir).await;

        assert!(matches!(service.get_report("ghost"), Err(ReportError::NotFound(_))));
        assert!(matches!(service.fetch_artifact("report-ghost.txt").await, Err(ReportError::NotFound(_))));
        assert!(matches!(service.fetch_artifact_for_execution("ghost").await, Err(ReportError::NotFound(_))));
    }
}
