pub const CREATE_TABLES: &str = "
CREATE TABLE IF NOT EXISTS reports (
    id TEXT PRIMARY KEY,
    execution_id TEXT NOT NULL,
    input_findings TEXT NOT NULL,
    summary TEXT NOT NULL,
    total_findings INTEGER NOT NULL,
    artifact_path TEXT NOT NULL,
    artifact_url TEXT NOT NULL,
    file_name TEXT NOT NULL,
    file_size INTEGER NOT NULL DEFAULT 0,
    format TEXT NOT NULL,
    status TEXT NOT NULL DEFAULT 'PROCESSING',
    generated_at TEXT NOT NULL,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

CREATE UNIQUE INDEX IF NOT EXISTS idx_reports_execution_id ON reports(execution_id);
CREATE INDEX IF NOT EXISTS idx_reports_file_name ON reports(file_name);
CREATE INDEX IF NOT EXISTS idx_reports_status ON reports(status);
";
