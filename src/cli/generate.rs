use tokio::io::AsyncReadExt;
use crate::cli::commands::GenerateArgs;
use crate::config::ReportConfig;
use crate::errors::ReportError;
use crate::pipeline::{GenerateRequest, ReportService};

pub async fn handle_generate(args: GenerateArgs, mut config: ReportConfig) -> Result<(), ReportError> {
    args.storage.apply(&mut config)?;

    let raw = read_findings_source(&args.findings).await?;
    let findings: serde_json::Value = serde_json::from_str(&raw)
        .map_err(|e| ReportError::Validation(format!("{} is not valid JSON: {}", args.findings, e)))?;

    let service = ReportService::from_config(&config).await?;
    let record = service
        .generate(GenerateRequest {
            execution_id: Some(args.execution_id),
            findings: Some(findings),
        })
        .await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&record)?);
    } else {
        println!("Report generated for {}", record.execution_id);
        println!("  Findings: {}", record.summary.total);
        println!("  File:     {} ({} bytes)", record.artifact_path, record.file_size);
        println!("  URL:      {}", record.artifact_url);
    }
    Ok(())
}

async fn read_findings_source(source: &str) -> Result<String, ReportError> {
    if source == "-" {
        let mut buf = String::new();
        tokio::io::stdin().read_to_string(&mut buf).await?;
        return Ok(buf);
    }
    tokio::fs::read_to_string(source).await.map_err(|e| {
        ReportError::Validation(format!("Cannot read findings file {}: {}", source, e))
    })
}
