use crate::cli::commands::ShowArgs;
use crate::config::ReportConfig;
use crate::db::{Database, ReportStore};
use crate::errors::ReportError;

pub async fn handle_show(args: ShowArgs, mut config: ReportConfig) -> Result<(), ReportError> {
    args.storage.apply(&mut config)?;

    let db = Database::new(&config.storage.database)?;
    let record = db
        .find_by_execution_id(&args.execution_id)?
        .ok_or_else(|| ReportError::NotFound(format!("No report for execution '{}'", args.execution_id)))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&record)?);
        return Ok(());
    }

    let available = db
        .lookup_artifact_path(&args.execution_id)
        .map(|p| p.exists())
        .unwrap_or(false);

    println!("Execution:  {}", record.execution_id);
    println!("Status:     {}", record.status.as_str());
    println!("Generated:  {}", record.generated_at.to_rfc3339());
    println!(
        "Findings:   {} (critical {}, high {}, medium {}, low {})",
        record.summary.total,
        record.summary.critical,
        record.summary.high,
        record.summary.medium,
        record.summary.low,
    );
    println!("File:       {}{}", record.artifact_path, if available { "" } else { " (missing)" });
    println!("URL:        {}", record.artifact_url);
    Ok(())
}
