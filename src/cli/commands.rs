use clap::{Parser, Subcommand, Args};
use crate::config::ReportConfig;
use crate::errors::ReportError;

#[derive(Parser)]
#[command(name = "soc-report", version, about = "Render security findings into downloadable reports")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// YAML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Increase log verbosity (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP API server
    Serve(ServeArgs),
    /// Generate a report from a findings JSON file
    Generate(GenerateArgs),
    /// Show the stored record for an execution
    Show(ShowArgs),
}

/// Storage overrides shared by every subcommand.
#[derive(Args, Clone, Default)]
pub struct StorageArgs {
    /// SQLite database path (`:memory:` for a throwaway store)
    #[arg(long)]
    pub db: Option<String>,

    /// Directory rendered reports are written to
    #[arg(long)]
    pub reports_dir: Option<String>,

    /// Report format: pdf, text
    #[arg(long)]
    pub format: Option<String>,
}

impl StorageArgs {
    pub fn apply(&self, config: &mut ReportConfig) -> Result<(), ReportError> {
        if let Some(db) = &self.db {
            config.storage.database = db.clone();
        }
        if let Some(dir) = &self.reports_dir {
            config.storage.reports_dir = dir.into();
        }
        if let Some(format) = &self.format {
            config.output.format = format.parse().map_err(ReportError::Config)?;
        }
        Ok(())
    }
}

#[derive(Args, Clone)]
pub struct ServeArgs {
    /// Listen port
    #[arg(long)]
    pub port: Option<u16>,

    /// Listen address
    #[arg(long)]
    pub host: Option<String>,

    #[command(flatten)]
    pub storage: StorageArgs,
}

#[derive(Args, Clone)]
pub struct GenerateArgs {
    /// Execution identifier for this run
    #[arg(short, long)]
    pub execution_id: String,

    /// JSON file holding the findings array (`-` reads stdin)
    #[arg(short, long)]
    pub findings: String,

    /// Print the full record as JSON
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub storage: StorageArgs,
}

#[derive(Args, Clone)]
pub struct ShowArgs {
    /// Execution identifier to look up
    pub execution_id: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub storage: StorageArgs,
}
