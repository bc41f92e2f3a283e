use std::path::PathBuf;

use clap::{Args, Subcommand};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Run the HTTP service.
    Serve(ServeArgs),
    /// Print the insight lines of a CSV file as JSON.
    Insights(InsightsArgs),
    /// Build a full PDF report from a CSV file.
    Report(ReportArgs),
    /// Print JSON Schemas of the HTTP response bodies.
    Schema,
}

#[derive(Clone, Debug, Args)]
pub struct ServeArgs {
    /// Address to listen on (overrides `server.bind`).
    #[arg(long)]
    pub bind: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct InsightsArgs {
    /// CSV file with a header row.
    pub csv: PathBuf,
}

#[derive(Clone, Debug, Args)]
pub struct ReportArgs {
    /// CSV file with a header row.
    pub csv: PathBuf,

    /// PDF file name inside `reports/` (defaults to `report.default_filename`).
    #[arg(short, long)]
    pub output: Option<String>,

    /// Report title (defaults to `report.offline_title`).
    #[arg(short, long)]
    pub title: Option<String>,

    /// Skip the language-model summary even when one is configured.
    #[arg(long)]
    pub no_summary: bool,
}
