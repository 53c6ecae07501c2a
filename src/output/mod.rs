mod cli;
mod html;
mod json;

pub use cli::print_cli_table;
pub use html::{generate_html_string, print_html};
pub use json::print_json;

use crate::model::InventoryReport;
use anyhow::Result;
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};

/// Output format for inventory reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Standalone HTML page
    Html,
    /// JSON format for programmatic use
    Json,
    /// Human-readable table format
    Table,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Html => "html",
            OutputFormat::Json => "json",
            OutputFormat::Table => "txt",
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "html" => Ok(OutputFormat::Html),
            "json" => Ok(OutputFormat::Json),
            "table" => Ok(OutputFormat::Table),
            _ => Err(format!(
                "Unknown format: {}. Use 'html', 'json', or 'table'",
                s
            )),
        }
    }
}

pub fn print_report(report: &InventoryReport, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Html => print_html(report),
        OutputFormat::Json => print_json(report),
        OutputFormat::Table => print_cli_table(report),
    }
}

/// Format report to string for file output
pub fn format_report_to_string(report: &InventoryReport, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Html => Ok(generate_html_string(report)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
        OutputFormat::Table => Ok(cli::generate_table_string(report)),
    }
}

/// `chrome-extensions-<timestamp>.<ext>` in `dir`.
///
/// The timestamp is the UTC time with milliseconds, every non-digit replaced
/// by `-`: `chrome-extensions-2026-10-16-12-30-05-123.html`.
pub fn default_output_path(dir: &Path, time: DateTime<Utc>, format: OutputFormat) -> PathBuf {
    let timestamp: String = time
        .format("%Y-%m-%dT%H:%M:%S%.3f")
        .to_string()
        .chars()
        .map(|c| if c.is_ascii_digit() { c } else { '-' })
        .collect();

    dir.join(format!("chrome-extensions-{}.{}", timestamp, format.extension()))
}
