use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::info;

use crate::schema::RunReport;

pub const REPORT_PREFIX: &str = "ner-entities";

/// `<dir>/ner-entities-<YYYYmmdd-HHMMSS>.json`
pub fn default_output_path(dir: &Path, now: DateTime<Local>) -> PathBuf {
    dir.join(format!("{}-{}.json", REPORT_PREFIX, now.format("%Y%m%d-%H%M%S")))
}

pub fn render_report(report: &RunReport) -> Result<String> {
    let mut json = serde_json::to_string_pretty(report)
        .context("Failed to serialize report")?;
    json.push('\n');
    Ok(json)
}

/// Write the report as pretty UTF-8 JSON, creating parent directories.
pub async fn write_report(report: &RunReport, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .await
            .with_context(|| format!("Failed to create output directory: {:?}", parent))?;
    }

    let json = render_report(report)?;
    fs::write(path, json)
        .await
        .with_context(|| format!("Failed to write report: {:?}", path))?;

    info!(path = %path.display(), files = report.files.len(), "Report written");
    Ok(())
}
