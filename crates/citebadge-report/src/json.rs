//! Machine-readable report: `report_<label>.json`.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use citebadge_common::analysis_config::sanitise_label;
use citebadge_common::{CitebadgeError, Result};
use citebadge_ingestion::JoinSummary;
use citebadge_stats::AnalysisResults;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    pub generated_at: DateTime<Utc>,
    pub join: &'a JoinSummary,
    pub results: &'a AnalysisResults,
}

pub fn json_report_path(dir: &Path, label: &str) -> PathBuf {
    dir.join(format!("report_{}.json", sanitise_label(label)))
}

pub fn write_json_report(results: &AnalysisResults, join: &JoinSummary, dir: &Path) -> Result<PathBuf> {
    let report = JsonReport { generated_at: Utc::now(), join, results };
    let body = serde_json::to_string_pretty(&report)?;

    let path = json_report_path(dir, &results.label);
    std::fs::write(&path, body).map_err(|e| CitebadgeError::io(&path, e))?;
    Ok(path)
}
