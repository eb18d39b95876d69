//! citebadge-report — Emits the textual report, the optional JSON report,
//! and the citation box plot for one analysis run.

pub mod text;
pub mod json;
pub mod boxplot;

use std::io::Write;
use std::path::PathBuf;

use citebadge_common::{CitebadgeError, OutputConfig, Result};
use citebadge_ingestion::JoinedTable;
use citebadge_stats::AnalysisResults;
use tracing::info;

/// Files written by [`emit`].
#[derive(Debug, Clone, PartialEq)]
pub struct EmittedFiles {
    pub plot: PathBuf,
    pub json: Option<PathBuf>,
}

/// Write the text report to `out`, then the plot (and JSON report when
/// enabled) into `output.dir`. Existing files are overwritten.
pub fn emit(
    results: &AnalysisResults,
    table: &JoinedTable,
    output: &OutputConfig,
    out: &mut impl Write,
) -> Result<EmittedFiles> {
    text::write_report(out, results).map_err(|e| CitebadgeError::io("<stdout>", e))?;

    std::fs::create_dir_all(&output.dir).map_err(|e| CitebadgeError::io(&output.dir, e))?;

    let plot = boxplot::write_boxplot(table, output.plot_badge, &results.label, &output.dir)?;
    info!(path = %plot.display(), "Wrote box plot");

    let json = if output.json_report {
        let path = json::write_json_report(results, &table.summary, &output.dir)?;
        info!(path = %path.display(), "Wrote JSON report");
        Some(path)
    } else {
        None
    };

    Ok(EmittedFiles { plot, json })
}
