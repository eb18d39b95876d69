//! One analysis run: load → partition → test → emit.

use std::io::Write;

use citebadge_common::{AnalysisConfig, OutputConfig, Result};
use citebadge_report::{emit, EmittedFiles};
use citebadge_stats::{partition, run_suite, AnalysisResults};
use tracing::instrument;

/// Output of a completed run.
#[derive(Debug)]
pub struct RunOutcome {
    pub results: AnalysisResults,
    pub files: EmittedFiles,
}

/// Execute a single analysis. Input errors surface before anything is
/// written, so a failed run never leaves a partial report behind.
#[instrument(skip_all, fields(label = %analysis.label))]
pub fn run_analysis(
    analysis: &AnalysisConfig,
    output: &OutputConfig,
    out: &mut impl Write,
) -> Result<RunOutcome> {
    let table = citebadge_ingestion::load(&analysis.citations_path, &analysis.reproducibility_path)?;

    let groups = partition(&table);

    let results = run_suite(&analysis.label, &table, &groups, &output.correlation_badges);
    let files = emit(&results, &table, output, out)?;
    Ok(RunOutcome { results, files })
}
