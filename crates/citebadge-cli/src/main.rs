//! citebadge — Citation count vs. reproducibility badge analysis.

use anyhow::{bail, Context};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use citebadge_cli::config::Cli;
use citebadge_cli::pipeline::run_analysis;

fn main() -> anyhow::Result<()> {
    // Logs go to stderr; stdout carries the report.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("citebadge=info,warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.resolve().context("Failed to load run configuration")?;
    info!(
        analyses = config.analysis.len(),
        output_dir = %config.output.dir.display(),
        "Configuration loaded"
    );

    let stdout = std::io::stdout();
    let mut failed = 0usize;
    for analysis in &config.analysis {
        match run_analysis(analysis, &config.output, &mut stdout.lock()) {
            Ok(outcome) => info!(
                label = %analysis.label,
                plot = %outcome.files.plot.display(),
                "Analysis complete"
            ),
            Err(e) => {
                failed += 1;
                error!(label = %analysis.label, error = %e, "Analysis failed");
            }
        }
    }

    if failed > 0 {
        bail!("{failed} of {} analysis runs failed", config.analysis.len());
    }
    Ok(())
}
