//! Command-line arguments and run configuration resolution.
//! Reads citebadge.toml from the current directory, the path in the
//! CITEBADGE_CONFIG env var, or `--config`.

use std::path::{Path, PathBuf};

use citebadge_common::{AnalysisConfig, Badge, CitebadgeError, Result, RunConfig};
use clap::Parser;

pub const DEFAULT_CONFIG_FILE: &str = "citebadge.toml";

/// Correlate paper citation counts with artifact-reproducibility badges.
#[derive(Debug, Clone, Parser)]
#[command(name = "citebadge", version, about)]
pub struct Cli {
    /// TOML file with [output] and [[analysis]] sections
    #[arg(long, env = "CITEBADGE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Citations CSV for a single ad-hoc run (requires --reproducibility and --label)
    #[arg(long, requires_all = ["reproducibility", "label"])]
    pub citations: Option<PathBuf>,

    /// Reproducibility badge CSV for a single ad-hoc run
    #[arg(long, requires_all = ["citations", "label"])]
    pub reproducibility: Option<PathBuf>,

    /// Year or snapshot label of the ad-hoc run; names the plot file
    #[arg(long, requires_all = ["citations", "reproducibility"])]
    pub label: Option<String>,

    /// Directory for plot and JSON files
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Badge whose split is drawn in the box plot
    #[arg(long)]
    pub plot_badge: Option<Badge>,

    /// Also write report_<label>.json
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    /// Build the run configuration: config file (if any) first, then
    /// command-line overrides. Ad-hoc flags replace the file's analyses.
    pub fn resolve(&self) -> Result<RunConfig> {
        let mut config = match (&self.config, self.adhoc_analysis()) {
            (Some(path), _) => RunConfig::load(path)?,
            (None, Some(_)) => {
                let default = Path::new(DEFAULT_CONFIG_FILE);
                if default.exists() { RunConfig::load(default)? } else { RunConfig::default() }
            }
            (None, None) => {
                let default = Path::new(DEFAULT_CONFIG_FILE);
                if !default.exists() {
                    return Err(CitebadgeError::Config(format!(
                        "Config file not found: {DEFAULT_CONFIG_FILE}\n\
                         Copy citebadge.example.toml to {DEFAULT_CONFIG_FILE} or pass \
                         --citations, --reproducibility and --label."
                    )));
                }
                RunConfig::load(default)?
            }
        };

        if let Some(analysis) = self.adhoc_analysis() {
            config.analysis = vec![analysis];
        }
        if let Some(dir) = &self.output_dir {
            config.output.dir = dir.clone();
        }
        if let Some(badge) = self.plot_badge {
            config.output.plot_badge = badge;
        }
        if self.json {
            config.output.json_report = true;
        }

        config.validate()?;
        Ok(config)
    }

    fn adhoc_analysis(&self) -> Option<AnalysisConfig> {
        match (&self.citations, &self.reproducibility, &self.label) {
            (Some(c), Some(r), Some(l)) => Some(AnalysisConfig::new(l.clone(), c.clone(), r.clone())),
            _ => None,
        }
    }
}
