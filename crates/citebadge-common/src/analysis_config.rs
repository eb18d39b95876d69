//! Analysis run configuration.
//!
//! One `citebadge.toml` describes any number of analysis runs (for example
//! two citation snapshots harvested a year apart, both joined against the
//! same badge file) plus the output options shared by all of them.
//!
//! ```toml
//! [output]
//! dir = "out"
//! plot_badge = "replicable"
//!
//! [[analysis]]
//! label = "2022-citations-nov2023"
//! citations_path = "dataset/data-nov-2023/sc2022_citations.csv"
//! reproducibility_path = "dataset/sc2022_reproducibility.csv"
//! ```

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::badge::Badge;
use crate::error::{CitebadgeError, Result};

/// Complete configuration for one invocation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunConfig {
    /// Output options
    #[serde(default)]
    pub output: OutputConfig,

    /// Analysis runs, executed in order
    #[serde(default)]
    pub analysis: Vec<AnalysisConfig>,
}

// ── Analysis ──────────────────────────────────────────────────────────────────

/// Inputs of a single analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Year or snapshot identifier (e.g., "2022-citations-oct2024")
    pub label: String,

    /// CSV with columns [identifier, citations]
    pub citations_path: PathBuf,

    /// CSV with columns [identifier, Available, Functional, Replicable]
    pub reproducibility_path: PathBuf,
}

impl AnalysisConfig {
    pub fn new(
        label: impl Into<String>,
        citations_path: impl Into<PathBuf>,
        reproducibility_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            label: label.into(),
            citations_path: citations_path.into(),
            reproducibility_path: reproducibility_path.into(),
        }
    }

    /// Label reduced to characters that are safe in a file name.
    pub fn file_stem(&self) -> String {
        sanitise_label(&self.label)
    }
}

/// Replace every character outside `[A-Za-z0-9._-]` with `_`.
pub fn sanitise_label(label: &str) -> String {
    label
        .trim()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') { c } else { '_' })
        .collect()
}

// ── Output ────────────────────────────────────────────────────────────────────

/// Where and what to emit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory receiving plot and JSON files
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,

    /// Badge whose 0/1 split is drawn in the box plot
    #[serde(default = "default_plot_badge")]
    pub plot_badge: Badge,

    /// Badges correlated against citation counts
    #[serde(default = "default_correlation_badges")]
    pub correlation_badges: Vec<Badge>,

    /// Also write `report_<label>.json`
    #[serde(default)]
    pub json_report: bool,
}

fn default_output_dir() -> PathBuf { PathBuf::from(".") }
fn default_plot_badge() -> Badge { Badge::Replicable }
fn default_correlation_badges() -> Vec<Badge> { Badge::ALL.to_vec() }

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
            plot_badge: default_plot_badge(),
            correlation_badges: default_correlation_badges(),
            json_report: false,
        }
    }
}

// ── Loading ───────────────────────────────────────────────────────────────────

impl RunConfig {
    /// Parse a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Read and parse a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| CitebadgeError::io(path, e))?;
        Self::from_toml_str(&content)
    }

    /// Reject configurations that cannot produce a report.
    pub fn validate(&self) -> Result<()> {
        if self.analysis.is_empty() {
            return Err(CitebadgeError::Config(
                "no [[analysis]] entries configured".to_string(),
            ));
        }

        let mut stems = HashSet::new();
        for a in &self.analysis {
            if a.label.trim().is_empty() {
                return Err(CitebadgeError::Config("analysis label must not be empty".to_string()));
            }
            // Plot and report file names derive from the label.
            if !stems.insert(a.file_stem()) {
                return Err(CitebadgeError::Config(format!(
                    "duplicate analysis label '{}'",
                    a.label
                )));
            }
        }
        Ok(())
    }
}
