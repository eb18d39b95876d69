//! Runs every analysis over one joined table and collects the results.

use citebadge_common::{Badge, GroupName};
use citebadge_ingestion::JoinedTable;
use serde::Serialize;
use tracing::{info, warn};

use crate::correlation::{complete_pairs, point_biserial, spearman};
use crate::kruskal::kruskal;
use crate::ks::ks_2samp;
use crate::outcome::TestOutcome;
use crate::partition::Groups;

/// KS comparison of two named groups.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PairComparison {
    pub first: GroupName,
    pub second: GroupName,
    pub outcome: TestOutcome,
}

/// Kruskal–Wallis comparison of a badge group against the reference group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupComparison {
    pub badge: Badge,
    pub group: GroupName,
    pub reference: GroupName,
    pub outcome: TestOutcome,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CorrelationMethod {
    PointBiserial,
    Spearman,
}

impl CorrelationMethod {
    pub fn name(&self) -> &'static str {
        match self {
            CorrelationMethod::PointBiserial => "Point-biserial",
            CorrelationMethod::Spearman      => "Spearman",
        }
    }
}

/// Correlation of one badge flag with citation counts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationResult {
    pub badge: Badge,
    pub method: CorrelationMethod,
    /// Complete (flag, citations) pairs used
    pub observations: usize,
    /// Rows dropped because either value was missing
    pub dropped: usize,
    pub outcome: TestOutcome,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupSize {
    pub group: GroupName,
    pub label: String,
    pub size: usize,
}

/// Everything one analysis run produces.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResults {
    pub label: String,
    pub joined_rows: usize,
    pub group_sizes: Vec<GroupSize>,
    pub ks: Vec<PairComparison>,
    pub kruskal: Vec<GroupComparison>,
    pub correlations: Vec<CorrelationResult>,
}

impl AnalysisResults {
    /// All outcomes, for summary counts.
    pub fn outcomes(&self) -> impl Iterator<Item = &TestOutcome> {
        self.ks
            .iter()
            .map(|c| &c.outcome)
            .chain(self.kruskal.iter().map(|c| &c.outcome))
            .chain(self.correlations.iter().map(|c| &c.outcome))
    }
}

/// Run the full suite. Each comparison is computed independently; a
/// degenerate comparison yields `Insufficient` and the rest still run.
pub fn run_suite(
    label: &str,
    table: &JoinedTable,
    groups: &Groups,
    correlation_badges: &[Badge],
) -> AnalysisResults {
    let group_sizes = groups
        .iter()
        .map(|(group, values)| GroupSize {
            group,
            label: group.label().to_string(),
            size: values.len(),
        })
        .collect();

    let ks = Groups::pairs()
        .into_iter()
        .map(|(first, second)| {
            let outcome = ks_2samp(groups.get(first), groups.get(second));
            log_insufficient("KS", &outcome);
            PairComparison { first, second, outcome }
        })
        .collect();

    let kruskal = Badge::ALL
        .into_iter()
        .map(|badge| {
            let group = GroupName::for_badge(badge);
            let reference = GroupName::NoBadge;
            let outcome = kruskal(&[groups.get(group), groups.get(reference)]);
            log_insufficient("Kruskal-Wallis", &outcome);
            GroupComparison { badge, group, reference, outcome }
        })
        .collect();

    let mut correlations = Vec::with_capacity(correlation_badges.len() * 2);
    for &badge in correlation_badges {
        let (flags, citations, dropped) = complete_pairs(&table.badge_pairs(badge));
        for method in [CorrelationMethod::PointBiserial, CorrelationMethod::Spearman] {
            let outcome = match method {
                CorrelationMethod::PointBiserial => point_biserial(&flags, &citations),
                CorrelationMethod::Spearman      => spearman(&flags, &citations),
            };
            log_insufficient(method.name(), &outcome);
            correlations.push(CorrelationResult {
                badge,
                method,
                observations: flags.len(),
                dropped,
                outcome,
            });
        }
    }

    let results = AnalysisResults {
        label: label.to_string(),
        joined_rows: table.len(),
        group_sizes,
        ks,
        kruskal,
        correlations,
    };

    let significant = results.outcomes().filter(|o| o.significant()).count();
    let insufficient = results.outcomes().filter(|o| !o.is_computed()).count();
    info!(label, significant, insufficient, "Hypothesis test suite complete");
    results
}

fn log_insufficient(test: &str, outcome: &TestOutcome) {
    if let TestOutcome::Insufficient { reason } = outcome {
        warn!(test, reason = reason.as_str(), "Insufficient data for comparison");
    }
}
