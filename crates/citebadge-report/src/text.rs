//! Plain-text report, one block per test.

use std::io::{self, Write};

use citebadge_stats::{AnalysisResults, TestOutcome};

const KS_REJECT: &str = "Reject the null hypothesis. The distributions are different.";
const KS_ACCEPT: &str = "Fail to reject the null hypothesis. The distributions are similar.";
const KW_REJECT: &str =
    "Reject the null hypothesis. There are statistically significant differences among the groups.";
const KW_ACCEPT: &str =
    "Fail to reject the null hypothesis. There are no statistically significant differences among the groups.";
const CORR_REJECT: &str =
    "Reject the null hypothesis. There is evidence of a statistically significant correlation.";
const CORR_ACCEPT: &str =
    "Fail to reject the null hypothesis. There is no statistically significant evidence of a correlation.";

pub fn write_report(w: &mut impl Write, results: &AnalysisResults) -> io::Result<()> {
    writeln!(w, "Analyzing data for the year {}...", results.label)?;
    writeln!(w)?;

    for c in &results.ks {
        writeln!(w, "KS Test between {} and {}:", c.first, c.second)?;
        write_outcome(w, &c.outcome, KS_REJECT, KS_ACCEPT)?;
    }

    for c in &results.kruskal {
        writeln!(w, "Kruskal-Wallis Test: {} and {}", c.group, c.reference)?;
        write_outcome(w, &c.outcome, KW_REJECT, KW_ACCEPT)?;
    }

    for c in &results.correlations {
        writeln!(
            w,
            "{} correlation: {} and Citations (n = {})",
            c.method.name(),
            c.badge,
            c.observations
        )?;
        write_outcome(w, &c.outcome, CORR_REJECT, CORR_ACCEPT)?;
    }
    Ok(())
}

/// Render the report into a `String`.
pub fn render_report(results: &AnalysisResults) -> String {
    let mut buf = Vec::new();
    // Writing into a Vec cannot fail.
    let _ = write_report(&mut buf, results);
    String::from_utf8_lossy(&buf).into_owned()
}

fn write_outcome(w: &mut impl Write, outcome: &TestOutcome, reject: &str, accept: &str) -> io::Result<()> {
    match outcome {
        TestOutcome::Computed { statistic, p_value } => {
            writeln!(w, "Test Statistic: {statistic:?}")?;
            writeln!(w, "P-value: {p_value:?}")?;
            writeln!(w, "{}", if outcome.significant() { reject } else { accept })?;
        }
        TestOutcome::Insufficient { reason } => {
            writeln!(w, "Test Statistic: n/a")?;
            writeln!(w, "P-value: n/a")?;
            writeln!(w, "Insufficient data: {reason}.")?;
        }
    }
    writeln!(w)
}
