//! Result type shared by every hypothesis test.

use serde::Serialize;

/// Significance level for every verdict.
pub const ALPHA: f64 = 0.05;

/// Outcome of one test: either a statistic with its p-value, or the
/// reason the comparison could not be computed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TestOutcome {
    Computed { statistic: f64, p_value: f64 },
    Insufficient { reason: String },
}

impl TestOutcome {
    pub fn insufficient(reason: impl Into<String>) -> Self {
        TestOutcome::Insufficient { reason: reason.into() }
    }

    pub fn statistic(&self) -> Option<f64> {
        match self {
            TestOutcome::Computed { statistic, .. } => Some(*statistic),
            TestOutcome::Insufficient { .. } => None,
        }
    }

    pub fn p_value(&self) -> Option<f64> {
        match self {
            TestOutcome::Computed { p_value, .. } => Some(*p_value),
            TestOutcome::Insufficient { .. } => None,
        }
    }

    /// `p < ALPHA`. Insufficient or NaN results are never significant.
    pub fn significant(&self) -> bool {
        self.p_value().is_some_and(|p| p < ALPHA)
    }

    pub fn is_computed(&self) -> bool {
        matches!(self, TestOutcome::Computed { .. })
    }
}
