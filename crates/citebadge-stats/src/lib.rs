//! citebadge-stats — Badge group partitioning and the hypothesis test suite.
//!
//! The suite runs four tests over one joined table:
//!   1. two-sample Kolmogorov–Smirnov test for every pair of the four groups
//!   2. Kruskal–Wallis test of each badge group against "No Badge"
//!   3. point-biserial correlation of each badge flag with citations
//!   4. Spearman rank correlation of each badge flag with citations
//!
//! Both correlations report r, its p-value and a verdict.
//!
//! Degenerate inputs never abort the suite; they yield
//! [`TestOutcome::Insufficient`] for that one comparison.

pub mod outcome;
pub mod rank;
pub mod partition;
pub mod ks;
pub mod kruskal;
pub mod correlation;
pub mod suite;

pub use outcome::{TestOutcome, ALPHA};
pub use partition::{partition, Groups};
pub use suite::{run_suite, AnalysisResults, CorrelationMethod, CorrelationResult, GroupComparison, GroupSize, PairComparison};
