//! Data models for the loaded tables.
//!
//! Every numeric cell is `Option<f64>`: `None` is the explicit missing
//! marker produced when a cell is blank or does not parse as a number.

use citebadge_common::Badge;
use serde::{Deserialize, Serialize};

/// One row of the citations file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CitationRecord {
    /// DOI URL, or the paper title when the harvester found no DOI
    pub id: String,
    pub citations: Option<f64>,
}

/// One row of the reproducibility file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReproducibilityRecord {
    pub id: String,
    pub available: Option<f64>,
    pub functional: Option<f64>,
    pub replicable: Option<f64>,
}

/// A paper present in both files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JoinedRecord {
    pub id: String,
    pub citations: Option<f64>,
    pub available: Option<f64>,
    pub functional: Option<f64>,
    pub replicable: Option<f64>,
}

impl JoinedRecord {
    pub fn new(citation: &CitationRecord, repro: &ReproducibilityRecord) -> Self {
        Self {
            id: citation.id.clone(),
            citations: citation.citations,
            available: repro.available,
            functional: repro.functional,
            replicable: repro.replicable,
        }
    }

    /// Flag value of one badge column.
    pub fn badge(&self, badge: Badge) -> Option<f64> {
        match badge {
            Badge::Available  => self.available,
            Badge::Functional => self.functional,
            Badge::Replicable => self.replicable,
        }
    }
}

/// Bookkeeping collected while joining; logged, never used for results.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JoinSummary {
    pub citation_rows: usize,
    pub reproducibility_rows: usize,
    /// Citation rows whose identifier has no reproducibility row
    pub unmatched_citation_rows: usize,
    /// Reproducibility rows whose identifier has no citation row
    pub unmatched_reproducibility_rows: usize,
    /// Identifiers occurring more than once in the citations file
    pub duplicate_citation_ids: usize,
    /// Identifiers occurring more than once in the reproducibility file
    pub duplicate_reproducibility_ids: usize,
}

/// Inner join of the two inputs, in citations-file order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JoinedTable {
    pub rows: Vec<JoinedRecord>,
    pub summary: JoinSummary,
}

impl JoinedTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// (flag, citations) pairs for one badge, in row order.
    /// Rows keep their position even when either value is missing.
    pub fn badge_pairs(&self, badge: Badge) -> Vec<(Option<f64>, Option<f64>)> {
        self.rows.iter().map(|r| (r.badge(badge), r.citations)).collect()
    }
}
