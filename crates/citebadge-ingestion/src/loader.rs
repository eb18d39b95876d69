//! CSV loading and the identifier join.
//!
//! The header row of each file is discarded by position. Columns are
//! never looked up by name, so renamed headers in older dataset snapshots
//! load the same way.

use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::path::Path;

use citebadge_common::{CitebadgeError, Result};
use tracing::{debug, info, instrument, warn};

use crate::models::{CitationRecord, JoinSummary, JoinedRecord, JoinedTable, ReproducibilityRecord};

/// Load both files and inner-join them on identifier.
#[instrument(skip_all, fields(
    citations = %citations_path.display(),
    reproducibility = %reproducibility_path.display(),
))]
pub fn load(citations_path: &Path, reproducibility_path: &Path) -> Result<JoinedTable> {
    let citations = read_citations(citations_path)?;
    let repro = read_reproducibility(reproducibility_path)?;
    let table = join(&citations, &repro);

    info!(
        joined_rows = table.len(),
        unmatched_citation_rows = table.summary.unmatched_citation_rows,
        unmatched_reproducibility_rows = table.summary.unmatched_reproducibility_rows,
        "Joined citation and reproducibility tables"
    );
    Ok(table)
}

/// Read the citations file: [identifier, citations].
pub fn read_citations(path: &Path) -> Result<Vec<CitationRecord>> {
    let rows = read_numeric_rows(path, 1)?;
    let missing = rows.iter().filter(|(_, v)| v[0].is_none()).count();
    info!(path = %path.display(), rows = rows.len(), missing_citations = missing, "Loaded citations");

    Ok(rows
        .into_iter()
        .map(|(id, v)| CitationRecord { id, citations: v[0] })
        .collect())
}

/// Read the reproducibility file: [identifier, Available, Functional, Replicable].
pub fn read_reproducibility(path: &Path) -> Result<Vec<ReproducibilityRecord>> {
    let rows = read_numeric_rows(path, 3)?;
    let missing = |col: usize| rows.iter().filter(|(_, v)| v[col].is_none()).count();
    info!(
        path = %path.display(),
        rows = rows.len(),
        missing_available = missing(0),
        missing_functional = missing(1),
        missing_replicable = missing(2),
        "Loaded reproducibility badges"
    );

    Ok(rows
        .into_iter()
        .map(|(id, v)| ReproducibilityRecord {
            id,
            available: v[0],
            functional: v[1],
            replicable: v[2],
        })
        .collect())
}

/// Inner join on identifier.
///
/// Output follows citations-file order, then reproducibility-file order
/// within an identifier. Duplicate identifiers are not collapsed: k
/// citation rows matching m badge rows produce k × m joined rows.
pub fn join(citations: &[CitationRecord], repro: &[ReproducibilityRecord]) -> JoinedTable {
    let mut by_id: HashMap<&str, Vec<&ReproducibilityRecord>> = HashMap::new();
    for r in repro {
        by_id.entry(r.id.as_str()).or_default().push(r);
    }

    let mut rows = Vec::new();
    let mut unmatched_citation_rows = 0;
    for c in citations {
        match by_id.get(c.id.as_str()) {
            Some(matches) => rows.extend(matches.iter().map(|r| JoinedRecord::new(c, r))),
            None => unmatched_citation_rows += 1,
        }
    }

    let citation_ids: HashSet<&str> = citations.iter().map(|c| c.id.as_str()).collect();
    let unmatched_reproducibility_rows = repro
        .iter()
        .filter(|r| !citation_ids.contains(r.id.as_str()))
        .count();

    let summary = JoinSummary {
        citation_rows: citations.len(),
        reproducibility_rows: repro.len(),
        unmatched_citation_rows,
        unmatched_reproducibility_rows,
        duplicate_citation_ids: count_duplicates(citations.iter().map(|c| c.id.as_str())),
        duplicate_reproducibility_ids: count_duplicates(repro.iter().map(|r| r.id.as_str())),
    };

    if summary.duplicate_citation_ids > 0 || summary.duplicate_reproducibility_ids > 0 {
        warn!(
            duplicate_citation_ids = summary.duplicate_citation_ids,
            duplicate_reproducibility_ids = summary.duplicate_reproducibility_ids,
            "Duplicate identifiers multiply joined rows"
        );
    }

    JoinedTable { rows, summary }
}

/// Permissive numeric coercion: blank, unparsable or non-finite → missing.
pub fn coerce_numeric(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

// ── CSV Parsing ─────────────────────────────────────────────────────────────

/// Read `(identifier, [n_values numeric cells])` rows after the header.
///
/// Short rows yield missing trailing values; extra columns are ignored.
fn read_numeric_rows(path: &Path, n_values: usize) -> Result<Vec<(String, Vec<Option<f64>>)>> {
    let file = File::open(path).map_err(|e| CitebadgeError::io(path, e))?;
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(file);

    let header_len = reader.headers().map_err(|e| CitebadgeError::csv(path, e))?.len();
    if header_len == 0 {
        return Err(CitebadgeError::EmptyInput { path: path.to_path_buf() });
    }

    let mut rows = Vec::new();
    let mut skipped_blank_ids = 0usize;
    for result in reader.records() {
        let record = result.map_err(|e| CitebadgeError::csv(path, e))?;

        let id = record.get(0).unwrap_or("");
        if id.trim().is_empty() {
            skipped_blank_ids += 1;
            continue;
        }

        let values = (1..=n_values)
            .map(|i| record.get(i).and_then(coerce_numeric))
            .collect();
        rows.push((id.to_string(), values));
    }

    if skipped_blank_ids > 0 {
        debug!(path = %path.display(), skipped_blank_ids, "Skipped rows without identifier");
    }
    Ok(rows)
}

fn count_duplicates<'a>(ids: impl Iterator<Item = &'a str>) -> usize {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for id in ids {
        *counts.entry(id).or_default() += 1;
    }
    counts.values().filter(|&&n| n > 1).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cite(id: &str, n: Option<f64>) -> CitationRecord {
        CitationRecord { id: id.to_string(), citations: n }
    }

    fn repro(id: &str, a: f64, f: f64, r: f64) -> ReproducibilityRecord {
        ReproducibilityRecord {
            id: id.to_string(),
            available: Some(a),
            functional: Some(f),
            replicable: Some(r),
        }
    }

    #[test]
    fn test_coerce_numeric() {
        assert_eq!(coerce_numeric("12"), Some(12.0));
        assert_eq!(coerce_numeric(" 3.0 "), Some(3.0));
        assert_eq!(coerce_numeric("N/A"), None);
        assert_eq!(coerce_numeric(""), None);
        assert_eq!(coerce_numeric("nan"), None);
        assert_eq!(coerce_numeric("inf"), None);
    }

    #[test]
    fn test_join_drops_one_sided_ids() {
        let c = vec![cite("a", Some(1.0)), cite("b", Some(2.0))];
        let r = vec![repro("b", 1.0, 0.0, 0.0), repro("z", 1.0, 1.0, 1.0)];
        let table = join(&c, &r);

        assert_eq!(table.len(), 1);
        assert_eq!(table.rows[0].id, "b");
        assert_eq!(table.summary.unmatched_citation_rows, 1);
        assert_eq!(table.summary.unmatched_reproducibility_rows, 1);
    }

    #[test]
    fn test_join_multiplies_duplicates() {
        let c = vec![cite("a", Some(1.0)), cite("a", Some(5.0))];
        let r = vec![repro("a", 1.0, 0.0, 0.0), repro("a", 0.0, 0.0, 0.0)];
        let table = join(&c, &r);

        assert_eq!(table.len(), 4);
        assert_eq!(table.summary.duplicate_citation_ids, 1);
        assert_eq!(table.summary.duplicate_reproducibility_ids, 1);
        // Citation order first, badge order within.
        assert_eq!(table.rows[0].citations, Some(1.0));
        assert_eq!(table.rows[0].available, Some(1.0));
        assert_eq!(table.rows[1].available, Some(0.0));
        assert_eq!(table.rows[2].citations, Some(5.0));
    }

    #[test]
    fn test_join_is_exact_on_identifier() {
        let c = vec![cite("https://doi.org/10.1/X", Some(1.0))];
        let r = vec![repro("https://doi.org/10.1/x", 1.0, 1.0, 1.0)];
        assert!(join(&c, &r).is_empty());
    }
}
