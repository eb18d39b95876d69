//! Loader behaviour against on-disk CSV fixtures.

use std::collections::BTreeSet;
use std::io::Write;
use std::path::PathBuf;

use citebadge_common::CitebadgeError;
use citebadge_ingestion::{load, JoinedTable};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    let mut f = std::fs::File::create(&path).unwrap();
    f.write_all(content.as_bytes()).unwrap();
    path
}

fn ids(table: &JoinedTable) -> BTreeSet<String> {
    table.rows.iter().map(|r| r.id.clone()).collect()
}

#[test]
fn test_non_numeric_citation_becomes_missing() {
    let dir = TempDir::new().unwrap();
    let c = write(&dir, "c.csv", "DOI,Citations\nid1,10\nid2,N/A\n");
    let r = write(&dir, "r.csv", "DOI,Available,Functional,Replicable\nid1,1,0,0\nid2,1,1,0\n");

    let table = load(&c, &r).unwrap();
    assert_eq!(table.len(), 2);
    assert_eq!(table.rows[0].citations, Some(10.0));
    assert_eq!(table.rows[1].citations, None);
    assert_eq!(table.rows[1].functional, Some(1.0));
}

#[test]
fn test_reproducibility_only_id_is_excluded() {
    let dir = TempDir::new().unwrap();
    let c = write(&dir, "c.csv", "DOI,Citations\nid1,10\n");
    let r = write(&dir, "r.csv", "DOI,Available,Functional,Replicable\nid1,1,0,0\nghost,1,1,1\n");

    let table = load(&c, &r).unwrap();
    assert_eq!(ids(&table), BTreeSet::from(["id1".to_string()]));
    assert_eq!(table.summary.unmatched_reproducibility_rows, 1);
}

#[test]
fn test_headers_are_positional() {
    let dir = TempDir::new().unwrap();
    // Header names do not matter, only positions.
    let c = write(&dir, "c.csv", "paper,count\nid1,7\n");
    let r = write(&dir, "r.csv", "x,y,z,w\nid1,0,,1\n");

    let table = load(&c, &r).unwrap();
    let row = &table.rows[0];
    assert_eq!(row.citations, Some(7.0));
    assert_eq!(row.available, Some(0.0));
    assert_eq!(row.functional, None);
    assert_eq!(row.replicable, Some(1.0));
}

#[test]
fn test_short_rows_yield_missing_flags() {
    let dir = TempDir::new().unwrap();
    let c = write(&dir, "c.csv", "DOI,Citations\nid1,3\n");
    let r = write(&dir, "r.csv", "DOI,Available,Functional,Replicable\nid1,1\n");

    let table = load(&c, &r).unwrap();
    assert_eq!(table.rows[0].available, Some(1.0));
    assert_eq!(table.rows[0].functional, None);
    assert_eq!(table.rows[0].replicable, None);
}

#[test]
fn test_row_order_does_not_change_joined_set() {
    let dir = TempDir::new().unwrap();
    let c1 = write(&dir, "c1.csv", "DOI,Citations\na,1\nb,2\nc,3\n");
    let c2 = write(&dir, "c2.csv", "DOI,Citations\nc,3\na,1\nb,2\n");
    let r1 = write(&dir, "r1.csv", "DOI,Available,Functional,Replicable\nb,1,0,0\nc,0,0,0\nd,1,1,1\n");
    let r2 = write(&dir, "r2.csv", "DOI,Available,Functional,Replicable\nd,1,1,1\nc,0,0,0\nb,1,0,0\n");

    let a = load(&c1, &r1).unwrap();
    let b = load(&c2, &r2).unwrap();
    assert_eq!(ids(&a), ids(&b));
    assert_eq!(ids(&a), BTreeSet::from(["b".to_string(), "c".to_string()]));
}

#[test]
fn test_quoted_titles_as_identifiers() {
    let dir = TempDir::new().unwrap();
    let c = write(&dir, "c.csv", "DOI,Citations\n\"Scaling, Fast: A Study\",12\n");
    let r = write(&dir, "r.csv", "DOI,Available,Functional,Replicable\n\"Scaling, Fast: A Study\",1,1,0\n");

    let table = load(&c, &r).unwrap();
    assert_eq!(table.len(), 1);
    assert_eq!(table.rows[0].id, "Scaling, Fast: A Study");
}

#[test]
fn test_missing_file_is_fatal_with_path() {
    let dir = TempDir::new().unwrap();
    let r = write(&dir, "r.csv", "DOI,Available,Functional,Replicable\n");
    let missing = dir.path().join("nope.csv");

    let err = load(&missing, &r).unwrap_err();
    match &err {
        CitebadgeError::Io { path, .. } => assert_eq!(path, &missing),
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(err.to_string().contains("nope.csv"));
}

#[test]
fn test_empty_file_is_fatal() {
    let dir = TempDir::new().unwrap();
    let c = write(&dir, "c.csv", "");
    let r = write(&dir, "r.csv", "DOI,Available,Functional,Replicable\n");

    assert!(matches!(load(&c, &r), Err(CitebadgeError::EmptyInput { .. })));
}

#[test]
fn test_header_only_files_join_to_empty_table() {
    let dir = TempDir::new().unwrap();
    let c = write(&dir, "c.csv", "DOI,Citations\n");
    let r = write(&dir, "r.csv", "DOI,Available,Functional,Replicable\n");

    let table = load(&c, &r).unwrap();
    assert!(table.is_empty());
}
