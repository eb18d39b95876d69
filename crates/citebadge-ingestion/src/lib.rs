//! citebadge-ingestion — Loads the citation and reproducibility tables and joins them.
//!
//! Both inputs are headed CSV files read strictly by column position:
//!   - citations:       [identifier, citations]
//!   - reproducibility: [identifier, Available, Functional, Replicable]

pub mod models;
pub mod loader;

pub use loader::{join, load, read_citations, read_reproducibility};
pub use models::{CitationRecord, JoinSummary, JoinedRecord, JoinedTable, ReproducibilityRecord};
