//! citebadge-cli — Configuration plumbing and the per-run pipeline
//! (load → partition → test → emit) behind the `citebadge` binary.

pub mod config;
pub mod pipeline;
