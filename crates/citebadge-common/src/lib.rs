//! citebadge-common — Shared types, errors, and configuration used across all citebadge crates.

pub mod error;
pub mod badge;
pub mod analysis_config;

// Re-export commonly used types
pub use error::{CitebadgeError, Result};
pub use badge::{Badge, GroupName};
pub use analysis_config::{AnalysisConfig, OutputConfig, RunConfig};
