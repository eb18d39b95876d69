//! Reproducibility badges and the named citation groups derived from them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CitebadgeError;

/// One of the three independent artifact-evaluation badges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Badge {
    /// Artifact exists and is publicly archived.
    Available,
    /// Artifact runs as documented.
    Functional,
    /// Results were reproduced by the evaluators.
    Replicable,
}

impl Badge {
    pub const ALL: [Badge; 3] = [Badge::Available, Badge::Functional, Badge::Replicable];

    /// Column name as it appears in reports ("Available", ...).
    pub fn as_str(&self) -> &'static str {
        match self {
            Badge::Available  => "Available",
            Badge::Functional => "Functional",
            Badge::Replicable => "Replicable",
        }
    }

    /// Lower-case key used in configuration and output file names.
    pub fn key(&self) -> &'static str {
        match self {
            Badge::Available  => "available",
            Badge::Functional => "functional",
            Badge::Replicable => "replicable",
        }
    }
}

impl fmt::Display for Badge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Badge {
    type Err = CitebadgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "available"  => Ok(Badge::Available),
            "functional" => Ok(Badge::Functional),
            "replicable" | "replicated" => Ok(Badge::Replicable),
            other => Err(CitebadgeError::Config(format!(
                "unknown badge '{other}' (expected available, functional or replicable)"
            ))),
        }
    }
}

/// The four named citation groups compared by the test suite.
///
/// `NoBadge` selects `Available == 0`. It is not the joint complement of
/// the three badge groups: a paper with Available = 0 but Functional = 1
/// sits in both `Functional` and `NoBadge`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum GroupName {
    Available,
    Functional,
    Replicated,
    NoBadge,
}

impl GroupName {
    /// Canonical order; pairwise comparisons follow it.
    pub const ALL: [GroupName; 4] = [
        GroupName::Available,
        GroupName::Functional,
        GroupName::Replicated,
        GroupName::NoBadge,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            GroupName::Available  => "Badge Artifact Available",
            GroupName::Functional => "Badge Artifact Functional",
            GroupName::Replicated => "Badge Results Replicated",
            GroupName::NoBadge    => "No Badge",
        }
    }

    /// The single badge column and the flag value that select this group.
    pub fn selector(&self) -> (Badge, f64) {
        match self {
            GroupName::Available  => (Badge::Available, 1.0),
            GroupName::Functional => (Badge::Functional, 1.0),
            GroupName::Replicated => (Badge::Replicable, 1.0),
            GroupName::NoBadge    => (Badge::Available, 0.0),
        }
    }

    /// Badge-present group for a badge type.
    pub fn for_badge(badge: Badge) -> Self {
        match badge {
            Badge::Available  => GroupName::Available,
            Badge::Functional => GroupName::Functional,
            Badge::Replicable => GroupName::Replicated,
        }
    }
}

impl fmt::Display for GroupName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
