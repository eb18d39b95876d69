//! Splits the joined table into the four named citation groups.

use std::collections::BTreeMap;

use citebadge_common::GroupName;
use citebadge_ingestion::JoinedTable;
use tracing::debug;

/// Citation counts per named group. Groups may overlap and may be empty.
#[derive(Debug, Clone, PartialEq)]
pub struct Groups {
    groups: BTreeMap<GroupName, Vec<f64>>,
}

impl Groups {
    /// Citation counts of one group, in table order.
    pub fn get(&self, name: GroupName) -> &[f64] {
        self.groups.get(&name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Groups in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (GroupName, &[f64])> {
        GroupName::ALL.into_iter().map(move |g| (g, self.get(g)))
    }

    /// The six unordered pairs, in canonical (i < j) order.
    pub fn pairs() -> Vec<(GroupName, GroupName)> {
        let all = GroupName::ALL;
        let mut out = Vec::with_capacity(6);
        for i in 0..all.len() {
            for j in (i + 1)..all.len() {
                out.push((all[i], all[j]));
            }
        }
        out
    }

    pub fn is_all_empty(&self) -> bool {
        self.groups.values().all(Vec::is_empty)
    }
}

/// Build the four groups. A row joins a group when the group's badge
/// column equals the selecting value; rows with a missing citation count
/// are left out of every group.
pub fn partition(table: &JoinedTable) -> Groups {
    let groups: BTreeMap<GroupName, Vec<f64>> = GroupName::ALL
        .into_iter()
        .map(|name| {
            let (badge, wanted) = name.selector();
            let citations: Vec<f64> = table
                .rows
                .iter()
                .filter(|r| r.badge(badge) == Some(wanted))
                .filter_map(|r| r.citations)
                .collect();
            debug!(group = name.label(), size = citations.len(), "Partitioned group");
            (name, citations)
        })
        .collect();

    Groups { groups }
}
