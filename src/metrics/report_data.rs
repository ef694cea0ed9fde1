use super::{
    IndexEntry,
    MemoryBreakdown,
};
use chrono::{
    DateTime,
    Utc,
};
use std::collections::HashMap;

/// Decoded result of one `_stats` fetch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatsSnapshot {
    /// Cluster-wide totals (the `_all` section).
    pub all: MemoryBreakdown,
    pub indices: HashMap<String, MemoryBreakdown>,
}

impl StatsSnapshot {
    pub fn into_entries(self) -> Vec<IndexEntry> {
        self.indices
            .into_iter()
            .map(|(name, breakdown)| IndexEntry::new(name, breakdown))
            .collect()
    }
}

/// The top memory consumers of a cluster at `fetched_at`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedReport {
    pub cluster_total: MemoryBreakdown,
    pub entries: Vec<IndexEntry>,
    pub fetched_at: DateTime<Utc>,
}

impl RankedReport {
    /// Report lines in output order: the `ALL` row followed by one row per ranked index.
    pub fn lines(&self) -> Vec<String> {
        std::iter::once(format!("ALL: {}", self.cluster_total.summary()))
            .chain(
                self.entries
                    .iter()
                    .map(|entry| format!("{}: {}", entry.name, entry.breakdown.summary())),
            )
            .collect()
    }
}
