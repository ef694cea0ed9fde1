//! Ranking of indices by memory usage.

use crate::{
    collectors::StatsCollector,
    error::ReportError,
    metrics::{
        IndexEntry,
        RankedReport,
    },
};
use chrono::Utc;
use std::cmp::Ordering;

/// Number of indices reported unless configured otherwise.
pub const DEFAULT_TOP: usize = 10;

/// Turns one stats snapshot into a bounded, ranked report.
#[derive(Debug, Clone, Copy)]
pub struct StatsReporter {
    limit: usize,
}

impl Default for StatsReporter {
    fn default() -> Self {
        Self::new(DEFAULT_TOP)
    }
}

impl StatsReporter {
    pub fn new(limit: usize) -> Self {
        Self { limit }
    }

    /// Fetch a snapshot from `collector` and rank its indices.
    ///
    /// A failed fetch is returned as is, nothing is ranked in that case.
    #[instrument(level = "debug", skip_all, fields(collector = collector.name(), limit = self.limit))]
    pub async fn report(&self, collector: &(dyn StatsCollector + Sync)) -> Result<RankedReport, ReportError> {
        let snapshot = collector.fetch().await?;
        let fetched_at = Utc::now();
        let cluster_total = snapshot.all;
        let index_count = snapshot.indices.len();

        let entries = rank(snapshot.into_entries(), self.limit);
        debug!(index_count, reported = entries.len(), "Ranked indices");

        Ok(RankedReport {
            cluster_total,
            entries,
            fetched_at,
        })
    }
}

/// Sort by total memory, largest first, and keep at most `limit` entries.
///
/// Indices with the same total memory are ordered by name so that the output never depends on
/// the order in which the cluster listed them.
pub fn rank(mut entries: Vec<IndexEntry>, limit: usize) -> Vec<IndexEntry> {
    entries.sort_unstable_by(by_memory_descending);
    entries.truncate(limit);
    entries
}

fn by_memory_descending(a: &IndexEntry, b: &IndexEntry) -> Ordering {
    b.total_memory()
        .cmp(&a.total_memory())
        .then_with(|| a.name.cmp(&b.name))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::metrics::{
        MemoryBreakdown,
        StatsSnapshot,
    };
    use pretty_assertions::assert_eq;
    use reqwest::StatusCode;
    use std::{
        collections::HashMap,
        future::Future,
        pin::Pin,
        sync::atomic::{
            AtomicUsize,
            Ordering as AtomicOrdering,
        },
    };

    fn entry(name: &str, total: u64) -> IndexEntry {
        IndexEntry::new(name, MemoryBreakdown::new(total, 0, 0, 0))
    }

    fn names(entries: &[IndexEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.name.as_str()).collect()
    }

    struct FakeCollector {
        snapshot: Option<StatsSnapshot>,
        calls: AtomicUsize,
    }

    impl FakeCollector {
        fn ok(snapshot: StatsSnapshot) -> Self {
            Self {
                snapshot: Some(snapshot),
                calls: AtomicUsize::new(0),
            }
        }

        fn failing() -> Self {
            Self {
                snapshot: None,
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl StatsCollector for FakeCollector {
        fn fetch(&self) -> Pin<Box<dyn Future<Output = Result<StatsSnapshot, ReportError>> + Send + '_>> {
            Box::pin(async move {
                self.calls.fetch_add(1, AtomicOrdering::SeqCst);
                self.snapshot.clone().ok_or_else(|| ReportError::Status {
                    url: "http://127.0.0.1:9200/_stats".to_string(),
                    status: StatusCode::SERVICE_UNAVAILABLE,
                    body: "cluster unavailable".to_string(),
                })
            })
        }

        fn name(&self) -> &'static str {
            "FakeCollector"
        }
    }

    #[test]
    fn rank_orders_by_total_memory_descending() {
        let entries = vec![entry("small", 1), entry("large", 300), entry("medium", 20)];
        let ranked = rank(entries, 10);
        assert_eq!(names(&ranked), vec!["large", "medium", "small"]);
    }

    #[test]
    fn rank_uses_the_sum_of_all_counters() {
        let entries = vec![
            IndexEntry::new("caches", MemoryBreakdown::new(10, 0, 0, 10)),
            IndexEntry::new("segments", MemoryBreakdown::new(0, 0, 15, 0)),
            IndexEntry::new("fielddata", MemoryBreakdown::new(0, 19, 0, 0)),
        ];
        let ranked = rank(entries, 10);
        assert_eq!(names(&ranked), vec!["caches", "fielddata", "segments"]);
    }

    #[test]
    fn rank_truncates_to_limit() {
        let entries: Vec<_> = (0..25).map(|i| entry(&format!("index-{i:02}"), i)).collect();
        let ranked = rank(entries.clone(), 10);
        assert_eq!(ranked.len(), 10);
        assert_eq!(ranked.first().unwrap().name, "index-24");
        assert_eq!(ranked.last().unwrap().name, "index-15");

        let ranked = rank(entries, 100);
        assert_eq!(ranked.len(), 25);
    }

    #[test]
    fn rank_boundaries() {
        assert!(rank(vec![entry("a", 1), entry("b", 2)], 0).is_empty());
        assert!(rank(Vec::new(), 0).is_empty());
        assert!(rank(Vec::new(), 10).is_empty());
    }

    #[test]
    fn rank_breaks_ties_by_name() {
        let entries = vec![entry("c", 5), entry("a", 5), entry("z", 9), entry("b", 5)];
        let ranked = rank(entries, 10);
        assert_eq!(names(&ranked), vec!["z", "a", "b", "c"]);

        let ranked = rank(vec![entry("c", 5), entry("b", 5), entry("a", 5)], 2);
        assert_eq!(names(&ranked), vec!["a", "b"]);
    }

    #[test]
    fn rank_is_independent_of_input_order() {
        let entries = vec![entry("d", 4), entry("a", 7), entry("c", 4), entry("b", 1), entry("e", 7)];
        let mut reversed = entries.clone();
        reversed.reverse();

        let first = rank(entries.clone(), 4);
        assert_eq!(first, rank(reversed, 4));
        assert_eq!(first, rank(entries, 4));
    }

    #[test]
    fn rank_result_is_drawn_from_input_without_duplicates() {
        let entries: Vec<_> = (0..30u64)
            .map(|i| IndexEntry::new(format!("i{i}"), MemoryBreakdown::new(i * 7 % 11, i % 3, 0, i % 5)))
            .collect();

        for limit in [0, 1, 5, 29, 30, 31] {
            let ranked = rank(entries.clone(), limit);
            assert_eq!(ranked.len(), limit.min(entries.len()));
            assert!(ranked.iter().all(|e| entries.contains(e)));

            let mut seen: Vec<_> = names(&ranked);
            seen.sort();
            seen.dedup();
            assert_eq!(seen.len(), ranked.len());

            assert!(ranked
                .windows(2)
                .all(|pair| pair[0].total_memory() >= pair[1].total_memory()));
        }
    }

    #[tokio::test]
    async fn report_ranks_snapshot() {
        let collector = FakeCollector::ok(StatsSnapshot {
            all: MemoryBreakdown::new(5_000_000, 12_000_000, 1_000_000, 0),
            indices: HashMap::from([
                ("b".to_string(), MemoryBreakdown::new(1_000_000, 1_000_000, 1_000_000, 0)),
                ("a".to_string(), MemoryBreakdown::new(5_000_000, 12_000_000, 1_000_000, 0)),
            ]),
        });

        let report = StatsReporter::default().report(&collector).await.unwrap();

        assert_eq!(collector.calls.load(AtomicOrdering::SeqCst), 1);
        assert_eq!(
            report.lines(),
            vec![
                "ALL: QueryCache: 5M, Fielddata: 12M, Segments: 1M, RequestCache: 0M",
                "a: QueryCache: 5M, Fielddata: 12M, Segments: 1M, RequestCache: 0M",
                "b: QueryCache: 1M, Fielddata: 1M, Segments: 1M, RequestCache: 0M",
            ]
        );
    }

    #[tokio::test]
    async fn report_records_fetch_time() {
        let collector = FakeCollector::ok(StatsSnapshot::default());

        let before = Utc::now();
        let report = StatsReporter::default().report(&collector).await.unwrap();
        let after = Utc::now();

        assert!(before <= report.fetched_at && report.fetched_at <= after);
    }

    #[tokio::test]
    async fn report_keeps_cluster_total_from_source() {
        // The cluster total is taken as reported, not recomputed from the listed indices.
        let collector = FakeCollector::ok(StatsSnapshot {
            all: MemoryBreakdown::new(99_000_000, 0, 0, 0),
            indices: HashMap::from([("only".to_string(), MemoryBreakdown::new(1_000_000, 0, 0, 0))]),
        });

        let report = StatsReporter::new(0).report(&collector).await.unwrap();
        assert_eq!(report.cluster_total, MemoryBreakdown::new(99_000_000, 0, 0, 0));
        assert!(report.entries.is_empty());
    }

    #[tokio::test]
    async fn report_applies_limit() {
        let indices = (0..15u64)
            .map(|i| (format!("index-{i}"), MemoryBreakdown::new(0, i * 1_000_000, 0, 0)))
            .collect();
        let collector = FakeCollector::ok(StatsSnapshot {
            all: MemoryBreakdown::default(),
            indices,
        });

        let report = StatsReporter::default().report(&collector).await.unwrap();
        assert_eq!(report.entries.len(), DEFAULT_TOP);
        assert_eq!(report.entries[0].name, "index-14");

        let report = StatsReporter::new(3).report(&collector).await.unwrap();
        assert_eq!(names(&report.entries), vec!["index-14", "index-13", "index-12"]);
    }

    #[tokio::test]
    async fn report_propagates_fetch_failure() {
        let collector = FakeCollector::failing();
        let err = StatsReporter::default().report(&collector).await.unwrap_err();

        assert_eq!(collector.calls.load(AtomicOrdering::SeqCst), 1);
        assert!(matches!(
            err,
            ReportError::Status {
                status: StatusCode::SERVICE_UNAVAILABLE,
                ..
            }
        ));
    }
}
