use std::fmt;

const BYTES_PER_MEGABYTE: u64 = 1_000_000;

/// Memory accounting of an index (or of the whole cluster) as reported by the `_stats` API.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct MemoryBreakdown {
    pub query_cache_bytes: u64,
    pub fielddata_bytes: u64,
    pub segments_bytes: u64,
    pub request_cache_bytes: u64,
}

impl MemoryBreakdown {
    pub fn new(query_cache_bytes: u64, fielddata_bytes: u64, segments_bytes: u64, request_cache_bytes: u64) -> Self {
        Self {
            query_cache_bytes,
            fielddata_bytes,
            segments_bytes,
            request_cache_bytes,
        }
    }

    /// Sum of all four counters. This is the ranking key.
    pub fn total_memory(&self) -> u64 {
        self.query_cache_bytes
            .saturating_add(self.fielddata_bytes)
            .saturating_add(self.segments_bytes)
            .saturating_add(self.request_cache_bytes)
    }

    /// Renders the counters in whole megabytes (truncated), e.g.
    /// `QueryCache: 5M, Fielddata: 12M, Segments: 1M, RequestCache: 0M`.
    pub fn summary(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for MemoryBreakdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "QueryCache: {}M, Fielddata: {}M, Segments: {}M, RequestCache: {}M",
            self.query_cache_bytes / BYTES_PER_MEGABYTE,
            self.fielddata_bytes / BYTES_PER_MEGABYTE,
            self.segments_bytes / BYTES_PER_MEGABYTE,
            self.request_cache_bytes / BYTES_PER_MEGABYTE,
        )
    }
}

/// A single index together with its memory breakdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexEntry {
    pub name: String,
    pub breakdown: MemoryBreakdown,
}

impl IndexEntry {
    pub fn new(name: impl Into<String>, breakdown: MemoryBreakdown) -> Self {
        Self {
            name: name.into(),
            breakdown,
        }
    }

    pub fn total_memory(&self) -> u64 {
        self.breakdown.total_memory()
    }
}
