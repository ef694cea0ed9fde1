use crate::{
    collectors::StatsCollector,
    error::ReportError,
    metrics::{
        MemoryBreakdown,
        StatsSnapshot,
    },
};
use reqwest::Client as HttpClient;
use serde::Deserialize;
use std::{
    collections::HashMap,
    future::Future,
    pin::Pin,
};
use url::Url;

/// Error bodies are echoed into the error message, but only up to this many characters.
const MAX_ERROR_BODY_CHARS: usize = 512;

/// Reads memory statistics from the `_stats` endpoint of an Elasticsearch cluster
pub struct ElasticsearchCollector {
    stats_url: Url,
    http_client: HttpClient,
}

impl ElasticsearchCollector {
    /// Create a collector with its own HTTP client.
    pub fn connect(cluster_url: &Url) -> Result<Self, ReportError> {
        let http_client = HttpClient::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ReportError::Client)?;

        Self::new(cluster_url, http_client)
    }

    pub fn new(cluster_url: &Url, http_client: HttpClient) -> Result<Self, ReportError> {
        let stats_url = stats_url(cluster_url)?;
        Ok(Self { stats_url, http_client })
    }

    async fn fetch_stats(&self) -> Result<StatsSnapshot, ReportError> {
        debug!(url = %self.stats_url, "Requesting index stats");

        let request_error = |source| ReportError::Request {
            url: self.stats_url.to_string(),
            source,
        };

        let response = self
            .http_client
            .get(self.stats_url.clone())
            .send()
            .await
            .map_err(request_error)?;

        let status = response.status();
        let body = response.text().await.map_err(request_error)?;

        if !status.is_success() {
            return Err(ReportError::Status {
                url: self.stats_url.to_string(),
                status,
                body: error_body(&body),
            });
        }

        debug!(bytes = body.len(), "Received index stats");
        parse_stats(&body)
    }
}

impl StatsCollector for ElasticsearchCollector {
    fn fetch(&self) -> Pin<Box<dyn Future<Output = Result<StatsSnapshot, ReportError>> + Send + '_>> {
        Box::pin(self.fetch_stats())
    }

    fn name(&self) -> &'static str {
        "ElasticsearchCollector"
    }
}

/// Resolve `<cluster_url>/_stats`, keeping any path prefix of the cluster URL (e.g. behind a proxy).
pub fn stats_url(cluster_url: &Url) -> Result<Url, ReportError> {
    let invalid = |reason: &str| ReportError::InvalidUrl {
        url: cluster_url.to_string(),
        reason: reason.to_string(),
    };

    if !matches!(cluster_url.scheme(), "http" | "https") {
        return Err(invalid("only http and https are supported"));
    }
    if cluster_url.cannot_be_a_base() || cluster_url.host_str().is_none() {
        return Err(invalid("no host"));
    }

    let mut base = cluster_url.clone();
    base.set_query(None);
    base.set_fragment(None);
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }

    base.join("_stats").map_err(|err| invalid(&err.to_string()))
}

/// Error pages from proxies span many lines, the error is reported on one.
fn error_body(body: &str) -> String {
    body.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .chars()
        .take(MAX_ERROR_BODY_CHARS)
        .collect()
}

/// Decode a `_stats` response body.
pub fn parse_stats(body: &str) -> Result<StatsSnapshot, ReportError> {
    let response: IndicesStatsResponse = serde_json::from_str(body).map_err(ReportError::Decode)?;

    Ok(StatsSnapshot {
        all: response.all.total.into(),
        indices: response
            .indices
            .into_iter()
            .map(|(name, stats)| (name, stats.total.into()))
            .collect(),
    })
}

// Only the parts of the `_stats` response that contribute to memory usage are decoded. Newer
// clusters no longer report `segments.memory_in_bytes`, so every counter defaults to zero.

#[derive(Debug, Deserialize)]
struct IndicesStatsResponse {
    #[serde(rename = "_all", default)]
    all: IndexStats,
    #[serde(default)]
    indices: HashMap<String, IndexStats>,
}

#[derive(Debug, Default, Deserialize)]
struct IndexStats {
    #[serde(default)]
    total: IndexStatsDetails,
}

#[derive(Debug, Default, Deserialize)]
struct IndexStatsDetails {
    #[serde(default)]
    query_cache: CacheStats,
    #[serde(default)]
    fielddata: CacheStats,
    #[serde(default)]
    segments: SegmentStats,
    #[serde(default)]
    request_cache: CacheStats,
}

#[derive(Debug, Default, Deserialize)]
struct CacheStats {
    #[serde(default)]
    memory_size_in_bytes: u64,
}

#[derive(Debug, Default, Deserialize)]
struct SegmentStats {
    #[serde(default)]
    memory_in_bytes: u64,
}

impl From<IndexStatsDetails> for MemoryBreakdown {
    fn from(details: IndexStatsDetails) -> Self {
        MemoryBreakdown::new(
            details.query_cache.memory_size_in_bytes,
            details.fielddata.memory_size_in_bytes,
            details.segments.memory_in_bytes,
            details.request_cache.memory_size_in_bytes,
        )
    }
}
