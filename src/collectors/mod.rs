//! # Collectors Module
//!
//! Sources of index statistics for the reporter.
//!
//! - **`StatsCollector` trait**: one fetch of cluster-wide and per-index memory usage
//! - **`ElasticsearchCollector`**: reads the `_stats` endpoint of an Elasticsearch cluster over HTTP

pub mod collector;
pub mod elasticsearch_collector;

// Re-export the main types for easy access
pub use collector::StatsCollector;
pub use elasticsearch_collector::ElasticsearchCollector;
