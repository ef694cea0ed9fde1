//! # es-index-memory
//!
//! Shows which indices of an Elasticsearch cluster hold the most memory.
//!
//! One request to the cluster's `_stats` endpoint yields, per index and for the cluster as a
//! whole, the memory used by the query cache, fielddata, segments and the request cache. Indices
//! are ranked by the sum of these four counters and the largest consumers are logged:
//!
//! ```text
//! ALL: QueryCache: 5M, Fielddata: 12M, Segments: 1M, RequestCache: 0M
//! a: QueryCache: 5M, Fielddata: 12M, Segments: 1M, RequestCache: 0M
//! b: QueryCache: 1M, Fielddata: 1M, Segments: 1M, RequestCache: 0M
//! ```
//!
//! ## Usage
//!
//! ```bash
//! es-index-memory --url=http://127.0.0.1:9200 --top=10
//! ```

#[macro_use]
extern crate tracing;

pub mod collectors;
pub mod config;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod reporter;

pub use collectors::*;
pub use crate::config::{
    Args,
    Config,
};
pub use error::ReportError;
pub use logging::{
    init_errors,
    init_logging,
};
pub use metrics::*;
pub use reporter::{
    rank,
    StatsReporter,
};
