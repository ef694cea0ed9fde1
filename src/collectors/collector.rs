use crate::{
    error::ReportError,
    metrics::StatsSnapshot,
};
use std::{
    future::Future,
    pin::Pin,
};

/// Source of index statistics for the reporter
pub trait StatsCollector {
    /// Fetch one point-in-time snapshot of cluster-wide and per-index memory usage
    fn fetch(&self) -> Pin<Box<dyn Future<Output = Result<StatsSnapshot, ReportError>> + Send + '_>>;

    /// Get the name of this collector
    fn name(&self) -> &'static str;
}
