//! Scrape instrumentation and its Prometheus exposition.

pub mod registry;
pub mod snapshot;
pub mod summary;

pub use registry::{ActiveScraperGuard, ScraperMetrics};
pub use snapshot::MetricsSnapshot;
pub use summary::{DurationSummary, SummaryTimer};
