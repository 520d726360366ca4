pub mod config;
pub mod error;
pub mod exporter;
pub mod fetcher;
#[cfg(test)]
mod log_capture;
pub mod metrics;
pub mod scraper;

pub use config::{ConfigLoader, ScraperConfig};
pub use error::{Error, Result};
pub use fetcher::{HttpFetcher, PageFetcher};
pub use metrics::{MetricsSnapshot, ScraperMetrics};
pub use scraper::{ScrapeOutcome, Scraper};
