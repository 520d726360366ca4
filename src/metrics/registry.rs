use crate::error::{Error, Result};
use crate::metrics::snapshot::MetricsSnapshot;
use crate::metrics::summary::{DurationSummary, SummaryTimer};
use prometheus::{Encoder, IntCounter, IntGauge, Opts, Registry, TextEncoder};

pub const PAGES_SCRAPED_TOTAL: &str = "scraper_pages_scraped_total";
pub const ERRORS_TOTAL: &str = "scraper_errors_total";
pub const SCRAPE_DURATION_SECONDS: &str = "scraper_scrape_duration_seconds";
pub const ACTIVE_SCRAPERS: &str = "scraper_active_scrapers";

/// The four scrape metrics and the registry that exposes them.
///
/// On Linux the registry also carries the standard `process_*` series.
///
/// Cloning is cheap and every clone updates the same series.
#[derive(Clone)]
pub struct ScraperMetrics {
    registry: Registry,
    pages_scraped: IntCounter,
    errors: IntCounter,
    scrape_duration: DurationSummary,
    active_scrapers: IntGauge,
}

impl ScraperMetrics {
    pub fn new() -> Result<Self> {
        let registry = Registry::new();

        let pages_scraped = IntCounter::with_opts(Opts::new(
            PAGES_SCRAPED_TOTAL,
            "Total number of pages scraped",
        ))?;
        let errors = IntCounter::with_opts(Opts::new(
            ERRORS_TOTAL,
            "Total number of scraping errors",
        ))?;
        let scrape_duration =
            DurationSummary::new(SCRAPE_DURATION_SECONDS, "Time spent scraping pages")?;
        let active_scrapers =
            IntGauge::with_opts(Opts::new(ACTIVE_SCRAPERS, "Number of active scrapers"))?;

        registry.register(Box::new(pages_scraped.clone()))?;
        registry.register(Box::new(errors.clone()))?;
        registry.register(Box::new(scrape_duration.clone()))?;
        registry.register(Box::new(active_scrapers.clone()))?;

        #[cfg(target_os = "linux")]
        registry.register(Box::new(
            prometheus::process_collector::ProcessCollector::for_self(),
        ))?;

        Ok(Self {
            registry,
            pages_scraped,
            errors,
            scrape_duration,
            active_scrapers,
        })
    }

    pub fn record_success(&self) {
        self.pages_scraped.inc();
    }

    pub fn record_failure(&self) {
        self.errors.inc();
    }

    pub fn start_timer(&self) -> SummaryTimer {
        self.scrape_duration.start_timer()
    }

    /// Marks one scraper as active until the guard is dropped.
    pub fn track_active(&self) -> ActiveScraperGuard {
        self.active_scrapers.inc();
        ActiveScraperGuard {
            gauge: self.active_scrapers.clone(),
        }
    }

    /// Renders every registered metric in the Prometheus text format.
    pub fn render(&self) -> Result<String> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| Error::Internal(e.to_string()))
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            pages_scraped: self.pages_scraped.get(),
            errors: self.errors.get(),
            active_scrapers: self.active_scrapers.get(),
            scrape_duration_count: self.scrape_duration.sample_count(),
            scrape_duration_sum_seconds: self.scrape_duration.sample_sum(),
        }
    }
}

pub struct ActiveScraperGuard {
    gauge: IntGauge,
}

impl Drop for ActiveScraperGuard {
    fn drop(&mut self) {
        self.gauge.dec();
    }
}
