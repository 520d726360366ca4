use crate::error::Result;
use crate::fetcher::PageFetcher;
use crate::metrics::ScraperMetrics;
use rand::Rng;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;

pub const DEFAULT_PROCESSING_DELAY: (Duration, Duration) =
    (Duration::from_millis(500), Duration::from_millis(2000));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrapeOutcome {
    Success,
    Failed,
}

impl ScrapeOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ScrapeOutcome::Success)
    }
}

/// Visits pages one at a time and records every attempt in [`ScraperMetrics`].
pub struct Scraper {
    fetcher: Arc<dyn PageFetcher>,
    metrics: ScraperMetrics,
    processing_delay: (Duration, Duration),
}

impl Scraper {
    pub fn new(fetcher: Arc<dyn PageFetcher>, metrics: ScraperMetrics) -> Self {
        Self {
            fetcher,
            metrics,
            processing_delay: DEFAULT_PROCESSING_DELAY,
        }
    }

    /// Bounds of the simulated processing time spent after each fetch.
    pub fn with_processing_delay(mut self, min: Duration, max: Duration) -> Self {
        self.processing_delay = if min <= max { (min, max) } else { (max, min) };
        self
    }

    pub fn metrics(&self) -> &ScraperMetrics {
        &self.metrics
    }

    /// One attempt against `url`. Failures are counted and logged, never returned.
    pub async fn scrape_page(&self, url: &str) -> ScrapeOutcome {
        let _active = self.metrics.track_active();

        let result = {
            let _timer = self.metrics.start_timer();
            self.fetch_and_process(url).await
        };

        match result {
            Ok(()) => {
                self.metrics.record_success();
                ScrapeOutcome::Success
            }
            Err(e) => {
                self.metrics.record_failure();
                log::error!("Error scraping {}: {}", url, e);
                ScrapeOutcome::Failed
            }
        }
    }

    /// Scrapes every url once, in order.
    pub async fn run_round(&self, urls: &[String]) -> Vec<ScrapeOutcome> {
        let mut outcomes = Vec::with_capacity(urls.len());
        for url in urls {
            outcomes.push(self.scrape_page(url).await);
        }
        outcomes
    }

    /// Scrapes `urls` forever, pausing `interval` after each round.
    pub async fn run(&self, urls: &[String], interval: Duration) {
        let mut round: u64 = 0;
        loop {
            round += 1;
            let outcomes = self.run_round(urls).await;
            let succeeded = outcomes.iter().filter(|o| o.is_success()).count();
            let snapshot = self.metrics.snapshot();
            log::debug!(
                "Round {} done: {}/{} pages ok | Total scraped: {} | Success: {:.1}% | Avg duration: {:.2}s",
                round,
                succeeded,
                outcomes.len(),
                snapshot.pages_scraped,
                snapshot.success_rate(),
                snapshot.avg_duration_seconds()
            );
            sleep(interval).await;
        }
    }

    async fn fetch_and_process(&self, url: &str) -> Result<()> {
        self.fetcher.fetch(url).await?;
        sleep(self.simulated_delay()).await;
        Ok(())
    }

    fn simulated_delay(&self) -> Duration {
        let (min, max) = self.processing_delay;
        if min == max {
            return min;
        }
        let secs = rand::thread_rng().gen_range(min.as_secs_f64()..=max.as_secs_f64());
        Duration::from_secs_f64(secs)
    }
}
