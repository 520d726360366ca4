#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetricsSnapshot {
    pub pages_scraped: u64,
    pub errors: u64,
    pub active_scrapers: i64,
    pub scrape_duration_count: u64,
    pub scrape_duration_sum_seconds: f64,
}

impl MetricsSnapshot {
    pub fn success_rate(&self) -> f64 {
        let attempts = self.pages_scraped + self.errors;
        if attempts > 0 {
            (self.pages_scraped as f64 / attempts as f64) * 100.0
        } else {
            0.0
        }
    }

    pub fn avg_duration_seconds(&self) -> f64 {
        if self.scrape_duration_count > 0 {
            self.scrape_duration_sum_seconds / self.scrape_duration_count as f64
        } else {
            0.0
        }
    }
}
