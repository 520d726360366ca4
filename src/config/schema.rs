use serde::{Deserialize, Serialize};
use std::time::Duration;
use validator::{Validate, ValidationError};

pub const DEFAULT_URLS: [&str; 3] = [
    "http://example.com",
    "http://example.org",
    "http://example.net",
];
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 60;
pub const DEFAULT_METRICS_PORT: u16 = 8000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_timing"))]
pub struct ScraperConfig {
    /// Pages visited on every round, in order
    #[serde(default = "default_urls")]
    #[validate(length(min = 1), custom = "validate_urls")]
    pub urls: Vec<String>,

    /// Pause between two rounds
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,

    #[serde(default = "default_metrics_port")]
    pub metrics_port: u16,
}

impl ScraperConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            urls: default_urls(),
            poll_interval_secs: default_poll_interval(),
            metrics_port: default_metrics_port(),
        }
    }
}

fn default_urls() -> Vec<String> {
    DEFAULT_URLS.iter().map(|u| u.to_string()).collect()
}

fn default_poll_interval() -> u64 {
    DEFAULT_POLL_INTERVAL_SECS
}

fn default_metrics_port() -> u16 {
    DEFAULT_METRICS_PORT
}

fn validate_urls(urls: &Vec<String>) -> Result<(), ValidationError> {
    for raw in urls {
        let parsed = url::Url::parse(raw).map_err(|_| {
            let mut err = ValidationError::new("invalid_url");
            err.add_param("url".into(), raw);
            err
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            let mut err = ValidationError::new("unsupported_scheme");
            err.add_param("url".into(), raw);
            return Err(err);
        }
    }
    Ok(())
}

fn validate_timing(config: &ScraperConfig) -> Result<(), ValidationError> {
    if config.poll_interval_secs == 0 {
        return Err(ValidationError::new("poll_interval_secs must be at least 1"));
    }
    if config.metrics_port == 0 {
        return Err(ValidationError::new("metrics_port must be non-zero"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_builtin_targets() {
        let config = ScraperConfig::default();
        assert_eq!(config.urls, DEFAULT_URLS.to_vec());
        assert_eq!(config.poll_interval(), Duration::from_secs(60));
        assert_eq!(config.metrics_port, 8000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_empty_url_list() {
        let config = ScraperConfig {
            urls: vec![],
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_malformed_and_non_http_urls() {
        for bad in ["not a url", "ftp://example.com/file"] {
            let config = ScraperConfig {
                urls: vec![bad.to_string()],
                ..Default::default()
            };
            assert!(config.validate().is_err(), "{} should be rejected", bad);
        }
    }

    #[test]
    fn rejects_zero_interval_or_port() {
        let config = ScraperConfig {
            poll_interval_secs: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = ScraperConfig {
            metrics_port: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
