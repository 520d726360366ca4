use crate::error::Result;
use async_trait::async_trait;
use reqwest::Client;
use select::document::Document;
use std::time::Duration;

pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Fetches a page and parses it, keeping nothing.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<()>;
}

pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self> {
        Self::with_timeout(REQUEST_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("scrape-exporter/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<()> {
        let res = self.client.get(url).send().await?;
        // Error statuses still carry a body worth parsing.
        log::debug!("GET {} -> {}", url, res.status());

        let html = res.text().await?;
        log::debug!("HTML length: {} bytes", html.len());

        parse_html(&html);
        Ok(())
    }
}

fn parse_html(html: &str) {
    let document = Document::from(html);
    log::trace!("Parsed {} nodes", document.nodes.len());
}
