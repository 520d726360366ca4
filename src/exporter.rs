//! HTTP exposition of the scrape metrics for a Prometheus server to pull.

use crate::error::Result;
use crate::metrics::ScraperMetrics;
use axum::{Router, extract::State, http::StatusCode, response::IntoResponse, routing::get};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

pub const METRICS_PATH: &str = "/metrics";
const CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";

pub fn router(metrics: ScraperMetrics) -> Router {
    Router::new()
        .route(METRICS_PATH, get(metrics_handler))
        .with_state(metrics)
}

async fn metrics_handler(State(metrics): State<ScraperMetrics>) -> impl IntoResponse {
    match metrics.render() {
        Ok(text) => (StatusCode::OK, [("Content-Type", CONTENT_TYPE)], text),
        Err(e) => {
            log::error!("Failed to render metrics: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                [("Content-Type", "text/plain")],
                e.to_string(),
            )
        }
    }
}

/// Serves the metrics endpoint on an already bound listener until the task is dropped.
pub async fn serve(listener: TcpListener, metrics: ScraperMetrics) -> Result<()> {
    axum::serve(listener, router(metrics)).await?;
    Ok(())
}

pub struct MetricsServer {
    pub addr: SocketAddr,
    pub handle: JoinHandle<()>,
}

/// Binds `0.0.0.0:port` and serves the metrics endpoint in the background.
///
/// Port 0 picks a free port; the startup line names the bound one.
pub async fn start(port: u16, metrics: ScraperMetrics) -> Result<MetricsServer> {
    let listener = TcpListener::bind(SocketAddr::from(([0, 0, 0, 0], port))).await?;
    let addr = listener.local_addr()?;
    log::info!("Prometheus metrics server started on port {}", addr.port());

    let handle = tokio::spawn(async move {
        if let Err(e) = serve(listener, metrics).await {
            log::error!("Metrics server stopped: {}", e);
        }
    });
    Ok(MetricsServer { addr, handle })
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn spawn_exporter(metrics: ScraperMetrics) -> SocketAddr {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(serve(listener, metrics));
        addr
    }

    #[tokio::test]
    async fn serves_text_exposition() {
        let metrics = ScraperMetrics::new().unwrap();
        metrics.record_failure();
        let addr = spawn_exporter(metrics).await;

        let res = reqwest::get(format!("http://{}{}", addr, METRICS_PATH))
            .await
            .unwrap();
        assert_eq!(res.status(), reqwest::StatusCode::OK);
        assert_eq!(
            res.headers()["content-type"].to_str().unwrap(),
            CONTENT_TYPE
        );

        let body = res.text().await.unwrap();
        assert!(body.contains("scraper_errors_total 1"));
        assert!(body.contains("scraper_pages_scraped_total 0"));
        assert!(body.contains("scraper_scrape_duration_seconds_sum 0"));
        assert!(body.contains("scraper_active_scrapers 0"));
    }

    #[tokio::test]
    async fn start_announces_bound_port() {
        crate::log_capture::init();
        let server = start(0, ScraperMetrics::new().unwrap()).await.unwrap();
        let port = server.addr.port();

        let line = format!("Prometheus metrics server started on port {}", port);
        let records = crate::log_capture::records_containing(&line);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].level, log::Level::Info);

        let res = reqwest::get(format!("http://127.0.0.1:{}{}", port, METRICS_PATH))
            .await
            .unwrap();
        assert_eq!(res.status(), reqwest::StatusCode::OK);
        server.handle.abort();
    }

    #[tokio::test]
    async fn other_paths_are_not_found() {
        let addr = spawn_exporter(ScraperMetrics::new().unwrap()).await;
        let res = reqwest::get(format!("http://{}/", addr)).await.unwrap();
        assert_eq!(res.status(), reqwest::StatusCode::NOT_FOUND);
    }
}
