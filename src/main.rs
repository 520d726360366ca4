use clap::{Parser, Subcommand};
use scrape_exporter::config::ConfigLoader;
use scrape_exporter::exporter;
use scrape_exporter::fetcher::HttpFetcher;
use scrape_exporter::metrics::ScraperMetrics;
use scrape_exporter::scraper::Scraper;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "scrape-exporter")]
#[command(version)]
#[command(about = "Scrapes a fixed set of pages and exports scrape metrics to Prometheus", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the metrics server and scrape forever
    Run {
        /// Optional configuration file (JSON/YAML/TOML); built-in targets otherwise
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Validate a configuration file
    Check {
        /// Path to the configuration file
        #[arg(short, long)]
        config: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if std::env::var("RUST_LOG").is_err() {
        unsafe { std::env::set_var("RUST_LOG", "info"); }
    }
    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Stdout)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { config } => {
            if let Some(path) = &config {
                log::debug!("Loading config from {:?}", path);
            }
            let config = ConfigLoader::load_or_default(config.as_deref())?;
            log::debug!(
                "Scraping {} urls every {}s",
                config.urls.len(),
                config.poll_interval_secs
            );

            let metrics = ScraperMetrics::new()?;
            let _server = exporter::start(config.metrics_port, metrics.clone()).await?;

            let scraper = Scraper::new(Arc::new(HttpFetcher::new()?), metrics);

            tokio::select! {
                _ = tokio::signal::ctrl_c() => {
                    log::info!("Shutting down...");
                }
                _ = scraper.run(&config.urls, config.poll_interval()) => {}
            }
        }
        Commands::Check { config } => {
            match ConfigLoader::load(&config) {
                Ok(cfg) => {
                    println!("✅ Config is valid:");
                    println!("   URLs: {:?}", cfg.urls);
                    println!("   Poll interval: {}s", cfg.poll_interval_secs);
                    println!("   Metrics port: {}", cfg.metrics_port);
                }
                Err(e) => {
                    eprintln!("❌ Config error: {}", e);
                    std::process::exit(1);
                }
            }
        }
    }

    Ok(())
}
