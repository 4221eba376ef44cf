mod analyzer;
mod config;
mod model;
mod normalizer;
mod notifier;
mod scraper;
mod utils;

use analyzer::{shop_age_days, AnalysisRequest, Analyzer, AnalyzerImpl};
use chrono::Utc;
use config::{load_config, AppConfig, OutputFormat};
use model::AppError;
use notifier::{render_json, render_text};
use scraper::{fetch_catalog, EtsyClient};
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const DEFAULT_CONFIG_PATH: &str = "config.json";

#[tokio::main]
async fn main() -> ExitCode {
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
    let loaded = load_config(&config_path);

    // Initialize logging; RUST_LOG wins over the configured level
    let level = loaded
        .as_ref()
        .map(|cfg| cfg.log_level.clone())
        .unwrap_or_else(|_| "info".to_string());
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&level)))
        .with_writer(std::io::stderr)
        .init();

    let config = match loaded {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Config load error ({}): {}", config_path, e);
            return ExitCode::FAILURE;
        }
    };

    match run(&config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

/// Fetches the configured shop, analyzes its catalog and prints the report.
async fn run(config: &AppConfig) -> Result<(), AppError> {
    let client = EtsyClient::new(
        &config.api_key,
        &config.api_base_url,
        config.request_timeout_seconds,
    )?;

    let catalog = fetch_catalog(&client, &config.store_name, config.thumbnail_limit)
        .await
        .map_err(AppError::ShopUnavailable)?;

    let request = AnalysisRequest {
        thresholds: config.filters,
        show_all: config.show_all,
        now: Utc::now(),
    };
    let analyzer = AnalyzerImpl::new();
    let report = analyzer.analyze(&catalog.listings, &catalog.thumbnails, &request);
    let shop_age = shop_age_days(&catalog.shop, request.now);

    info!(
        "Rendering report for shop {} ({} listings)",
        catalog.shop.shop_id,
        report.rows.len()
    );
    let rendered = match config.output {
        OutputFormat::Text => render_text(&catalog.shop, shop_age, &report),
        OutputFormat::Json => render_json(&catalog.shop, shop_age, &report)?,
    };
    println!("{}", rendered);

    Ok(())
}
