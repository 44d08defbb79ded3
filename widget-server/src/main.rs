//! Binary crate for the weather widget backend.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Bootstrapping logging and configuration
//! - Serving the lookup API over HTTP

use std::path::PathBuf;

use actix_web::{App, HttpServer, web};
use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use widget_core::{Config, RateLimiter, WeatherService, provider};
use widget_server::{cors_layer, routes};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "widget-server", version, about = "Weather lookup widget backend")]
struct Args {
    /// Path to a TOML config file; defaults to the platform config dir.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the configured bind address, e.g. "0.0.0.0:3000".
    #[arg(long)]
    bind: Option<String>,
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let bind_addr = args.bind.unwrap_or_else(|| config.bind_addr.clone());

    let geocoder = provider::geocoder_from_config(&config)?;
    let forecast = provider::forecast_provider_from_config(&config)?;
    let service = web::Data::new(WeatherService::new(geocoder, forecast, config.cache_ttl()));
    let limiter = web::Data::new(RateLimiter::new(
        config.rate_limit_window(),
        config.rate_limit_max_requests,
    ));

    tracing::info!(%bind_addr, origin = %config.allowed_origin, "starting widget server");

    HttpServer::new(move || {
        App::new()
            .wrap(cors_layer(&config))
            .app_data(service.clone())
            .app_data(limiter.clone())
            .configure(routes::configure)
    })
    .bind(&bind_addr)
    .with_context(|| format!("Failed to bind {bind_addr}"))?
    .run()
    .await
    .context("HTTP server terminated abnormally")
}
