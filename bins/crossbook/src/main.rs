//! Crossbook CLI and server binary
//!
//! Entry point for the matching service. Provides commands for
//! initializing and validating configuration and for starting the
//! HTTP surface over the matching engine.

use anyhow::{Context, Result};
use cli::{Cli, Commands};
use config::{generate_default_config, load_config, save_config, validate_config};
use matching_engine::api::{create_router, ApiState};
use matching_engine::MatchingEngine;
use observability::{init_logging, LogFormat};
use server::{HttpServer, ServerConfig, ServerExt};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse_args();

    match cli.command {
        Commands::Start {
            config,
            host,
            port,
            symbols,
        } => start_service(config, host, port, symbols).await,
        Commands::Validate { config } => validate_command(&config),
        Commands::Init { output } => init_command(&output),
    }
}

async fn start_service(
    config_path: PathBuf,
    host_override: Option<String>,
    port_override: Option<u16>,
    symbols_override: Option<Vec<String>>,
) -> Result<()> {
    let mut config = load_config(&config_path)?;

    if let Some(host) = host_override {
        config.server.host = host;
    }
    if let Some(port) = port_override {
        config.server.port = port;
    }
    if let Some(symbols) = symbols_override {
        config.engine.symbols = symbols;
    }

    let format = config
        .logging
        .format
        .parse::<LogFormat>()
        .map_err(|e| anyhow::anyhow!(e))?;
    init_logging(&config.service.name, format, &config.logging.level)?;

    info!("Crossbook starting...");

    let report = validate_config(&config);
    for warning in &report.warnings {
        warn!(field = %warning.field, message = %warning.message, "configuration warning");
    }
    if !report.is_valid() {
        error!(
            error_count = report.errors.len(),
            "Configuration validation failed"
        );
        for err in &report.errors {
            error!("{}", err);
        }
        anyhow::bail!("Cannot start service due to configuration errors");
    }

    let engine = Arc::new(MatchingEngine::with_symbols(config.engine.symbols.clone()));
    info!(symbols = ?engine.symbols(), "matching engine ready");

    let state = ApiState::new(Arc::clone(&engine), config.engine.view_depth);
    let router = create_router(state).layer(TraceLayer::new_for_http());

    let server_config = ServerConfig::new(config.server.host.clone(), config.server.port);
    info!(host = %config.server.host, port = config.server.port, "serving matching API");
    HttpServer::new(server_config, router)
        .run_with_ctrl_c()
        .await
        .context("HTTP server failed")?;

    info!(metrics = ?engine.metrics(), "Crossbook stopped");
    Ok(())
}

fn validate_command(config_path: &Path) -> Result<()> {
    init_logging("crossbook", LogFormat::Pretty, "info")?;

    let config = load_config(config_path)?;
    let report = validate_config(&config);

    for warning in &report.warnings {
        warn!(field = %warning.field, message = %warning.message, "configuration warning");
    }
    if !report.is_valid() {
        for err in &report.errors {
            error!("{}", err);
        }
        anyhow::bail!("Configuration is invalid");
    }

    info!(path = ?config_path, "Configuration is valid");
    Ok(())
}

fn init_command(output: &Path) -> Result<()> {
    init_logging("crossbook", LogFormat::Pretty, "info")?;

    if output.exists() {
        warn!(path = ?output, "overwriting existing configuration");
    }
    let config = generate_default_config();
    save_config(&config, output)?;
    info!(path = ?output, "configuration written");
    Ok(())
}
