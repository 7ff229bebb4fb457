//! Accounts API entry point.
//!
//! Loads configuration from TOML, initializes tracing, builds the account
//! repository and request budget, sets up the Axum router and serves it until
//! a shutdown signal arrives.

use std::path::{Path, PathBuf};

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use accounts_api::budget::RequestBudget;
use accounts_api::config::{AppConfig, DEFAULT_CONFIG_PATH, DEFAULT_LOG_FILTER};
use accounts_api::http::start_server;
use accounts_api::repository::StaticAccounts;
use accounts_api::{create_router, AppState};

/// Read-only HTTP API over account records
#[derive(Parser, Debug)]
#[command(name = "accounts-api", version, about)]
struct Args {
    /// Path to configuration file [default: config/default.toml if present]
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level filter (e.g., "accounts_api=debug,tower_http=info")
    #[arg(short, long)]
    log_level: Option<String>,

    /// Listen port, overriding http.port
    #[arg(short, long)]
    port: Option<u16>,
}

fn load_config(args: &Args) -> Result<AppConfig, Box<dyn std::error::Error>> {
    let config = match &args.config {
        Some(path) => AppConfig::load(path)?,
        None if Path::new(DEFAULT_CONFIG_PATH).exists() => AppConfig::load(DEFAULT_CONFIG_PATH)?,
        None => AppConfig::default(),
    };
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = load_config(&args)?;
    if let Some(port) = args.port {
        config.http.port = port;
    }

    // Initialize tracing with priority: CLI > env > default
    let log_filter = args
        .log_level
        .clone()
        .or_else(|| std::env::var("RUST_LOG").ok())
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

    let registry =
        tracing_subscriber::registry().with(tracing_subscriber::EnvFilter::new(&log_filter));
    if config.logging.is_json() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    tracing::info!(
        host = %config.http.host,
        port = config.http.port,
        timeout_secs = config.handler.timeout_seconds,
        context_timeout_secs = config.handler.context_timeout_seconds,
        "Loaded configuration"
    );

    let accounts = match &config.data.seed_file {
        Some(path) => {
            let accounts = StaticAccounts::from_file(path)?;
            tracing::info!(path = %path, count = accounts.len(), "Loaded accounts from seed file");
            accounts
        }
        None => {
            let accounts = StaticAccounts::seeded();
            tracing::info!(count = accounts.len(), "Loaded built-in accounts");
            accounts
        }
    };

    let budget = RequestBudget::from_config(&config.handler)?;
    let state = AppState::new(accounts, budget);
    let app = create_router(state);

    if let Err(e) = start_server(app, &config).await {
        tracing::error!(error = %e, "Server failed");
        return Err(e.into());
    }

    Ok(())
}
