//! Capsule CRM command line client
//!
//! # Usage
//!
//! ```bash
//! CAPSULE_ACCOUNT=sample CAPSULE_API_TOKEN=... capsule users
//! ```
//!
//! # Environment Variables
//!
//! * `CAPSULE_ACCOUNT` - account subdomain
//! * `CAPSULE_API_TOKEN` - API token
//! * `CAPSULE_BASE_URL` - overrides the account URL
//! * `CAPSULE_TIMEOUT_SECS` - request timeout (default: 30)
//! * `CAPSULE_LOG_LEVEL` - log filter when `RUST_LOG` is unset (default: warn)
//! * `CAPSULE_LOG_JSON` - log as JSON lines

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use infra_http::{CapsuleAdapter, CapsuleConfig};
use interface_cli::config::LogConfig;
use interface_cli::{run, Cli, CliError};

#[tokio::main]
async fn main() {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let log = LogConfig::from_env().unwrap_or_default();
    init_tracing(&log, cli.verbose, cli.log_json || log.json);

    match execute(cli).await {
        Ok(output) => println!("{output}"),
        Err(error) => {
            tracing::error!(%error, "command failed");
            eprintln!("error: {error}");
            std::process::exit(error.exit_code());
        }
    }
}

async fn execute(cli: Cli) -> Result<String, CliError> {
    let config = CapsuleConfig::from_env()?;
    let adapter = CapsuleAdapter::from_config(&config)?;

    tracing::debug!(base_url = %adapter.connection().base_url(), "connected");

    let output = run(&adapter, cli.command).await?;
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Initializes the tracing subscriber; logs are written to stderr
fn init_tracing(log: &LogConfig, verbose: bool, json: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(&log.level))
            .unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_target(true).with_writer(std::io::stderr))
            .init();
    }
}
