//! Quote Server
//!
//! REST API server for the mortgage rate quoting engine.

use clap::Parser;
use quote_server::config::{build_config, CliArgs as ConfigCliArgs, Environment};
use quote_server::server::Server;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Quote Server - REST API for concurrent mortgage rate pricing
#[derive(Parser, Debug)]
#[command(name = "quote_server")]
#[command(version, about, long_about = None)]
struct Args {
    /// Configuration file path (TOML format)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Host address to bind to
    #[arg(long, env = "QUOTE_SERVER_HOST")]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "QUOTE_SERVER_PORT")]
    port: Option<u16>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "QUOTE_LOG_LEVEL")]
    log_level: Option<String>,

    /// Primary pricing provider endpoint
    #[arg(long, env = "QUOTE_PRIMARY_URL")]
    primary_url: Option<String>,

    /// Expanded-market pricing provider endpoint
    #[arg(long, env = "QUOTE_EXPANDED_URL")]
    expanded_url: Option<String>,
}

impl From<Args> for ConfigCliArgs {
    fn from(args: Args) -> Self {
        ConfigCliArgs {
            config_file: args.config,
            host: args.host,
            port: args.port,
            log_level: args.log_level,
            primary_url: args.primary_url,
            expanded_url: args.expanded_url,
        }
    }
}

fn init_tracing(log_level: &str, environment: Environment) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));

    // Production emits JSON for log aggregation; everything else stays
    // human-readable.
    if environment.is_production() {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let cli_args: ConfigCliArgs = args.into();
    let config = build_config(&cli_args)?;

    // Initialize tracing
    init_tracing(config.log_level.as_filter_str(), config.environment);

    tracing::info!("Quote Server v{}", quote_server::VERSION);
    tracing::info!(
        host = %config.host,
        port = %config.port,
        log_level = %config.log_level,
        environment = %config.environment,
        primary_url = %config.primary_url,
        expanded_url = %config.expanded_url,
        shared_deadline_secs = %config.shared_deadline_secs,
        "Server configuration loaded"
    );

    // Create and start the server
    let server = Server::new(config)?;
    tracing::info!(address = %server.config().socket_addr(), "Starting server");

    server.run().await?;

    Ok(())
}
