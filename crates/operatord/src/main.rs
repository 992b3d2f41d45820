//! Operator daemon: runs a single operator's DKG ceremony endpoint.
//!
//! Loads its RSA signing key and deployment config, starts the `dkg-api`
//! HTTP server, and periodically sweeps idle ceremony instances.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use dkg_api::{ApiRateLimits, AppState, RateLimitConfig};
use dkg_switch::{Switch, SwitchLimits};
use dkg_types::OperatorId;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod config;

use config::OperatorConfig;

#[derive(Parser)]
#[command(name = "dkg-operatord")]
#[command(author, version, about = "DKG ceremony operator daemon", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the operator's ceremony endpoint (/init, /dkg, /health)
    Operator,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Operator => run_operator().await,
    }
}

async fn run_operator() -> Result<()> {
    let config = OperatorConfig::load().context("failed to load operator config")?;

    let key_pem = std::fs::read_to_string(&config.rsa_key_path)
        .with_context(|| format!("failed to read RSA key at {}", config.rsa_key_path))?;
    let rsa_private_key = dkg_crypto::rsa_auth::load_private_key_pem(&key_pem)
        .context("failed to parse RSA private key")?;

    let limits = SwitchLimits {
        max_instances: config.max_instances,
        idle_timeout: config.idle_timeout(),
        store_share: config.store_share,
    };
    let switch = Arc::new(Switch::with_limits(
        OperatorId::new(config.operator_id),
        rsa_private_key,
        limits,
    ));

    let rate_limits = ApiRateLimits {
        init: RateLimitConfig::with_limit(config.init_rate_limit_per_min),
        dkg: RateLimitConfig::with_limit(config.dkg_rate_limit_per_min),
    };
    let state = AppState::new(Arc::clone(&switch));
    let addr = config
        .listen_addr
        .parse()
        .with_context(|| format!("invalid listen_addr {}", config.listen_addr))?;

    info!(operator_id = config.operator_id, %addr, "starting dkg-operatord");

    let sweep_switch = Arc::clone(&switch);
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(Duration::from_secs(30));
        loop {
            ticker.tick().await;
            sweep_switch.clean_instances().await;
            let snapshot = sweep_switch.metrics_snapshot();
            info!(?snapshot, "ceremony metrics");
        }
    });

    if let Err(e) = dkg_api::start_server(state, addr, rate_limits).await {
        warn!(error = %e, "dkg-api server exited");
        return Err(e);
    }
    Ok(())
}
