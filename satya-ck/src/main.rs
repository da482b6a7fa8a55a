//! satya-ck (Content Check) - Main entry point
//!
//! Serves the credibility heuristic engine over HTTP. Configuration
//! precedence: command line > environment > TOML file > defaults.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use satya_common::config::TomlConfig;
use satya_common::identity::build_identity_provider;
use satya_common::orchestrator::Orchestrator;
use satya_ck::{bind_listener, build_router, AppState, MODULE_NAME};
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Command-line arguments for satya-ck
#[derive(Parser, Debug)]
#[command(name = "satya-ck")]
#[command(about = "Content credibility check service")]
#[command(version)]
struct Args {
    /// Path to satya-ck.toml
    #[arg(short, long, env = "SATYA_CONFIG")]
    config: Option<PathBuf>,

    /// Port to listen on (overrides SATYA_CK_PORT and the config file)
    #[arg(short, long)]
    port: Option<u16>,

    /// Address to bind
    #[arg(short, long)]
    bind: Option<String>,

    /// Root folder holding satya.db
    #[arg(short, long)]
    root_folder: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Logged once the subscriber is up
    let (mut config, load_report) = TomlConfig::load_with_report(args.config.as_deref())
        .context("Failed to load configuration")?;
    if let Some(port) = args.port {
        config.port = port;
    }
    if let Some(bind) = args.bind {
        config.bind = bind;
    }
    if let Some(root) = args.root_folder {
        config.root_folder = Some(root);
    }

    // RUST_LOG wins over [logging] level
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "satya_ck={level},satya_common={level},tower_http={level}",
                    level = config.logging.level
                )
                .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting Satya Content Check ({}) v{}",
        MODULE_NAME,
        env!("CARGO_PKG_VERSION")
    );
    load_report.log();
    info!("Root folder: {}", config.root_folder().display());

    let identity = build_identity_provider(&config)
        .await
        .context("Failed to initialize identity provider")?;
    info!("✓ Identity provider ready ({})", identity.kind());

    let latency = Duration::from_millis(config.analysis.simulated_latency_ms);
    if !latency.is_zero() {
        warn!("Simulated analysis latency enabled: {:?}", latency);
    }
    let orchestrator = Orchestrator::new(identity).with_simulated_latency(latency);

    let app = build_router(AppState::new(orchestrator));

    let (listener, addr) = bind_listener(&config.bind, config.port)
        .await
        .with_context(|| format!("Failed to bind to {}:{}", config.bind, config.port))?;

    info!("satya-ck listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
