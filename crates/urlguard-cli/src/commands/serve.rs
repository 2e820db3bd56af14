//! `urlguard serve` -- run the HTTP service.

use clap::Args;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use urlguard_core::bootstrap::build_classifier;
use urlguard_services::api::{self, ApiState};

/// Arguments for the `serve` subcommand.
#[derive(Args)]
pub struct ServeArgs {
    /// Config file path (overrides auto-discovery).
    #[arg(short, long)]
    pub config: Option<String>,

    /// Bind host (overrides config).
    #[arg(long)]
    pub host: Option<String>,

    /// Bind port (overrides config and URLGUARD_PORT).
    #[arg(short, long)]
    pub port: Option<u16>,
}

/// Build the classifier and serve until Ctrl+C.
pub async fn run(args: ServeArgs) -> anyhow::Result<()> {
    let mut config = super::load_config(args.config.as_deref())?;
    if let Some(host) = args.host {
        config.gateway.host = host;
    }
    if let Some(port) = args.port {
        config.gateway.port = port;
    }

    let classifier = build_classifier(&config).await?;

    let shutdown = CancellationToken::new();
    let token = shutdown.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("received Ctrl+C, shutting down");
                token.cancel();
            }
            Err(e) => warn!(error = %e, "failed to listen for Ctrl+C"),
        }
    });

    api::serve(ApiState::new(classifier), &config.gateway, shutdown)
        .await
        .map_err(|e| {
            anyhow::anyhow!(
                "server on {}:{} failed: {e}",
                config.gateway.host,
                config.gateway.port
            )
        })?;
    info!("server stopped");
    Ok(())
}
