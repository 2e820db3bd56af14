//! `urlguard` -- CLI binary for the urlguard URL classifier.
//!
//! Provides the following subcommands:
//!
//! - `urlguard serve` -- Run the HTTP service (form page + `/predict`).
//! - `urlguard predict` -- Classify a single URL and record the result.
//! - `urlguard encode` -- Show the encoded sequence for a URL.
//! - `urlguard history` -- List recent predictions from the log.
//! - `urlguard config` -- Show the resolved configuration.

use clap::{Parser, Subcommand};

mod commands;

/// urlguard malicious URL classifier.
#[derive(Parser)]
#[command(name = "urlguard", about = "urlguard malicious URL classifier", version)]
struct Cli {
    /// Enable verbose (debug-level) logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP service.
    Serve(commands::serve::ServeArgs),

    /// Classify a single URL.
    Predict(commands::predict::PredictArgs),

    /// Print the encoded sequence for a URL.
    Encode(commands::encode::EncodeArgs),

    /// List recent predictions.
    History(commands::history::HistoryArgs),

    /// Show resolved configuration.
    Config {
        #[command(subcommand)]
        action: ConfigCmd,
    },
}

/// Subcommands for `urlguard config`.
#[derive(Subcommand)]
enum ConfigCmd {
    /// Show the full resolved configuration.
    Show {
        /// Config file path (overrides auto-discovery).
        #[arg(short, long)]
        config: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Serve(args) => commands::serve::run(args).await?,
        Commands::Predict(args) => commands::predict::run(args).await?,
        Commands::Encode(args) => commands::encode::run(args)?,
        Commands::History(args) => commands::history::run(args).await?,
        Commands::Config { action } => match action {
            ConfigCmd::Show { config } => {
                let cfg = commands::load_config(config.as_deref())?;
                commands::config_cmd::config_show(&cfg)?;
            }
        },
    }

    Ok(())
}
