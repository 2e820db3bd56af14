//! `urlguard predict` -- classify one URL from the command line.
//!
//! Runs the same pipeline as `POST /predict`, including the log write.

use clap::Args;

use urlguard_core::bootstrap::build_classifier;
use urlguard_services::api::handlers::PredictResponse;
use urlguard_types::PredictionRecord;

/// Arguments for the `predict` subcommand.
#[derive(Args)]
pub struct PredictArgs {
    /// URL to classify.
    pub url: String,

    /// Config file path (overrides auto-discovery).
    #[arg(short, long)]
    pub config: Option<String>,

    /// Print the result as JSON (same shape as the HTTP response).
    #[arg(long)]
    pub json: bool,
}

pub async fn run(args: PredictArgs) -> anyhow::Result<()> {
    let config = super::load_config(args.config.as_deref())?;
    let classifier = build_classifier(&config).await?;
    let record = classifier.classify(&args.url).await?;

    if args.json {
        let body = serde_json::to_string_pretty(&PredictResponse::from(record))?;
        println!("{body}");
    } else {
        println!("{}", format_record(&record));
    }
    Ok(())
}

fn format_record(record: &PredictionRecord) -> String {
    format!("{}  {:.4}  {}", record.label, record.confidence, record.url)
}
