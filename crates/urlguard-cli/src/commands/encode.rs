//! `urlguard encode` -- show what the model would see for a URL.

use clap::Args;

use urlguard_core::bootstrap::load_encoder;
use urlguard_core::encoder::Encoder;

/// Arguments for the `encode` subcommand.
#[derive(Args)]
pub struct EncodeArgs {
    /// URL to encode.
    pub url: String,

    /// Config file path (overrides auto-discovery).
    #[arg(short, long)]
    pub config: Option<String>,
}

pub fn run(args: EncodeArgs) -> anyhow::Result<()> {
    let config = super::load_config(args.config.as_deref())?;
    let encoder = load_encoder(&config.encoder)?;
    let summary = summarize(&encoder, &args.url);
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

fn summarize(encoder: &Encoder, url: &str) -> serde_json::Value {
    serde_json::json!({
        "sequence": encoder.encode(url),
        "max_len": encoder.max_len(),
        "used": encoder.used_len(url),
        "truncated": encoder.truncates(url),
        "unknown": encoder.unknown_count(url),
    })
}
