//! `urlguard history` -- list recent predictions from the log.

use clap::Args;
use comfy_table::{Table, presets::UTF8_FULL};

use urlguard_core::bootstrap::open_store;
use urlguard_types::PredictionRecord;

/// Arguments for the `history` subcommand.
#[derive(Args)]
pub struct HistoryArgs {
    /// Number of records to show.
    #[arg(short = 'n', long, default_value_t = 20)]
    pub limit: usize,

    /// Config file path (overrides auto-discovery).
    #[arg(short, long)]
    pub config: Option<String>,
}

pub async fn run(args: HistoryArgs) -> anyhow::Result<()> {
    let config = super::load_config(args.config.as_deref())?;
    let store = open_store(&config.storage)?;
    let records = store.recent(args.limit).await?;

    if records.is_empty() {
        println!("No predictions logged.");
        return Ok(());
    }

    let total = store.count().await?;
    println!("{}", render_table(&records));
    println!("{} of {total} shown ({} store)", records.len(), store.name());
    Ok(())
}

fn render_table(records: &[PredictionRecord]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["TIMESTAMP", "PREDICTION", "CONFIDENCE", "URL"]);

    for record in records {
        table.add_row(vec![
            record.timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
            record.label.to_string(),
            format!("{:.4}", record.confidence),
            record.url.clone(),
        ]);
    }
    table
}
