//! `urlguard config` -- inspect the resolved configuration.

use urlguard_types::config::Config;

/// Print the full resolved configuration as pretty JSON.
pub fn config_show(config: &Config) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(config)?);
    Ok(())
}
