//! Show the resolved configuration

use crate::config::CliConfigLoader;
use anyhow::Result;

/// Load, validate and print the configuration
pub async fn check_command(loader: CliConfigLoader) -> Result<()> {
    let config = loader.load().await?;
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}
