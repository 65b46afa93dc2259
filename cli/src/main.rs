//! # slider-callback CLI
//!
//! Command-line host for slider-callback: binds the configured sliders to
//! their endpoint and feeds them events.
//!
//! ## Usage
//!
//! - `slider-callback` - Read `input|change <slider> <value>` events from stdin
//! - `slider-callback sweep slider1 --to 80` - Simulate dragging a slider
//! - `slider-callback check` - Print the resolved configuration

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

mod commands;
mod config;

use commands::{check_command, drive_command, sweep_command, EndpointOptions};
use config::CliConfigLoader;

/// slider-callback - Bind range sliders to a server endpoint
#[derive(Parser)]
#[command(name = "slider-callback")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Send live slider values to a server endpoint")]
#[command(long_about = None)]
struct Cli {
    /// Configuration file or directory path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Endpoint URL override
    #[arg(long)]
    endpoint: Option<String>,

    /// Log payloads instead of posting them
    #[arg(long)]
    dry_run: bool,

    /// Simulated latency of dry-run sends in milliseconds
    #[arg(long, default_value_t = 0)]
    latency_ms: u64,

    /// Print the final report as JSON
    #[arg(long)]
    json: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Read slider events from stdin (default)
    Drive,

    /// Drag a slider step by step to a value, then release it
    Sweep {
        /// Slider id
        slider: String,

        /// Value to drag to
        #[arg(long, allow_negative_numbers = true)]
        to: f64,

        /// Delay between input events in milliseconds
        #[arg(long, default_value_t = 20)]
        interval_ms: u64,
    },

    /// Show the resolved configuration
    Check,
}

/// Build a configuration loader from CLI arguments
fn build_config_loader(cli: &Cli) -> CliConfigLoader {
    let mut loader = CliConfigLoader::new();

    if let Some(config_path) = &cli.config {
        let expanded = shellexpand::tilde(&config_path.to_string_lossy()).into_owned();
        loader = loader.with_config_override(PathBuf::from(expanded));
    }

    if let Some(endpoint) = &cli.endpoint {
        loader = loader.with_endpoint_override(endpoint.clone());
    }

    loader
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    slider_callback_core::init_tracing_with_debug(cli.verbose);

    let loader = build_config_loader(&cli);
    let options = EndpointOptions {
        dry_run: cli.dry_run,
        latency: Duration::from_millis(cli.latency_ms),
    };

    match cli.command.unwrap_or(Commands::Drive) {
        Commands::Drive => drive_command(loader, options, cli.json).await,
        Commands::Sweep {
            slider,
            to,
            interval_ms,
        } => {
            sweep_command(
                loader,
                options,
                slider,
                to,
                Duration::from_millis(interval_ms),
                cli.json,
            )
            .await
        }
        Commands::Check => check_command(loader).await,
    }
}
