//! Simulated drag of one slider

use super::{build_page, print_report, EndpointOptions};
use crate::config::CliConfigLoader;
use anyhow::{anyhow, Result};
use slider_callback_core::PageEvent;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::info;

/// Drag `slider` step by step to `target`, then release it
pub async fn sweep_command(
    loader: CliConfigLoader,
    options: EndpointOptions,
    slider: String,
    target: f64,
    interval: Duration,
    json: bool,
) -> Result<()> {
    let config = loader.load().await?;
    let page = build_page(&config, options)?;

    let bound = page
        .slider(&slider)
        .ok_or_else(|| anyhow!("Unknown slider: {}", slider))?;
    let path = bound.control.drag_path(target);
    let release = path.end();
    info!(slider = %slider, from = bound.control.get(), to = release, "Starting sweep");

    let (tx, rx) = mpsc::channel(64);
    let producer = tokio::spawn(async move {
        for value in path {
            if tx.send(PageEvent::input(slider.clone(), value)).await.is_err() {
                return;
            }
            if !interval.is_zero() {
                tokio::time::sleep(interval).await;
            }
        }
        let _ = tx.send(PageEvent::change(slider, release)).await;
    });

    let report = page.run(rx).await;
    producer.await?;
    print_report(&report, json)
}
