//! CLI command implementations

pub mod check;
pub mod drive;
pub mod sweep;

pub use check::check_command;
pub use drive::drive_command;
pub use sweep::sweep_command;

use anyhow::Result;
use slider_callback_core::{
    Endpoint, HttpEndpoint, LogEndpoint, PageConfig, PageReport, SliderPage,
};
use std::sync::Arc;
use std::time::Duration;

/// How sliders reach their endpoints
#[derive(Debug, Clone, Copy, Default)]
pub struct EndpointOptions {
    /// Log payloads instead of posting them
    pub dry_run: bool,
    /// Simulated latency of dry-run sends
    pub latency: Duration,
}

/// Bind every configured slider to its endpoint
pub fn build_page(config: &PageConfig, options: EndpointOptions) -> Result<SliderPage> {
    let page = SliderPage::new(config, |_, url| {
        let endpoint: Arc<dyn Endpoint> = if options.dry_run {
            Arc::new(LogEndpoint::new(url).with_latency(options.latency))
        } else {
            Arc::new(HttpEndpoint::with_headers(url, &config.headers)?)
        };
        Ok(endpoint)
    })?;
    Ok(page)
}

/// Print the final state of a page
pub fn print_report(report: &PageReport, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }

    println!(
        "events: {} processed, {} rejected",
        report.events, report.rejected
    );
    for slider in &report.sliders {
        let stats = &slider.stats;
        println!(
            "{}: value={} display={} sends={} suppressed={} ok={} failed={}",
            slider.id,
            slider.value,
            slider.display,
            stats.sends,
            stats.suppressed,
            stats.succeeded,
            stats.failed
        );
    }
    Ok(())
}
