//! Drive sliders from events read on stdin

use super::{build_page, print_report, EndpointOptions};
use crate::config::CliConfigLoader;
use anyhow::{anyhow, Context, Result};
use slider_callback_core::{PageEvent, Trigger};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::warn;

/// Parse one line of the event script.
///
/// Accepts `input <slider> <value>` and `change <slider> <value>`. Blank
/// lines and `#` comments yield `None`.
pub fn parse_event(line: &str) -> Result<Option<PageEvent>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let parts: Vec<&str> = line.split_whitespace().collect();
    let [kind, slider, value] = parts.as_slice() else {
        return Err(anyhow!(
            "Expected '<input|change> <slider> <value>', got '{}'",
            line
        ));
    };
    let value: f64 = value
        .parse()
        .with_context(|| format!("Invalid value '{}'", value))?;

    match kind.to_ascii_lowercase().as_str() {
        "input" => Ok(Some(PageEvent::input(*slider, value))),
        "change" => Ok(Some(PageEvent::change(*slider, value))),
        other => Err(anyhow!("Unknown event kind '{}'", other)),
    }
}

/// Read events from stdin until EOF and dispatch them in order
pub async fn drive_command(
    loader: CliConfigLoader,
    options: EndpointOptions,
    json: bool,
) -> Result<()> {
    let config = loader.load().await?;
    let page = build_page(&config, options)?;

    let (tx, rx) = mpsc::channel(64);
    let reader = tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        let mut line_no = 0usize;
        while let Some(line) = lines.next_line().await? {
            line_no += 1;
            match parse_event(&line) {
                Ok(Some(event)) => {
                    if tx.send(event).await.is_err() {
                        break;
                    }
                }
                Ok(None) => {}
                Err(e) => warn!(line = line_no, "Skipping line: {:#}", e),
            }
        }
        Ok::<_, std::io::Error>(())
    });

    let report = page
        .run_with(rx, |event, _| {
            if json || event.kind != Trigger::Input {
                return;
            }
            if let Some(slider) = page.slider(&event.slider) {
                println!("{}: {}", event.slider, slider.display.text());
            }
        })
        .await;

    reader.await?.context("Failed to read events from stdin")?;
    print_report(&report, json)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_events() {
        let event = parse_event("input slider1 42").unwrap().unwrap();
        assert_eq!(event, PageEvent::input("slider1", 42.0));

        let event = parse_event("  CHANGE led 0.5 ").unwrap().unwrap();
        assert_eq!(event.kind, Trigger::Change);
        assert_eq!(event.value, 0.5);
    }

    #[test]
    fn test_parse_skips_blank_and_comments() {
        assert!(parse_event("").unwrap().is_none());
        assert!(parse_event("   ").unwrap().is_none());
        assert!(parse_event("# drag slider1").unwrap().is_none());
    }

    #[test]
    fn test_parse_rejects_malformed_lines() {
        assert!(parse_event("input slider1").is_err());
        assert!(parse_event("input slider1 fast").is_err());
        assert!(parse_event("release slider1 3").is_err());
    }
}
