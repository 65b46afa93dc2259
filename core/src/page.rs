//! Several sliders bound on one page
//!
//! A page owns one control, display and binder per configured slider and
//! routes host events to them in delivery order.

use crate::binder::{bind, Dispatch, SliderBinder, StatsSnapshot, Trigger};
use crate::config::{PageConfig, SliderConfig};
use crate::control::{Control, RangeControl, TextDisplay};
use crate::endpoint::Endpoint;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// An event delivered by the host to one slider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageEvent {
    pub slider: String,
    pub kind: Trigger,
    pub value: f64,
}

impl PageEvent {
    pub fn input(slider: impl Into<String>, value: f64) -> Self {
        Self {
            slider: slider.into(),
            kind: Trigger::Input,
            value,
        }
    }

    pub fn change(slider: impl Into<String>, value: f64) -> Self {
        Self {
            slider: slider.into(),
            kind: Trigger::Change,
            value,
        }
    }
}

/// One bound slider
pub struct BoundSlider {
    pub control: Arc<RangeControl>,
    pub display: Arc<TextDisplay>,
    pub binder: SliderBinder,
}

/// Final state of one slider after the event loop ends
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SliderReport {
    pub id: String,
    pub value: String,
    pub display: String,
    pub stats: StatsSnapshot,
}

/// Outcome of [`SliderPage::run`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageReport {
    pub events: u64,
    pub rejected: u64,
    pub sliders: Vec<SliderReport>,
}

/// The set of sliders bound on one page
pub struct SliderPage {
    sliders: Vec<BoundSlider>,
}

impl SliderPage {
    /// Bind every configured slider. `endpoint_for` builds the endpoint a
    /// slider posts to from its configuration and resolved URL.
    pub fn new<F>(config: &PageConfig, mut endpoint_for: F) -> Result<Self>
    where
        F: FnMut(&SliderConfig, &str) -> Result<Arc<dyn Endpoint>>,
    {
        config.validate()?;

        let mut sliders = Vec::with_capacity(config.sliders.len());
        for slider in &config.sliders {
            let endpoint = endpoint_for(slider, config.endpoint_for(slider))?;
            let control = Arc::new(RangeControl::from_config(slider)?);
            let display_id = slider.display_id();
            debug!(
                slider = %slider.id,
                display = %display_id,
                target = %endpoint.describe(),
                "Binding slider"
            );
            let display = Arc::new(TextDisplay::new(display_id, control.value()));
            let binder = bind(
                control.clone(),
                display.clone(),
                endpoint,
                slider.payload.clone(),
            );
            sliders.push(BoundSlider {
                control,
                display,
                binder,
            });
        }

        Ok(Self { sliders })
    }

    pub fn slider(&self, id: &str) -> Option<&BoundSlider> {
        self.sliders.iter().find(|s| s.binder.id() == id)
    }

    pub fn sliders(&self) -> &[BoundSlider] {
        &self.sliders
    }

    /// Set the slider's value, then run the matching handler
    pub fn dispatch(&self, event: &PageEvent) -> Result<Dispatch> {
        let slider = self.slider(&event.slider).ok_or_else(|| Error::UnknownSlider {
            id: event.slider.clone(),
        })?;

        slider.control.set(event.value);
        Ok(match event.kind {
            Trigger::Input => slider.binder.on_input(),
            Trigger::Change => slider.binder.on_change(),
        })
    }

    /// Dispatch events in order until the sender side closes, then wait for
    /// outstanding sends and report.
    pub async fn run(&self, events: mpsc::Receiver<PageEvent>) -> PageReport {
        self.run_with(events, |_, _| {}).await
    }

    /// Like [`SliderPage::run`], calling `observe` after each dispatched event
    pub async fn run_with<F>(
        &self,
        mut events: mpsc::Receiver<PageEvent>,
        mut observe: F,
    ) -> PageReport
    where
        F: FnMut(&PageEvent, &Dispatch),
    {
        let mut pending: Vec<JoinHandle<()>> = Vec::new();
        let mut report = PageReport::default();

        while let Some(event) = events.recv().await {
            report.events += 1;
            match self.dispatch(&event) {
                Ok(dispatch) => {
                    observe(&event, &dispatch);
                    if let Dispatch::Sent { handle, .. } = dispatch {
                        pending.push(handle);
                    }
                }
                Err(e) => {
                    report.rejected += 1;
                    warn!(error = %e, "Ignoring event");
                }
            }
            pending.retain(|handle| !handle.is_finished());
        }

        if !pending.is_empty() {
            debug!(count = pending.len(), "Waiting for outstanding sends");
        }
        futures::future::join_all(pending).await;

        report.sliders = self.report();
        info!(events = report.events, "Event loop finished");
        report
    }

    /// Current state of every slider
    pub fn report(&self) -> Vec<SliderReport> {
        self.sliders
            .iter()
            .map(|s| SliderReport {
                id: s.binder.id().to_string(),
                value: s.control.value(),
                display: s.display.text(),
                stats: s.binder.stats(),
            })
            .collect()
    }
}
