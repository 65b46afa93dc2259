//! Live slider binder
//!
//! Wires one control to its display and to an endpoint:
//!
//! - an **input** event mirrors the value into the display and sends it,
//!   unless a send started by an earlier input event is still in flight
//! - a **change** event always sends the committed value
//!
//! Sends run as spawned tasks; handlers never wait for them. Failures are
//! logged and never reach the caller. Whatever the outcome, the busy flag
//! is cleared when a send completes.

mod busy;
mod stats;

pub use busy::BusyFlag;
use busy::ClearOnDrop;
pub use stats::{BinderStats, StatsSnapshot};

use crate::config::PayloadShape;
use crate::control::{Control, Display};
use crate::endpoint::{Endpoint, Payload};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, error};

/// Event that triggered a send
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trigger {
    /// Interactive change, e.g. while dragging
    Input,
    /// Committed final value, e.g. on release
    Change,
}

impl std::fmt::Display for Trigger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Trigger::Input => f.write_str("input"),
            Trigger::Change => f.write_str("change"),
        }
    }
}

/// What a handler did with an event
#[derive(Debug)]
pub enum Dispatch {
    /// A send was started; the handle resolves when it completes
    Sent {
        payload: Payload,
        handle: JoinHandle<()>,
    },
    /// The busy flag was set, nothing was sent
    Suppressed,
}

impl Dispatch {
    pub fn is_sent(&self) -> bool {
        matches!(self, Dispatch::Sent { .. })
    }

    /// Wait for the send, if any, to finish
    pub async fn completed(self) {
        if let Dispatch::Sent { handle, .. } = self {
            // A panicking endpoint has already been logged by the runtime.
            let _ = handle.await;
        }
    }
}

/// Handlers for one bound control
pub struct SliderBinder {
    control: Arc<dyn Control>,
    display: Arc<dyn Display>,
    endpoint: Arc<dyn Endpoint>,
    payload: PayloadShape,
    busy: BusyFlag,
    stats: Arc<BinderStats>,
}

/// Bind a control to its display and endpoint
pub fn bind(
    control: Arc<dyn Control>,
    display: Arc<dyn Display>,
    endpoint: Arc<dyn Endpoint>,
    payload: PayloadShape,
) -> SliderBinder {
    SliderBinder {
        control,
        display,
        endpoint,
        payload,
        busy: BusyFlag::new(),
        stats: Arc::new(BinderStats::default()),
    }
}

impl SliderBinder {
    /// Identifier of the bound control
    pub fn id(&self) -> &str {
        self.control.id()
    }

    pub fn is_busy(&self) -> bool {
        self.busy.is_set()
    }

    pub fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }

    /// Handle an input event. Must be called from within a tokio runtime.
    pub fn on_input(&self) -> Dispatch {
        self.stats.record_input();
        let value = self.control.value();
        self.display.show(&value);

        if !self.busy.try_acquire() {
            self.stats.record_suppressed();
            debug!(slider = %self.id(), value = %value, "Send in flight, input suppressed");
            return Dispatch::Suppressed;
        }

        self.spawn_send(value, Trigger::Input)
    }

    /// Handle a change event. Must be called from within a tokio runtime.
    pub fn on_change(&self) -> Dispatch {
        self.stats.record_change();
        let value = self.control.value();
        self.spawn_send(value, Trigger::Change)
    }

    fn spawn_send(&self, value: String, trigger: Trigger) -> Dispatch {
        let payload = Payload::build(&self.payload, self.id(), &value);
        self.stats.record_send();
        debug!(
            slider = %self.id(),
            trigger = %trigger,
            target = %self.endpoint.describe(),
            "Sending slider value {}",
            value
        );

        let endpoint = Arc::clone(&self.endpoint);
        let mut completion = Completion {
            _clear: self.busy.clear_on_drop(),
            stats: Arc::clone(&self.stats),
            slider: self.id().to_string(),
            trigger,
            settled: false,
        };
        let body = payload.clone();

        let handle = tokio::spawn(async move {
            match endpoint.send(&body).await {
                Ok(()) => completion.stats.record_success(),
                Err(e) => {
                    completion.stats.record_failure();
                    error!(
                        slider = %completion.slider,
                        trigger = %trigger,
                        error = %e,
                        "Failed to send slider value"
                    );
                }
            }
            completion.settled = true;
        });

        Dispatch::Sent { payload, handle }
    }
}

/// Owned by a send task. Clears the busy flag when dropped, and counts the
/// send as failed if the task unwound before it settled.
struct Completion {
    _clear: ClearOnDrop,
    stats: Arc<BinderStats>,
    slider: String,
    trigger: Trigger,
    settled: bool,
}

impl Drop for Completion {
    fn drop(&mut self) {
        if !self.settled {
            self.stats.record_failure();
            error!(
                slider = %self.slider,
                trigger = %self.trigger,
                "Send task aborted before completing"
            );
        }
    }
}

impl std::fmt::Debug for SliderBinder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SliderBinder")
            .field("id", &self.id())
            .field("endpoint", &self.endpoint.describe())
            .field("payload", &self.payload)
            .field("busy", &self.busy.is_set())
            .finish()
    }
}
