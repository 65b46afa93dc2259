//! Test doubles shared by unit tests

use crate::endpoint::{Endpoint, Payload};
use crate::error::SendError;
use async_trait::async_trait;
use std::io::Write;
use std::sync::{Arc, Mutex};
use tokio::sync::Semaphore;

/// Endpoint that records payloads and holds each send until released
pub struct GatedEndpoint {
    gate: Semaphore,
    received: Mutex<Vec<Payload>>,
}

impl GatedEndpoint {
    /// Every send blocks until [`GatedEndpoint::release`] is called
    pub fn new() -> Self {
        Self {
            gate: Semaphore::new(0),
            received: Mutex::new(Vec::new()),
        }
    }

    /// Sends complete immediately
    pub fn open() -> Self {
        Self {
            gate: Semaphore::new(Semaphore::MAX_PERMITS),
            received: Mutex::new(Vec::new()),
        }
    }

    /// Let `count` pending or future sends complete
    pub fn release(&self, count: usize) {
        self.gate.add_permits(count);
    }

    pub fn received(&self) -> Vec<Payload> {
        self.received.lock().unwrap().clone()
    }

    pub fn received_values(&self, key: &str) -> Vec<String> {
        self.received()
            .iter()
            .filter_map(|payload| payload.get(key).map(str::to_string))
            .collect()
    }
}

#[async_trait]
impl Endpoint for GatedEndpoint {
    async fn send(&self, payload: &Payload) -> Result<(), SendError> {
        self.received.lock().unwrap().push(payload.clone());
        self.gate.acquire().await.unwrap().forget();
        Ok(())
    }

    fn describe(&self) -> String {
        "gated".to_string()
    }
}

/// Endpoint whose every send fails
pub struct FailingEndpoint;

#[async_trait]
impl Endpoint for FailingEndpoint {
    async fn send(&self, _payload: &Payload) -> Result<(), SendError> {
        Err(SendError::Transport {
            message: "connection refused".to_string(),
        })
    }

    fn describe(&self) -> String {
        "failing".to_string()
    }
}

/// Endpoint that never answers a send carrying `value` under `key`.
/// Other sends succeed, or fail when built with [`HangingEndpoint::failing`].
pub struct HangingEndpoint {
    key: String,
    value: String,
    fail_others: bool,
}

impl HangingEndpoint {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            fail_others: false,
        }
    }

    pub fn failing(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            fail_others: true,
            ..Self::new(key, value)
        }
    }
}

#[async_trait]
impl Endpoint for HangingEndpoint {
    async fn send(&self, payload: &Payload) -> Result<(), SendError> {
        if payload.get(&self.key) == Some(self.value.as_str()) {
            std::future::pending::<()>().await;
        }
        if self.fail_others {
            return Err(SendError::Status { status: 503 });
        }
        Ok(())
    }

    fn describe(&self) -> String {
        "hanging".to_string()
    }
}

/// Endpoint whose every send panics
pub struct PanickingEndpoint;

#[async_trait]
impl Endpoint for PanickingEndpoint {
    async fn send(&self, _payload: &Payload) -> Result<(), SendError> {
        panic!("endpoint exploded");
    }

    fn describe(&self) -> String {
        "panicking".to_string()
    }
}

/// Log output collected by [`capture_logs`]
#[derive(Clone, Default)]
pub struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// Route tracing output on the current thread into a buffer
pub fn capture_logs() -> (CapturedLogs, tracing::subscriber::DefaultGuard) {
    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new("debug"))
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();
    let guard = tracing::subscriber::set_default(subscriber);
    (logs, guard)
}
