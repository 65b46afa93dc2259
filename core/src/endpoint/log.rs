//! Dry-run endpoint that only logs what would be sent

use super::{Endpoint, Payload};
use crate::error::SendError;
use async_trait::async_trait;
use std::time::Duration;
use tracing::info;

/// Endpoint that logs each payload after an optional simulated latency
#[derive(Debug, Clone)]
pub struct LogEndpoint {
    target: String,
    latency: Duration,
}

impl LogEndpoint {
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            latency: Duration::ZERO,
        }
    }

    /// Delay every send by `latency`
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }
}

#[async_trait]
impl Endpoint for LogEndpoint {
    async fn send(&self, payload: &Payload) -> Result<(), SendError> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        info!(target_url = %self.target, body = %payload, "Dry run: would POST slider value");
        Ok(())
    }

    fn describe(&self) -> String {
        format!("dry-run {}", self.target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PayloadShape;

    #[tokio::test(start_paused = true)]
    async fn test_latency_is_simulated() {
        let endpoint = LogEndpoint::new("http://localhost/change")
            .with_latency(Duration::from_millis(250));
        let payload = Payload::build(&PayloadShape::KeyValue, "slider", "3");

        let started = tokio::time::Instant::now();
        endpoint.send(&payload).await.unwrap();
        assert!(started.elapsed() >= Duration::from_millis(250));
        assert_eq!(endpoint.describe(), "dry-run http://localhost/change");
    }
}
