//! HTTP endpoint posting form-encoded values

use super::{Endpoint, Payload};
use crate::error::{Result, SendError};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::Client;
use std::collections::HashMap;
use tracing::debug;

/// User agent sent with every request
pub const USER_AGENT: &str = concat!("slider-callback/", env!("CARGO_PKG_VERSION"));

/// Endpoint that POSTs each payload to a URL.
///
/// Any success status counts as delivered; the response body is ignored.
#[derive(Debug, Clone)]
pub struct HttpEndpoint {
    client: Client,
    url: String,
}

impl HttpEndpoint {
    /// Create a new HTTP endpoint
    pub fn new(url: impl Into<String>) -> Result<Self> {
        Self::with_headers(url, &HashMap::new())
    }

    /// Create a new HTTP endpoint sending extra headers on every request
    pub fn with_headers(url: impl Into<String>, headers: &HashMap<String, String>) -> Result<Self> {
        let mut default_headers = HeaderMap::new();
        for (name, value) in headers {
            let name = HeaderName::from_bytes(name.as_bytes()).map_err(|_| {
                crate::error::ConfigError::InvalidValue {
                    field: "headers".to_string(),
                    value: name.clone(),
                }
            })?;
            let value = HeaderValue::from_str(value).map_err(|_| {
                crate::error::ConfigError::InvalidValue {
                    field: format!("headers.{}", name),
                    value: value.clone(),
                }
            })?;
            default_headers.insert(name, value);
        }

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(default_headers)
            .build()?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl Endpoint for HttpEndpoint {
    async fn send(&self, payload: &Payload) -> std::result::Result<(), SendError> {
        let response = self
            .client
            .post(&self.url)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(payload.encode())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SendError::Status {
                status: status.as_u16(),
            });
        }

        debug!(url = %self.url, status = status.as_u16(), "Slider value delivered");
        Ok(())
    }

    fn describe(&self) -> String {
        format!("POST {}", self.url)
    }
}
