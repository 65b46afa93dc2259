//! Endpoints receiving slider values

pub mod http;
pub mod log;

pub use http::HttpEndpoint;
pub use log::LogEndpoint;

use crate::config::PayloadShape;
use crate::error::SendError;
use async_trait::async_trait;

/// Trait for destinations of slider value updates
#[async_trait]
pub trait Endpoint: Send + Sync {
    /// Deliver one payload. Resolves once, with success or a failure.
    async fn send(&self, payload: &Payload) -> Result<(), SendError>;

    /// Human readable target, used in logs
    fn describe(&self) -> String;
}

/// Ordered form fields posted to an endpoint
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Payload {
    fields: Vec<(String, String)>,
}

impl Payload {
    /// Shape the current value of a control into a payload
    pub fn build(shape: &PayloadShape, control_id: &str, value: &str) -> Self {
        let fields = match shape {
            PayloadShape::KeyValue => vec![(control_id.to_string(), value.to_string())],
            PayloadShape::Form { fields } => {
                let mut pairs: Vec<(String, String)> = fields
                    .iter()
                    .map(|field| {
                        if field.name == control_id {
                            (field.name.clone(), value.to_string())
                        } else {
                            (field.name.clone(), field.value.clone())
                        }
                    })
                    .collect();
                if !fields.iter().any(|field| field.name == control_id) {
                    pairs.push((control_id.to_string(), value.to_string()));
                }
                pairs
            }
        };

        Self { fields }
    }

    pub fn fields(&self) -> &[(String, String)] {
        &self.fields
    }

    /// Value of the first field with the given name
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// `application/x-www-form-urlencoded` body
    pub fn encode(&self) -> String {
        url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.fields.iter())
            .finish()
    }
}

impl std::fmt::Display for Payload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.encode())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FormField;

    #[test]
    fn test_key_value_payload() {
        let payload = Payload::build(&PayloadShape::KeyValue, "slider1", "42");
        assert_eq!(payload.encode(), "slider1=42");
        assert_eq!(payload.get("slider1"), Some("42"));
    }

    #[test]
    fn test_form_payload_replaces_control_field() {
        let shape = PayloadShape::Form {
            fields: vec![
                FormField::new("mode", "live"),
                FormField::new("slider", "50"),
                FormField::new("unit", "%"),
            ],
        };
        let payload = Payload::build(&shape, "slider", "73");
        assert_eq!(payload.encode(), "mode=live&slider=73&unit=%25");
    }

    #[test]
    fn test_form_payload_appends_missing_control_field() {
        let shape = PayloadShape::Form {
            fields: vec![FormField::new("page", "main")],
        };
        let payload = Payload::build(&shape, "slider", "5");
        assert_eq!(payload.encode(), "page=main&slider=5");

        let empty = Payload::build(&PayloadShape::Form { fields: vec![] }, "slider", "5");
        assert_eq!(empty.to_string(), "slider=5");
    }

    #[test]
    fn test_encoding_escapes_reserved_characters() {
        let payload = Payload::build(&PayloadShape::KeyValue, "my slider", "a&b=c");
        assert_eq!(payload.encode(), "my+slider=a%26b%3Dc");
    }
}
