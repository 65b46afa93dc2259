//! Configuration types for slider-callback core
//!
//! Core only accepts fully resolved, validated configuration.
//! All discovery, loading, and merging happens in CLI layer.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// One named field of a serialized form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormField {
    pub name: String,
    #[serde(default)]
    pub value: String,
}

impl FormField {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// How the value of a control is shaped into a request body
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PayloadShape {
    /// A single `<control id>=<value>` pair
    #[default]
    KeyValue,
    /// A whole form; the field named after the control carries its value
    Form {
        #[serde(default)]
        fields: Vec<FormField>,
    },
}

/// Configuration of a single slider on the page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SliderConfig {
    /// Control identifier, also the payload key
    pub id: String,
    /// Identifier of the element mirroring the value
    #[serde(default)]
    pub display: Option<String>,
    #[serde(default = "default_min")]
    pub min: f64,
    #[serde(default = "default_max")]
    pub max: f64,
    #[serde(default = "default_step")]
    pub step: f64,
    /// Starting value; the snapped midpoint of the range when absent
    #[serde(default)]
    pub initial: Option<f64>,
    #[serde(default)]
    pub payload: PayloadShape,
    /// Per-slider endpoint overriding the page endpoint
    #[serde(default)]
    pub endpoint: Option<String>,
}

fn default_min() -> f64 {
    0.0
}

fn default_max() -> f64 {
    100.0
}

fn default_step() -> f64 {
    1.0
}

impl SliderConfig {
    /// Create a slider with the default 0..=100 range
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display: None,
            min: default_min(),
            max: default_max(),
            step: default_step(),
            initial: None,
            payload: PayloadShape::default(),
            endpoint: None,
        }
    }

    /// Set the range bounds and step
    pub fn with_range(mut self, min: f64, max: f64, step: f64) -> Self {
        self.min = min;
        self.max = max;
        self.step = step;
        self
    }

    /// Set the initial value
    pub fn with_initial(mut self, initial: f64) -> Self {
        self.initial = Some(initial);
        self
    }

    /// Set the payload shape
    pub fn with_payload(mut self, payload: PayloadShape) -> Self {
        self.payload = payload;
        self
    }

    /// Identifier of the display element, `<id>Amount` unless configured
    pub fn display_id(&self) -> String {
        self.display
            .clone()
            .unwrap_or_else(|| format!("{}Amount", self.id))
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.id.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "sliders[].id".to_string(),
            });
        }

        validate_range(&self.id, self.min, self.max, self.step)?;

        if let Some(initial) = self.initial {
            if !(self.min..=self.max).contains(&initial) {
                return Err(invalid(
                    &format!("sliders.{}.initial", self.id),
                    initial.to_string(),
                ));
            }
        }

        if let Some(endpoint) = &self.endpoint {
            validate_url(&format!("sliders.{}.endpoint", self.id), endpoint)?;
        }

        Ok(())
    }
}

/// A fully resolved page configuration ready for use by core
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageConfig {
    /// URL receiving value updates
    pub endpoint: String,
    /// Sliders bound on this page
    pub sliders: Vec<SliderConfig>,
    /// Additional headers for requests
    #[serde(default)]
    pub headers: HashMap<String, String>,
}

impl PageConfig {
    /// Create a new page config
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            sliders: Vec::new(),
            headers: HashMap::new(),
        }
    }

    /// Add a slider
    pub fn with_slider(mut self, slider: SliderConfig) -> Self {
        self.sliders.push(slider);
        self
    }

    /// Add a header
    pub fn with_header(mut self, key: String, value: String) -> Self {
        self.headers.insert(key, value);
        self
    }

    /// Endpoint a given slider posts to
    pub fn endpoint_for<'a>(&'a self, slider: &'a SliderConfig) -> &'a str {
        slider.endpoint.as_deref().unwrap_or(&self.endpoint)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_url("endpoint", &self.endpoint)?;

        if self.sliders.is_empty() {
            return Err(ConfigError::NoSliders);
        }

        let mut seen = HashSet::new();
        for slider in &self.sliders {
            slider.validate()?;
            if !seen.insert(slider.id.as_str()) {
                return Err(ConfigError::DuplicateSlider {
                    id: slider.id.clone(),
                });
            }
        }

        Ok(())
    }
}

/// Check that `min` and `max` are finite with `min < max`, and `step` is positive
pub(crate) fn validate_range(id: &str, min: f64, max: f64, step: f64) -> Result<(), ConfigError> {
    if !min.is_finite() || !max.is_finite() || min >= max {
        return Err(invalid(
            &format!("sliders.{}.max", id),
            format!("{} (min is {})", max, min),
        ));
    }

    if !step.is_finite() || step <= 0.0 {
        return Err(invalid(&format!("sliders.{}.step", id), step.to_string()));
    }

    Ok(())
}

fn validate_url(field: &str, value: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::MissingField {
            field: field.to_string(),
        });
    }

    match url::Url::parse(value) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(()),
        _ => Err(invalid(field, value.to_string())),
    }
}

fn invalid(field: &str, value: String) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        value,
    }
}
