//! Range input control

use super::Control;
use crate::config::types::validate_range;
use crate::config::SliderConfig;
use crate::error::ConfigError;
use std::sync::Mutex;

/// Validated bounds and step of a range input
#[derive(Debug, Clone, Copy, PartialEq)]
struct RangeSpec {
    min: f64,
    max: f64,
    step: f64,
    decimals: usize,
}

impl RangeSpec {
    /// Clamp into the range and snap to the nearest `min + k * step`
    /// that does not exceed `max`
    fn normalize(&self, value: f64) -> f64 {
        if value.is_nan() {
            return self.min;
        }
        let clamped = value.clamp(self.min, self.max);
        let steps = ((clamped - self.min) / self.step).round();
        let snapped = self.round(self.min + steps * self.step);
        if snapped > self.max {
            self.round(snapped - self.step)
        } else {
            snapped
        }
    }

    fn round(&self, value: f64) -> f64 {
        let factor = 10f64.powi(self.decimals as i32);
        (value * factor).round() / factor
    }

    fn render(&self, value: f64) -> String {
        format!("{}", self.round(value))
    }
}

/// In-process range input with `min`, `max` and `step` semantics.
///
/// Assigned values are clamped into the range and snapped to the nearest
/// `min + k * step` that does not exceed `max`.
#[derive(Debug)]
pub struct RangeControl {
    id: String,
    range: RangeSpec,
    value: Mutex<f64>,
}

impl RangeControl {
    /// Create a control starting at the snapped midpoint of the range.
    ///
    /// Fails unless `min < max` are finite and `step` is finite and positive.
    pub fn new(id: impl Into<String>, min: f64, max: f64, step: f64) -> Result<Self, ConfigError> {
        let id = id.into();
        validate_range(&id, min, max, step)?;

        let control = Self {
            id,
            range: RangeSpec {
                min,
                max,
                step,
                decimals: decimals_of(step),
            },
            value: Mutex::new(min),
        };
        control.set(min + (max - min) / 2.0);
        Ok(control)
    }

    /// Build a control from slider configuration
    pub fn from_config(config: &SliderConfig) -> Result<Self, ConfigError> {
        let control = Self::new(config.id.clone(), config.min, config.max, config.step)?;
        if let Some(initial) = config.initial {
            control.set(initial);
        }
        Ok(control)
    }

    pub fn min(&self) -> f64 {
        self.range.min
    }

    pub fn max(&self) -> f64 {
        self.range.max
    }

    pub fn step(&self) -> f64 {
        self.range.step
    }

    /// Current numeric value
    pub fn get(&self) -> f64 {
        *self.value.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Assign a value and return it rendered after normalization
    pub fn set(&self, value: f64) -> String {
        let normalized = self.range.normalize(value);
        *self.value.lock().unwrap_or_else(|e| e.into_inner()) = normalized;
        self.range.render(normalized)
    }

    /// Values visited when dragging from the current value to `target`,
    /// one step at a time, ending at the normalized target. Values are
    /// produced lazily.
    pub fn drag_path(&self, target: f64) -> DragPath {
        let start = self.get();
        let end = self.range.normalize(target);
        DragPath {
            range: self.range,
            start,
            end,
            direction: if end >= start { 1.0 } else { -1.0 },
            k: 1.0,
            done: false,
        }
    }
}

impl Control for RangeControl {
    fn id(&self) -> &str {
        &self.id
    }

    fn value(&self) -> String {
        self.range.render(self.get())
    }
}

/// Iterator over the values of a simulated drag
#[derive(Debug, Clone)]
pub struct DragPath {
    range: RangeSpec,
    start: f64,
    end: f64,
    direction: f64,
    k: f64,
    done: bool,
}

impl DragPath {
    /// Normalized value the drag ends on
    pub fn end(&self) -> f64 {
        self.end
    }
}

impl Iterator for DragPath {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        if self.done {
            return None;
        }

        let next = self
            .range
            .normalize(self.start + self.direction * self.k * self.range.step);
        self.k += 1.0;

        let reached = if self.direction > 0.0 {
            next >= self.end
        } else {
            next <= self.end
        };
        if reached {
            self.done = true;
            return (self.end != self.start).then_some(self.end);
        }
        Some(next)
    }
}

/// Number of fractional digits needed to represent `step`
fn decimals_of(step: f64) -> usize {
    let text = format!("{}", step);
    text.split_once('.')
        .map(|(_, fraction)| fraction.len())
        .unwrap_or(0)
}
