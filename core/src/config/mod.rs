//! Configuration module for slider-callback core
//!
//! Only exports pure data types. All loading logic is in CLI layer.

pub mod types;

pub use types::{FormField, PageConfig, PayloadShape, SliderConfig};
