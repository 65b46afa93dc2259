//! # slider-callback Core
//!
//! Core library for slider-callback: binds range controls to a display and
//! to a server endpoint.
//!
//! Every input event mirrors the control's value into its display and sends
//! it to the endpoint, unless an earlier input-triggered send for the same
//! control is still in flight. Every change event sends the committed value
//! unconditionally. Send failures are logged, never raised.

// Core modules
pub mod binder;
pub mod config;
pub mod control;
pub mod endpoint;
pub mod error;
pub mod page;

#[cfg(test)]
pub(crate) mod testing;

// Re-export commonly used types
pub use binder::{bind, BusyFlag, Dispatch, SliderBinder, StatsSnapshot, Trigger};
pub use config::{FormField, PageConfig, PayloadShape, SliderConfig};
pub use control::{Control, Display, RangeControl, TextDisplay};
pub use endpoint::{Endpoint, HttpEndpoint, LogEndpoint, Payload};
pub use error::{ConfigError, Error, Result, SendError};
pub use page::{PageEvent, PageReport, SliderPage, SliderReport};

/// Current version of the slider-callback-core library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize tracing with a specific debug mode
pub fn init_tracing_with_debug(debug: bool) {
    let filter = if debug { "debug" } else { "info" };

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .init();
}
