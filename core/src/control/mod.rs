//! Control and display capabilities
//!
//! A binder never reaches into a concrete widget. It reads the control's
//! value through [`Control`] and mirrors it through [`Display`].

pub mod display;
pub mod range;

pub use display::TextDisplay;
pub use range::RangeControl;

/// An interactive input element holding a scalar value
pub trait Control: Send + Sync {
    /// Identifier of the control, used as the payload key
    fn id(&self) -> &str;

    /// Current value rendered as text
    fn value(&self) -> String;
}

/// A text-bearing element mirroring a control
pub trait Display: Send + Sync {
    /// Replace the displayed text
    fn show(&self, text: &str);
}
