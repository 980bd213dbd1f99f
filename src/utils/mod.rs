//! Utility functions module
//!
//! Signal handling, clocks and display formatting shared across the application.

pub mod clock;
pub mod format;
pub mod signals;

// Re-export main items
pub use clock::{Clock, ManualClock, SystemClock};
pub use format::{format_hms, format_uptime};
pub use signals::shutdown_signal;
