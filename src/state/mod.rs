//! State management module
//!
//! This module contains the timer state machine and the shared application state
//! that serializes access to it.

pub mod accumulator;
pub mod app_state;
pub mod timer_state;

// Re-export main types
pub use accumulator::{TimerAccumulator, DEFAULT_SAVE_EVERY_SECS};
pub use app_state::{AppState, SharedTimer};
pub use timer_state::{TimerSnapshot, Transition};
