//! Observable timer snapshot

use std::time::Duration;

/// Read-only view of the timer published to observers after every change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TimerSnapshot {
    pub is_running: bool,
    /// Current display session, including earlier runs since the last reset
    pub elapsed: Duration,
    /// Active time accrued since local midnight
    pub cumulative_today: Duration,
}

impl TimerSnapshot {
    pub fn status_label(&self) -> &'static str {
        if self.is_running { "active" } else { "paused" }
    }
}

/// Outcome of a toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Paused -> Running; ticks must begin
    Started,
    /// Running -> Paused; ticks must stop
    Paused,
}
