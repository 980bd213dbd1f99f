//! Persistence module
//!
//! The day total survives restarts through a [`TimeStore`]. Two keys are kept:
//! the cumulative seconds for the day and the timestamp of the last write.

pub mod file;
pub mod memory;

use std::time::Duration;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Record persisted between runs
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct StoredDay {
    /// Active seconds accrued on `today_date`
    #[serde(default)]
    pub cumulative_time_today: f64,
    /// When the total was last written
    #[serde(default)]
    pub today_date: Option<DateTime<Local>>,
}

impl StoredDay {
    pub fn new(cumulative_time_today: f64, today_date: DateTime<Local>) -> Self {
        Self {
            cumulative_time_today,
            today_date: Some(today_date),
        }
    }

    /// Reject values that cannot stand for an accrued duration
    pub fn validate(self) -> Result<Self, StoreError> {
        if !self.cumulative_time_today.is_finite() || self.cumulative_time_today < 0.0 {
            return Err(StoreError::Invalid(format!(
                "cumulative time must be a non-negative number, got {}",
                self.cumulative_time_today
            )));
        }
        if Duration::try_from_secs_f64(self.cumulative_time_today).is_err() {
            return Err(StoreError::Invalid(format!(
                "cumulative time {} is out of range",
                self.cumulative_time_today
            )));
        }
        Ok(self)
    }
}

/// Errors raised by store adapters
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("store contents are not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("store contents are invalid: {0}")]
    Invalid(String),
}

/// Key-value persistence for the day total.
///
/// An empty store is a valid state and loads as [`StoredDay::default`].
pub trait TimeStore: Send {
    fn load(&self) -> Result<StoredDay, StoreError>;
    fn save(&mut self, day: &StoredDay) -> Result<(), StoreError>;
}

impl<T: TimeStore + ?Sized> TimeStore for Box<T> {
    fn load(&self) -> Result<StoredDay, StoreError> {
        (**self).load()
    }

    fn save(&mut self, day: &StoredDay) -> Result<(), StoreError> {
        (**self).save(day)
    }
}
