//! API response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{state::TimerSnapshot, utils::format_hms};

/// Timer values as presented to clients
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TimerView {
    pub running: bool,
    pub elapsed_seconds: f64,
    pub elapsed: String,
    pub cumulative_today_seconds: f64,
    pub cumulative_today: String,
}

impl From<TimerSnapshot> for TimerView {
    fn from(snapshot: TimerSnapshot) -> Self {
        Self {
            running: snapshot.is_running,
            elapsed_seconds: snapshot.elapsed.as_secs_f64(),
            elapsed: format_hms(snapshot.elapsed),
            cumulative_today_seconds: snapshot.cumulative_today.as_secs_f64(),
            cumulative_today: format_hms(snapshot.cumulative_today),
        }
    }
}

/// API response structure for state change endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub timer: TimerView,
}

impl ApiResponse {
    /// Create a response whose status follows the timer state
    pub fn new(message: String, snapshot: TimerSnapshot) -> Self {
        Self {
            status: snapshot.status_label().to_string(),
            message,
            timestamp: Utc::now(),
            timer: snapshot.into(),
        }
    }
}

/// Status response with server information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
    pub timer: TimerView,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
