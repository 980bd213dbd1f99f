//! Time Timer - A personal stopwatch service
//!
//! This library tracks a start/pause stopwatch together with the total active
//! time of the current day, persisted across restarts and reset when the day
//! changes. A small HTTP API exposes toggle and status.

pub mod config;
pub mod state;
pub mod api;
pub mod store;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use state::{AppState, TimerAccumulator, TimerSnapshot};
pub use api::create_router;
pub use store::{FileStore, MemoryStore, StoredDay, TimeStore};
pub use utils::signals::shutdown_signal;
