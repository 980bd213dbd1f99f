//! Main application state management

use std::{
    sync::{Arc, Mutex, MutexGuard, Weak},
    time::{Duration, Instant},
};
use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use super::{TimerAccumulator, TimerSnapshot, Transition};
use crate::{
    store::TimeStore,
    tasks::{start_ticking, TickHandle},
    utils::{format_uptime, Clock},
};

/// Timer type held by the application
pub type SharedTimer = TimerAccumulator<Box<dyn TimeStore>>;

/// Everything that must change together. One lock keeps user toggles and
/// ticks from interleaving.
struct TimerCell {
    timer: SharedTimer,
    ticker: Option<TickHandle>,
}

/// Main application state: the timer, its tick subscription and observers
pub struct AppState {
    cell: Mutex<TimerCell>,
    clock: Arc<dyn Clock>,
    tick_period: Duration,
    this: Weak<AppState>,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Mutex<Option<String>>,
    pub last_action_time: Mutex<Option<DateTime<Utc>>>,
    /// Channel for snapshot updates, the observer list of the timer
    pub snapshot_tx: watch::Sender<TimerSnapshot>,
    /// Keep the receiver alive to prevent channel closure
    _snapshot_rx: watch::Receiver<TimerSnapshot>,
}

impl AppState {
    /// Wrap an initialized timer. Ticks fire every `tick_period` while running.
    pub fn new(
        timer: SharedTimer,
        clock: Arc<dyn Clock>,
        tick_period: Duration,
        host: String,
        port: u16,
    ) -> Arc<Self> {
        let (snapshot_tx, snapshot_rx) = watch::channel(timer.snapshot());

        Arc::new_cyclic(|this| Self {
            cell: Mutex::new(TimerCell { timer, ticker: None }),
            clock,
            tick_period,
            this: this.clone(),
            start_time: Instant::now(),
            port,
            host,
            last_action: Mutex::new(None),
            last_action_time: Mutex::new(None),
            snapshot_tx,
            _snapshot_rx: snapshot_rx,
        })
    }

    fn lock_cell(&self) -> Result<MutexGuard<'_, TimerCell>, String> {
        self.cell
            .lock()
            .map_err(|e| format!("Failed to lock timer state: {}", e))
    }

    /// Start or pause the timer, starting or stopping ticks to match
    pub fn toggle(&self) -> Result<TimerSnapshot, String> {
        let mut cell = self.lock_cell()?;
        let now = self.clock.now();

        match cell.timer.toggle(now) {
            Transition::Started => cell.ticker = Some(self.spawn_ticker()),
            Transition::Paused => cell.ticker = None,
        }
        let snapshot = cell.timer.snapshot();
        drop(cell);

        self.record_action(if snapshot.is_running { "start" } else { "pause" });
        self.publish(snapshot);
        Ok(snapshot)
    }

    /// Clear the session display, pausing first if running
    pub fn reset(&self) -> Result<TimerSnapshot, String> {
        let mut cell = self.lock_cell()?;
        let now = self.clock.now();

        if cell.timer.reset(now) == Some(Transition::Paused) {
            cell.ticker = None;
        }
        let snapshot = cell.timer.snapshot();
        drop(cell);

        self.record_action("reset");
        self.publish(snapshot);
        Ok(snapshot)
    }

    /// Deliver one tick. Stray ticks after a pause are ignored.
    pub fn tick(&self) -> Result<(), String> {
        let mut cell = self.lock_cell()?;
        let now = self.clock.now();

        if cell.timer.on_tick(now) {
            let snapshot = cell.timer.snapshot();
            drop(cell);
            self.publish(snapshot);
        } else {
            debug!("Ignoring tick while paused");
        }
        Ok(())
    }

    /// Stop ticking for process exit, optionally saving the day total first
    pub fn shutdown(&self, save: bool) -> Result<(), String> {
        let mut cell = self.lock_cell()?;
        cell.ticker = None;
        if save {
            let now = self.clock.now();
            cell.timer.save(now);
            info!("Saved accrued time on shutdown");
        }
        Ok(())
    }

    /// Get current timer snapshot
    pub fn get_snapshot(&self) -> Result<TimerSnapshot, String> {
        self.lock_cell().map(|cell| cell.timer.snapshot())
    }

    /// Whether a tick subscription is currently held
    pub fn is_ticking(&self) -> bool {
        self.lock_cell()
            .map(|cell| cell.ticker.is_some())
            .unwrap_or(false)
    }

    /// Receive every published snapshot
    pub fn subscribe(&self) -> watch::Receiver<TimerSnapshot> {
        self.snapshot_tx.subscribe()
    }

    fn spawn_ticker(&self) -> TickHandle {
        let state = self.this.clone();
        start_ticking(self.tick_period, move || match state.upgrade() {
            Some(state) => {
                if let Err(e) = state.tick() {
                    warn!("Tick failed: {}", e);
                }
                true
            }
            None => false,
        })
    }

    fn publish(&self, snapshot: TimerSnapshot) {
        if let Err(e) = self.snapshot_tx.send(snapshot) {
            warn!("Failed to send snapshot update: {}", e);
        }
    }

    fn record_action(&self, action: &str) {
        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(action.to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        format_uptime(self.start_time.elapsed())
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }
}
