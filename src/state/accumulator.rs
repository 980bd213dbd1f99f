//! Timer/accumulator state machine
//!
//! Two states, `Paused` (initial) and `Running`. `toggle` is the only transition;
//! `on_tick` self-loops in `Running` and is ignored in `Paused`.
//!
//! The session display (`elapsed`) and the day total (`cumulative_today`) are
//! accumulated independently: the first from absolute session timestamps, the
//! second from tick-to-tick increments. Late ticks (e.g. after system sleep) make
//! them drift apart, and that drift is kept.

use std::time::Duration;
use chrono::{DateTime, Local, NaiveDate};
use tracing::{debug, info, warn};

use super::{TimerSnapshot, Transition};
use crate::store::{StoredDay, TimeStore};

/// Default periodic save sampling, in whole seconds of elapsed time
pub const DEFAULT_SAVE_EVERY_SECS: u64 = 15;

/// Non-negative span between two instants; a clock that stepped back yields zero
fn span(from: DateTime<Local>, to: DateTime<Local>) -> Duration {
    (to - from).to_std().unwrap_or_default()
}

#[derive(Debug)]
pub struct TimerAccumulator<S> {
    store: S,
    save_every_secs: u64,
    is_running: bool,
    session_start: Option<DateTime<Local>>,
    last_tick: Option<DateTime<Local>>,
    paused_accumulated: Duration,
    elapsed: Duration,
    cumulative_today: Duration,
    persisted_date: Option<NaiveDate>,
}

impl<S: TimeStore> TimerAccumulator<S> {
    /// Create a paused timer backed by `store`. Call [`initialize`](Self::initialize)
    /// before use, or use [`load`](Self::load).
    pub fn new(store: S, save_every_secs: u64) -> Self {
        Self {
            store,
            save_every_secs: save_every_secs.max(1),
            is_running: false,
            session_start: None,
            last_tick: None,
            paused_accumulated: Duration::ZERO,
            elapsed: Duration::ZERO,
            cumulative_today: Duration::ZERO,
            persisted_date: None,
        }
    }

    /// Construct and initialize in one step
    pub fn load(store: S, save_every_secs: u64, now: DateTime<Local>) -> Self {
        let mut timer = Self::new(store, save_every_secs);
        timer.initialize(now);
        timer
    }

    /// Load the persisted day total and roll over if it belongs to another day.
    ///
    /// An empty store is a normal first run. Unreadable contents are logged and
    /// treated the same way.
    pub fn initialize(&mut self, now: DateTime<Local>) {
        let stored = match self.store.load() {
            Ok(day) => day,
            Err(e) => {
                warn!("Ignoring unreadable saved time: {}", e);
                StoredDay::default()
            }
        };

        self.cumulative_today =
            Duration::try_from_secs_f64(stored.cumulative_time_today).unwrap_or_default();
        self.persisted_date = stored.today_date.map(|d| d.date_naive());

        if self.persisted_date != Some(now.date_naive()) {
            self.roll_over(now);
        } else {
            debug!(
                "Restored {:.1}s accrued on {}",
                stored.cumulative_time_today,
                now.date_naive()
            );
        }
    }

    /// Flip between `Paused` and `Running`. Pausing always saves.
    pub fn toggle(&mut self, now: DateTime<Local>) -> Transition {
        self.is_running = !self.is_running;

        if self.is_running {
            self.session_start = Some(now);
            self.last_tick = Some(now);
            info!("Timer started");
            Transition::Started
        } else {
            if let Some(start) = self.session_start.take() {
                self.paused_accumulated += span(start, now);
            }
            self.last_tick = None;
            self.elapsed = self.paused_accumulated;
            info!(
                "Timer paused at {:.1}s, {:.1}s today",
                self.elapsed.as_secs_f64(),
                self.cumulative_today.as_secs_f64()
            );
            self.save(now);
            Transition::Paused
        }
    }

    /// Advance running totals to `now`. Returns `false` for a stray tick.
    pub fn on_tick(&mut self, now: DateTime<Local>) -> bool {
        if !self.is_running {
            return false;
        }
        let (Some(start), Some(last)) = (self.session_start, self.last_tick) else {
            return false;
        };

        self.elapsed = self.paused_accumulated + span(start, now);
        self.cumulative_today += span(last, now);
        self.last_tick = Some(now);

        // Sampled, not every tick: a crash can lose up to `save_every_secs`.
        if self.elapsed.as_secs() % self.save_every_secs == 0 {
            self.save(now);
        }
        true
    }

    /// Persist the day total stamped with `now`. Failures are logged only.
    pub fn save(&mut self, now: DateTime<Local>) {
        let day = StoredDay::new(self.cumulative_today.as_secs_f64(), now);
        match self.store.save(&day) {
            Ok(()) => {
                self.persisted_date = Some(now.date_naive());
                debug!("Saved {:.1}s for {}", day.cumulative_time_today, now.date_naive());
            }
            Err(e) => warn!("Failed to save accrued time: {}", e),
        }
    }

    /// Clear the session display. A running timer is paused (and saved) first;
    /// the day total is untouched.
    pub fn reset(&mut self, now: DateTime<Local>) -> Option<Transition> {
        let transition = if self.is_running {
            Some(self.toggle(now))
        } else {
            None
        };
        self.paused_accumulated = Duration::ZERO;
        self.elapsed = Duration::ZERO;
        info!("Session reset");
        transition
    }

    fn roll_over(&mut self, now: DateTime<Local>) {
        match self.persisted_date {
            Some(date) => info!("New day: discarding total from {}", date),
            None => info!("No saved day found, starting fresh"),
        }
        self.is_running = false;
        self.session_start = None;
        self.last_tick = None;
        self.paused_accumulated = Duration::ZERO;
        self.elapsed = Duration::ZERO;
        self.cumulative_today = Duration::ZERO;
        self.save(now);
    }

    pub fn is_running(&self) -> bool {
        self.is_running
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn cumulative_today(&self) -> Duration {
        self.cumulative_today
    }

    pub fn persisted_date(&self) -> Option<NaiveDate> {
        self.persisted_date
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot {
            is_running: self.is_running,
            elapsed: self.elapsed,
            cumulative_today: self.cumulative_today,
        }
    }
}
