//! Periodic tick background task

use std::time::Duration;
use tokio::{
    task::JoinHandle,
    time::{interval_at, Instant, MissedTickBehavior},
};
use tracing::debug;

/// Default cadence of timer ticks
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Running tick subscription. Dropping the handle stops the ticks.
#[derive(Debug)]
pub struct TickHandle {
    task: JoinHandle<()>,
}

impl Drop for TickHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Spawn a task that calls `on_tick` every `period`, starting one period from now.
///
/// The task ends on its own when `on_tick` returns `false`. Must be called from
/// within a tokio runtime.
pub fn start_ticking<F>(period: Duration, mut on_tick: F) -> TickHandle
where
    F: FnMut() -> bool + Send + 'static,
{
    let task = tokio::spawn(async move {
        let mut interval = interval_at(Instant::now() + period, period);
        // Elapsed time comes from timestamps, so late ticks are not replayed.
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            interval.tick().await;
            if !on_tick() {
                debug!("Tick consumer gone, stopping ticker");
                break;
            }
        }
    });

    TickHandle { task }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    };

    #[tokio::test]
    async fn delivers_ticks_until_dropped() {
        let count = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&count);
        let handle = start_ticking(Duration::from_millis(10), move || {
            counter.fetch_add(1, Ordering::SeqCst);
            true
        });

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(count.load(Ordering::SeqCst) >= 2);

        drop(handle);
        tokio::time::sleep(Duration::from_millis(20)).await;
        let stopped_at = count.load(Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(60)).await;
        assert_eq!(count.load(Ordering::SeqCst), stopped_at);
    }

    #[tokio::test]
    async fn stops_when_callback_declines() {
        let count = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&count);
        let handle = start_ticking(Duration::from_millis(5), move || {
            counter.fetch_add(1, Ordering::SeqCst) < 2
        });

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(count.load(Ordering::SeqCst), 3);
        tokio::time::sleep(Duration::from_millis(30)).await;
        assert_eq!(count.load(Ordering::SeqCst), 3);
        drop(handle);
    }
}
