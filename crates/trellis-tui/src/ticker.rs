//! Background frame ticker.
//!
//! Calls a frame function on a fixed interval from a tokio task. The state
//! it renders is shared through a `parking_lot::Mutex`, which also
//! serializes ticks against render passes made by the caller.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

pub struct FrameTicker {
    shutdown: Option<oneshot::Sender<()>>,
    handle: JoinHandle<()>,
}

impl FrameTicker {
    /// Spawn the ticker on the current tokio runtime. The first frame runs
    /// immediately. Panics outside a runtime, like `tokio::spawn`.
    pub fn start<S, F>(state: Arc<Mutex<S>>, interval: Duration, mut frame: F) -> Self
    where
        S: Send + 'static,
        F: FnMut(&mut S) + Send + 'static,
    {
        let interval = interval.max(Duration::from_millis(1));
        let (shutdown, mut shutdown_rx) = oneshot::channel();
        tracing::debug!(?interval, "frame ticker started");

        let handle = tokio::spawn(async move {
            let mut timer = tokio::time::interval(interval);
            timer.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                tokio::select! {
                    _ = timer.tick() => {
                        let mut guard = state.lock();
                        frame(&mut guard);
                    }
                    _ = &mut shutdown_rx => break,
                }
            }
            tracing::debug!("frame ticker stopped");
        });

        Self {
            shutdown: Some(shutdown),
            handle,
        }
    }

    /// Ask the ticker to stop. No frame starts after the task observes it.
    pub fn stop(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            // The task may already be gone.
            let _ = shutdown.send(());
        }
    }

    pub fn is_running(&self) -> bool {
        !self.handle.is_finished()
    }
}

impl Drop for FrameTicker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn ticks_until_stopped() {
        let frames = Arc::new(Mutex::new(0usize));
        let mut ticker = FrameTicker::start(frames.clone(), Duration::from_millis(10), |n| *n += 1);

        tokio::time::sleep(Duration::from_millis(35)).await;
        let seen = *frames.lock();
        assert!(seen >= 3, "only {seen} frames");
        assert!(ticker.is_running());

        ticker.stop();
        tokio::time::sleep(Duration::from_millis(50)).await;
        let after = *frames.lock();
        assert!(after <= seen + 1, "{after} frames after stop");
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(*frames.lock(), after);
        assert!(!ticker.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn manual_access_serializes_with_ticks() {
        let state = Arc::new(Mutex::new(Vec::<&'static str>::new()));
        let _ticker = FrameTicker::start(state.clone(), Duration::from_millis(5), |log| {
            log.push("tick")
        });

        tokio::time::sleep(Duration::from_millis(1)).await;
        state.lock().push("manual");
        tokio::time::sleep(Duration::from_millis(6)).await;

        let log = state.lock().clone();
        assert_eq!(log.first(), Some(&"tick"));
        assert!(log.contains(&"manual"));
        assert_eq!(log.last(), Some(&"tick"));
    }

    #[tokio::test(start_paused = true)]
    async fn runs_at_configured_interval() {
        let config = crate::config::TuiConfig::from_toml_str("tick_interval_ms = 20").unwrap();
        let frames = Arc::new(Mutex::new(0usize));
        let mut ticker = FrameTicker::start(frames.clone(), config.tick_interval(), |n| *n += 1);

        tokio::time::sleep(Duration::from_millis(50)).await;
        ticker.stop();
        // Ticks at 0, 20 and 40 ms.
        assert_eq!(*frames.lock(), 3);
    }

    #[tokio::test]
    async fn zero_interval_is_clamped() {
        let frames = Arc::new(Mutex::new(0usize));
        let mut ticker = FrameTicker::start(frames.clone(), Duration::ZERO, |n| *n += 1);
        tokio::time::sleep(Duration::from_millis(20)).await;
        ticker.stop();
        assert!(*frames.lock() >= 1);
    }
}
