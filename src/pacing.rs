//! Fixed-interval pacing between sequential upstream calls.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

type SleepFn = Arc<dyn Fn(Duration) + Send + Sync>;

/// Sleeps a fixed interval before every iteration except the first.
#[derive(Clone)]
pub struct Pacer {
    interval: Duration,
    sleep: SleepFn,
}

impl Pacer {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            sleep: Arc::new(std::thread::sleep),
        }
    }

    /// A pacer that calls `sleep` instead of blocking the thread.
    pub fn with_sleeper<F>(interval: Duration, sleep: F) -> Self
    where
        F: Fn(Duration) + Send + Sync + 'static,
    {
        Self {
            interval,
            sleep: Arc::new(sleep),
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Wait ahead of the `iteration`-th call (zero-based).
    pub fn pace(&self, iteration: usize) {
        if iteration > 0 && !self.interval.is_zero() {
            (self.sleep)(self.interval);
        }
    }
}

impl fmt::Debug for Pacer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pacer")
            .field("interval", &self.interval)
            .finish()
    }
}
