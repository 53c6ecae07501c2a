use std::sync::Mutex;
use std::time::Duration;
use tokio::time::Instant;

/// Enforces a minimum pause between the end of one request and the start of
/// the next.
///
/// Callers `wait()` before a request and `complete()` once it has finished,
/// successfully or not. The internal lock is never held across an await.
#[derive(Debug)]
pub struct IntervalGate {
    interval: Duration,
    last_completed: Mutex<Option<Instant>>,
}

impl IntervalGate {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_completed: Mutex::new(None),
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Time left before the next request may start.
    pub fn remaining(&self) -> Duration {
        let last = *self
            .last_completed
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        match last {
            Some(at) => (at + self.interval).saturating_duration_since(Instant::now()),
            None => Duration::ZERO,
        }
    }

    pub async fn wait(&self) {
        let remaining = self.remaining();
        if !remaining.is_zero() {
            tokio::time::sleep(remaining).await;
        }
    }

    pub fn complete(&self) {
        let mut last = self
            .last_completed
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *last = Some(Instant::now());
    }
}
