//! Elapsed-seconds counter for an in-flight operation.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant};

const TICK: Duration = Duration::from_secs(1);

/// Owned handle to a one-second ticker task.
///
/// The task is aborted by [`ProgressTimer::stop`] or on drop, so it never
/// outlives the operation that started it. Must be created inside a tokio
/// runtime.
#[derive(Debug)]
pub struct ProgressTimer {
    elapsed: Arc<AtomicU64>,
    task: JoinHandle<()>,
}

impl ProgressTimer {
    /// Starts counting from zero; the first increment lands one second later.
    pub fn start() -> Self {
        let elapsed = Arc::new(AtomicU64::new(0));
        let counter = elapsed.clone();
        let first_tick = Instant::now() + TICK;
        let task = tokio::spawn(async move {
            let mut ticker = interval_at(first_tick, TICK);
            loop {
                ticker.tick().await;
                counter.fetch_add(1, Ordering::Relaxed);
            }
        });
        Self { elapsed, task }
    }

    /// Returns whole seconds since start.
    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed.load(Ordering::Relaxed)
    }

    /// Stops the ticker and returns the final count.
    pub fn stop(self) -> u64 {
        self.task.abort();
        self.elapsed_secs()
    }
}

impl Drop for ProgressTimer {
    fn drop(&mut self) {
        self.task.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_starts_at_zero() {
        let timer = ProgressTimer::start();
        assert_eq!(timer.elapsed_secs(), 0);
        tokio::time::sleep(Duration::from_millis(999)).await;
        assert_eq!(timer.elapsed_secs(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_increments_once_per_second() {
        let timer = ProgressTimer::start();
        tokio::time::sleep(Duration::from_millis(1500)).await;
        assert_eq!(timer.elapsed_secs(), 1);
        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(timer.elapsed_secs(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_freezes_count() {
        let timer = ProgressTimer::start();
        let counter = timer.elapsed.clone();
        tokio::time::sleep(Duration::from_millis(2500)).await;

        assert_eq!(timer.stop(), 2);
        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(counter.load(Ordering::Relaxed), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_aborts_task() {
        let timer = ProgressTimer::start();
        let counter = timer.elapsed.clone();
        tokio::time::sleep(Duration::from_millis(1500)).await;

        drop(timer);
        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(counter.load(Ordering::Relaxed), 1);
    }
}
