//! Cancellable auto-reset timer
//!
//! [`ResetTimer`] owns at most one pending countdown. Starting a new one
//! aborts the previous task, and dropping the timer aborts whatever is still
//! pending, so a torn-down form is never mutated afterwards.

use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

#[derive(Debug)]
pub struct ResetTimer {
    delay: Duration,
    runtime: Handle,
    pending: Option<JoinHandle<()>>,
}

impl ResetTimer {
    pub fn new(delay: Duration, runtime: Handle) -> Self {
        Self {
            delay,
            runtime,
            pending: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Arm the countdown, replacing any pending one
    pub fn start<F>(&mut self, on_fire: F)
    where
        F: FnOnce() + Send + 'static,
    {
        if self.cancel() {
            tracing::debug!("Replaced pending reset timer");
        }

        let delay = self.delay;
        tracing::debug!(delay_ms = delay.as_millis() as u64, "Reset timer started");
        self.pending = Some(self.runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            tracing::debug!("Reset timer fired");
            on_fire();
        }));
    }

    /// Abort the pending countdown; returns whether one was still running
    pub fn cancel(&mut self) -> bool {
        match self.pending.take() {
            Some(handle) => {
                let was_pending = !handle.is_finished();
                handle.abort();
                if was_pending {
                    tracing::debug!("Reset timer cancelled");
                }
                was_pending
            }
            None => false,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for ResetTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counter() -> (Arc<AtomicUsize>, impl FnOnce() + Send + 'static) {
        let count = Arc::new(AtomicUsize::new(0));
        let hits = count.clone();
        (count, move || {
            hits.fetch_add(1, Ordering::SeqCst);
        })
    }

    async fn settle() {
        for _ in 0..4 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_fires_after_delay() {
        let mut timer = ResetTimer::new(Duration::from_millis(3000), Handle::current());
        let (count, on_fire) = counter();
        timer.start(on_fire);
        settle().await;

        tokio::time::advance(Duration::from_millis(2999)).await;
        settle().await;
        assert_eq!(count.load(Ordering::SeqCst), 0);
        assert!(timer.is_pending());

        tokio::time::advance(Duration::from_millis(1)).await;
        settle().await;
        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert!(!timer.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_prevents_fire() {
        let mut timer = ResetTimer::new(Duration::from_millis(3000), Handle::current());
        let (count, on_fire) = counter();
        timer.start(on_fire);

        assert!(timer.cancel());
        assert!(!timer.cancel());

        tokio::time::advance(Duration::from_millis(5000)).await;
        settle().await;
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_restart_keeps_a_single_pending_timer() {
        let mut timer = ResetTimer::new(Duration::from_millis(3000), Handle::current());
        let (first, on_first) = counter();
        let (second, on_second) = counter();

        timer.start(on_first);
        tokio::time::advance(Duration::from_millis(2000)).await;
        timer.start(on_second);
        settle().await;

        tokio::time::advance(Duration::from_millis(1500)).await;
        settle().await;
        assert_eq!(first.load(Ordering::SeqCst), 0);
        assert_eq!(second.load(Ordering::SeqCst), 0);

        tokio::time::advance(Duration::from_millis(1500)).await;
        settle().await;
        assert_eq!(first.load(Ordering::SeqCst), 0);
        assert_eq!(second.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels_pending_timer() {
        let (count, on_fire) = counter();
        {
            let mut timer = ResetTimer::new(Duration::from_millis(100), Handle::current());
            timer.start(on_fire);
        }

        tokio::time::advance(Duration::from_millis(500)).await;
        settle().await;
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }
}
