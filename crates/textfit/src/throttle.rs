//! Trailing-edge rate limiter for search re-triggers.
//!
//! An explicit two-state machine (idle / scheduled) with a single pending
//! slot. Calls landing in an open window run immediately and restart the
//! window; the first call inside a closed window schedules one trailing
//! execution at the window's end; further calls in the same window are
//! absorbed into that pending slot. The trigger takes no arguments, so
//! coalescing loses nothing.

use std::time::Duration;

use tokio::time::Instant;

/// Verdict for one invocation attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    /// The window is open: execute now. The window restarts at this instant.
    RunNow,
    /// The window is closed and nothing is pending yet: the caller must
    /// arrange for the trailing edge to fire at the given deadline.
    Deferred(Instant),
    /// A trailing execution is already pending; this invocation is absorbed.
    Coalesced,
}

#[derive(Debug)]
pub struct Throttle {
    wait: Duration,
    last_run: Option<Instant>,
    scheduled: bool,
}

impl Throttle {
    pub fn new(wait: Duration) -> Self {
        Self {
            wait,
            last_run: None,
            scheduled: false,
        }
    }

    /// Classifies an invocation arriving at `now`.
    pub fn check(&mut self, now: Instant) -> Gate {
        if self.scheduled {
            return Gate::Coalesced;
        }
        match self.last_run {
            Some(last) if now.duration_since(last) < self.wait => {
                self.scheduled = true;
                Gate::Deferred(last + self.wait)
            }
            _ => {
                self.last_run = Some(now);
                Gate::RunNow
            }
        }
    }

    /// Fires the trailing edge: clears the pending slot and restarts the
    /// window at `now`. Call exactly once per `Gate::Deferred`.
    pub fn release(&mut self, now: Instant) {
        self.scheduled = false;
        self.last_run = Some(now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WAIT: Duration = Duration::from_millis(50);

    #[tokio::test(start_paused = true)]
    async fn test_first_call_runs_immediately() {
        let mut throttle = Throttle::new(WAIT);
        assert_eq!(throttle.check(Instant::now()), Gate::RunNow);
    }

    #[tokio::test(start_paused = true)]
    async fn test_call_inside_window_is_deferred_to_window_end() {
        let mut throttle = Throttle::new(WAIT);
        let start = Instant::now();
        assert_eq!(throttle.check(start), Gate::RunNow);

        tokio::time::advance(Duration::from_millis(20)).await;
        assert_eq!(
            throttle.check(Instant::now()),
            Gate::Deferred(start + WAIT),
            "trailing edge must land exactly at the end of the window"
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_later_calls_in_same_window_coalesce() {
        let mut throttle = Throttle::new(WAIT);
        throttle.check(Instant::now());
        tokio::time::advance(Duration::from_millis(10)).await;
        assert!(matches!(throttle.check(Instant::now()), Gate::Deferred(_)));
        tokio::time::advance(Duration::from_millis(10)).await;
        assert_eq!(throttle.check(Instant::now()), Gate::Coalesced);
        assert_eq!(throttle.check(Instant::now()), Gate::Coalesced);
    }

    #[tokio::test(start_paused = true)]
    async fn test_release_restarts_the_window() {
        let mut throttle = Throttle::new(WAIT);
        throttle.check(Instant::now());
        tokio::time::advance(Duration::from_millis(20)).await;
        assert!(matches!(throttle.check(Instant::now()), Gate::Deferred(_)));

        tokio::time::advance(Duration::from_millis(30)).await;
        throttle.release(Instant::now());

        // Immediately after the trailing edge the window is closed again.
        assert!(matches!(throttle.check(Instant::now()), Gate::Deferred(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_spaced_calls_all_run_immediately() {
        let mut throttle = Throttle::new(WAIT);
        for _ in 0..3 {
            assert_eq!(throttle.check(Instant::now()), Gate::RunNow);
            tokio::time::advance(WAIT).await;
        }
    }
}
