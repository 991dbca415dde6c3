//! Elapsed-time ticker
//!
//! Periodic elapsed-time updates for an active recording, plus the signal
//! that the duration cap was hit. Elapsed time is always derived from the
//! session start instant, never accumulated, so missed or delayed ticks
//! cannot drift the display.
//!
//! The ticker is owned by the session controller and polled from its own
//! select loop; cancellation is dropping it, which is synchronous and
//! leaves no way for a late tick to fire into a later session.

use std::time::Duration;
use tokio::time::{interval_at, Instant, Interval};

/// One elapsed-time update
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickUpdate {
    /// Milliseconds since the recording started
    pub elapsed_ms: u64,

    /// Zero-padded `MM:SS` for the UI
    pub text: String,

    /// Whether the duration cap has been reached
    pub timed_out: bool,
}

/// Repeating elapsed-time tracker for one recording
pub struct ElapsedTicker {
    started_at: Instant,
    ticks: Interval,
    max_duration_ms: u64,
}

impl ElapsedTicker {
    /// Create a ticker for a recording that started at `started_at`.
    ///
    /// The first tick fires immediately, then every `tick_interval_ms`.
    pub fn new(started_at: Instant, tick_interval_ms: u64, max_duration_ms: u64) -> Self {
        Self {
            started_at,
            ticks: interval_at(started_at, Duration::from_millis(tick_interval_ms)),
            max_duration_ms,
        }
    }

    /// Wait for the next tick and report the derived elapsed time
    pub async fn tick(&mut self) -> TickUpdate {
        self.ticks.tick().await;
        let elapsed_ms = self.started_at.elapsed().as_millis() as u64;
        TickUpdate {
            elapsed_ms,
            text: format_elapsed(elapsed_ms),
            timed_out: elapsed_ms >= self.max_duration_ms,
        }
    }
}

/// Format elapsed milliseconds as zero-padded `MM:SS`
pub fn format_elapsed(elapsed_ms: u64) -> String {
    let minutes = (elapsed_ms / 60_000) % 60;
    let seconds = (elapsed_ms / 1_000) % 60;
    format!("{:02}:{:02}", minutes, seconds)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_elapsed() {
        assert_eq!(format_elapsed(0), "00:00");
        assert_eq!(format_elapsed(499), "00:00");
        assert_eq!(format_elapsed(1_000), "00:01");
        assert_eq!(format_elapsed(29_500), "00:29");
        assert_eq!(format_elapsed(30_000), "00:30");
        assert_eq!(format_elapsed(61_000), "01:01");
        assert_eq!(format_elapsed(59 * 60_000 + 59_000), "59:59");
        // Minutes wrap at 60, matching the derivation
        assert_eq!(format_elapsed(3_600_000), "00:00");
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticks_have_no_drift() {
        let mut ticker = ElapsedTicker::new(Instant::now(), 500, 30_000);

        for k in 0..60u64 {
            let update = ticker.tick().await;
            assert_eq!(update.elapsed_ms, k * 500);
            assert!(!update.timed_out);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_at_cap() {
        let mut ticker = ElapsedTicker::new(Instant::now(), 500, 30_000);

        let mut last = ticker.tick().await;
        while !last.timed_out {
            last = ticker.tick().await;
        }
        assert_eq!(last.elapsed_ms, 30_000);
        assert_eq!(last.text, "00:30");
    }

    #[tokio::test(start_paused = true)]
    async fn test_final_tick_still_formats_text() {
        let mut ticker = ElapsedTicker::new(Instant::now(), 500, 1_000);

        let first = ticker.tick().await;
        assert_eq!(first.text, "00:00");
        ticker.tick().await;
        let capped = ticker.tick().await;
        assert!(capped.timed_out);
        assert_eq!(capped.text, "00:01");
    }
}
