//! Self-correcting fixed-period scheduler.
//!
//! Plain `sleep(interval)` loops drift: each iteration adds its own
//! processing time on top of the interval, and the error accumulates. The
//! [`Ticker`] recomputes every delay from the gap between the actual and the
//! expected fire time, so the schedule stays pinned to wall clock. When a
//! tick is more than one interval late the missed ticks are coalesced — the
//! expected time jumps to `now + interval` — rather than replayed in a
//! burst.
//!
//! The arithmetic is pure over caller-supplied instants, which keeps it
//! testable; [`Ticker::tick`] is the async driver on top of `tokio::time`.

use std::time::{Duration, Instant};

/// Drift-corrected periodic schedule.
#[derive(Debug, Clone)]
pub struct Ticker {
    interval: Duration,
    expected: Instant,
}

impl Ticker {
    /// A schedule whose first tick is due one interval from now.
    pub fn new(interval: Duration) -> Ticker {
        Ticker::starting_at(interval, Instant::now())
    }

    /// A schedule anchored at an explicit start instant.
    pub fn starting_at(interval: Duration, now: Instant) -> Ticker {
        Ticker {
            interval,
            expected: now + interval,
        }
    }

    /// Delay to sleep before the next tick, given the current instant.
    /// Advances the expected fire time by one interval per call; a call more
    /// than one interval late re-anchors to `now + interval` instead.
    pub fn next_delay(&mut self, now: Instant) -> Duration {
        match now.checked_duration_since(self.expected) {
            // More than one interval late: skip the missed ticks.
            Some(late) if late > self.interval => {
                self.expected = now + self.interval;
                Duration::ZERO
            }
            // Late within one interval: shorten the next sleep.
            Some(late) => {
                self.expected += self.interval;
                self.interval - late
            }
            // Early: stretch the next sleep to re-align.
            None => {
                let early = self.expected - now;
                self.expected += self.interval;
                self.interval + early
            }
        }
    }

    /// Sleeps until the next scheduled tick.
    pub async fn tick(&mut self) {
        let delay = self.next_delay(Instant::now());
        tokio::time::sleep(delay).await;
    }
}
