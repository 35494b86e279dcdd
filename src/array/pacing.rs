//! Animation delays, adjustable while a worker is running.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Smallest non-zero delay `slower` steps up to.
const MIN_STEP: Duration = Duration::from_micros(100);
/// Upper bound for either delay.
const MAX_DELAY: Duration = Duration::from_secs(1);

/// Pre- and post-redraw delays of a render job.
///
/// Stored as microseconds in atomics so the dispatch loop can retune the
/// animation while a worker reads the values.
#[derive(Debug)]
pub struct Pacing {
    pre_us: AtomicU64,
    post_us: AtomicU64,
}

impl Default for Pacing {
    /// 1 ms before the redraw, 5 ms after.
    fn default() -> Self {
        Self::new(Duration::from_millis(1), Duration::from_millis(5))
    }
}

fn micros(duration: Duration) -> u64 {
    u64::try_from(duration.min(MAX_DELAY).as_micros()).unwrap_or(u64::MAX)
}

impl Pacing {
    /// Create pacing with explicit delays (each capped at one second).
    pub fn new(pre: Duration, post: Duration) -> Self {
        Self {
            pre_us: AtomicU64::new(micros(pre)),
            post_us: AtomicU64::new(micros(post)),
        }
    }

    /// No delays at all.
    pub fn instant() -> Self {
        Self::new(Duration::ZERO, Duration::ZERO)
    }

    /// Delay between clearing a column and redrawing it.
    pub fn pre_delay(&self) -> Duration {
        Duration::from_micros(self.pre_us.load(Ordering::Relaxed))
    }

    /// Delay after a redraw has been flushed.
    pub fn post_delay(&self) -> Duration {
        Duration::from_micros(self.post_us.load(Ordering::Relaxed))
    }

    /// Set the pre-redraw delay.
    pub fn set_pre_delay(&self, delay: Duration) {
        self.pre_us.store(micros(delay), Ordering::Relaxed);
    }

    /// Set the post-redraw delay.
    pub fn set_post_delay(&self, delay: Duration) {
        self.post_us.store(micros(delay), Ordering::Relaxed);
    }

    /// Halve both delays.
    pub fn faster(&self) {
        self.set_pre_delay(self.pre_delay() / 2);
        self.set_post_delay(self.post_delay() / 2);
    }

    /// Double both delays. Zero delays step up to a small minimum.
    pub fn slower(&self) {
        self.set_pre_delay((self.pre_delay() * 2).max(MIN_STEP));
        self.set_post_delay((self.post_delay() * 2).max(MIN_STEP));
    }
}
