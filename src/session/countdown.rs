use std::time::Duration;

/// Timed-mode clock, compared against wall-clock `now` on every tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    started_at: Duration,
    duration: Duration,
}

impl Countdown {
    pub fn start(now: Duration, duration: Duration) -> Self {
        Self {
            started_at: now,
            duration,
        }
    }

    pub fn remaining(&self, now: Duration) -> Duration {
        self.duration
            .saturating_sub(now.saturating_sub(self.started_at))
    }

    pub fn is_expired(&self, now: Duration) -> bool {
        self.remaining(now).is_zero()
    }

    /// Grant additional time.
    pub fn extend(&mut self, extra: Duration) {
        self.duration += extra;
    }
}
