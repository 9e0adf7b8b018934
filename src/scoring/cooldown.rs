use std::time::Duration;

/// Gate for the bonus-color multiplier.
///
/// The multiplier is granted when no trigger has happened yet or when at
/// least `cooldown` has elapsed since the last one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CooldownTimer {
    cooldown: Duration,
    last_trigger: Option<Duration>,
}

impl CooldownTimer {
    pub fn new(cooldown: Duration) -> Self {
        Self {
            cooldown,
            last_trigger: None,
        }
    }

    pub fn last_trigger(&self) -> Option<Duration> {
        self.last_trigger
    }

    pub fn is_ready(&self, now: Duration) -> bool {
        match self.last_trigger {
            None => true,
            Some(last) => now.saturating_sub(last) >= self.cooldown,
        }
    }

    /// Record a trigger at `now` if the cooldown allows it.
    pub fn try_trigger(&mut self, now: Duration) -> bool {
        if self.is_ready(now) {
            self.last_trigger = Some(now);
            true
        } else {
            false
        }
    }

    pub fn reset(&mut self) {
        self.last_trigger = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cooldown_window() {
        let mut timer = CooldownTimer::new(Duration::from_secs(2));
        assert!(timer.try_trigger(Duration::from_secs(10)));
        assert!(!timer.try_trigger(Duration::from_millis(11_999)));
        assert_eq!(timer.last_trigger(), Some(Duration::from_secs(10)));
        assert!(timer.try_trigger(Duration::from_secs(12)));

        timer.reset();
        assert!(timer.is_ready(Duration::from_secs(12)));
    }
}
