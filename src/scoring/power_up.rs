//! Transient power-up zones and the effects they grant.

use std::time::Duration;

use nalgebra::Point2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::check_secs;
use crate::error::ConfigError;
use crate::scoring::zone::ZoneLayout;

/// Effect granted when a ball lands in a power-up zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PowerUpKind {
    /// Next regular award is multiplied
    ScoreMultiplier,
    /// Rendering slows down for a while
    SlowMotion,
    /// Timed games get extra seconds; blocks other power-ups for a while
    ExtraTime,
    /// A second bonus-color ball is tracked
    DoubleBalls,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 4] = [
        PowerUpKind::ScoreMultiplier,
        PowerUpKind::SlowMotion,
        PowerUpKind::ExtraTime,
        PowerUpKind::DoubleBalls,
    ];

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }
}

/// Timing for power-up zones and effects, in seconds.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PowerUpConfig {
    /// Spawn power-up zones at all
    pub enabled: bool,
    pub spawn_interval_secs: f64,
    pub zone_duration_secs: f64,
    /// How long Slow Motion and Extra Time stay the active power-up
    pub effect_secs: f64,
    /// Seconds Extra Time adds to a timed game
    pub extra_time_secs: f64,
}

impl Default for PowerUpConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            spawn_interval_secs: 15.0,
            zone_duration_secs: 10.0,
            effect_secs: 10.0,
            extra_time_secs: 10.0,
        }
    }
}

impl PowerUpConfig {
    pub fn spawn_interval(&self) -> Duration {
        Duration::from_secs_f64(self.spawn_interval_secs)
    }

    pub fn zone_duration(&self) -> Duration {
        Duration::from_secs_f64(self.zone_duration_secs)
    }

    pub fn effect_duration(&self) -> Duration {
        Duration::from_secs_f64(self.effect_secs)
    }

    pub fn extra_time(&self) -> Duration {
        Duration::from_secs_f64(self.extra_time_secs)
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        check_secs("power_up.spawn_interval_secs", self.spawn_interval_secs)?;
        check_secs("power_up.zone_duration_secs", self.zone_duration_secs)?;
        check_secs("power_up.effect_secs", self.effect_secs)?;
        check_secs("power_up.extra_time_secs", self.extra_time_secs)?;
        Ok(())
    }
}

/// A single-use zone placed on top of one of the regular zones.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PowerUpZone {
    pub center: Point2<f32>,
    pub radius: f32,
    pub spawned_at: Duration,
    pub duration: Duration,
    consumed: bool,
}

impl PowerUpZone {
    pub fn new(center: Point2<f32>, radius: f32, spawned_at: Duration, duration: Duration) -> Self {
        Self {
            center,
            radius,
            spawned_at,
            duration,
            consumed: false,
        }
    }

    /// Place a zone on a randomly chosen regular zone of `layout`.
    pub fn spawn<R: Rng + ?Sized>(
        layout: &ZoneLayout,
        now: Duration,
        duration: Duration,
        rng: &mut R,
    ) -> Option<Self> {
        let zones = layout.zones();
        if zones.is_empty() {
            return None;
        }
        let zone = &zones[rng.gen_range(0..zones.len())];
        Some(Self::new(zone.center, zone.radius, now, duration))
    }

    pub fn is_active(&self, now: Duration) -> bool {
        !self.consumed && now.saturating_sub(self.spawned_at) <= self.duration
    }

    pub fn remaining(&self, now: Duration) -> Duration {
        if self.consumed {
            return Duration::ZERO;
        }
        self.duration
            .saturating_sub(now.saturating_sub(self.spawned_at))
    }

    #[inline]
    pub fn contains(&self, point: &Point2<f32>) -> bool {
        nalgebra::distance(&self.center, point) <= self.radius
    }

    pub(crate) fn consume(&mut self) {
        self.consumed = true;
    }
}

/// A power-up currently in effect for the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivePowerUp {
    pub kind: PowerUpKind,
    pub activated_at: Duration,
    /// `None` lasts until consumed or until the session resets
    pub duration: Option<Duration>,
}

impl ActivePowerUp {
    pub fn new(kind: PowerUpKind, activated_at: Duration, config: &PowerUpConfig) -> Self {
        let duration = match kind {
            PowerUpKind::SlowMotion | PowerUpKind::ExtraTime => Some(config.effect_duration()),
            PowerUpKind::ScoreMultiplier | PowerUpKind::DoubleBalls => None,
        };
        Self {
            kind,
            activated_at,
            duration,
        }
    }

    pub fn is_active(&self, now: Duration) -> bool {
        match self.duration {
            None => true,
            Some(duration) => now.saturating_sub(self.activated_at) < duration,
        }
    }

    pub fn remaining(&self, now: Duration) -> Option<Duration> {
        self.duration
            .map(|d| d.saturating_sub(now.saturating_sub(self.activated_at)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::zone::ScoringZone;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_zone_expires() {
        let zone = PowerUpZone::new(
            Point2::new(0.0, 0.0),
            20.0,
            Duration::from_secs(5),
            Duration::from_secs(10),
        );
        assert!(zone.is_active(Duration::from_secs(15)));
        assert_eq!(zone.remaining(Duration::from_secs(12)), Duration::from_secs(3));
        assert!(!zone.is_active(Duration::from_millis(15_001)));
    }

    #[test]
    fn test_zone_consumed() {
        let mut zone = PowerUpZone::new(
            Point2::new(0.0, 0.0),
            20.0,
            Duration::ZERO,
            Duration::from_secs(10),
        );
        zone.consume();
        assert!(!zone.is_active(Duration::from_secs(1)));
        assert_eq!(zone.remaining(Duration::from_secs(1)), Duration::ZERO);
    }

    #[test]
    fn test_spawn_uses_regular_zone() {
        let layout = ZoneLayout::new(
            vec![ScoringZone::new(10.0, 10.0, 20.0, 5), ScoringZone::new(300.0, 300.0, 20.0, 5)],
            Some(ScoringZone::new(600.0, 600.0, 20.0, 0)),
        )
        .unwrap();
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..20 {
            let zone =
                PowerUpZone::spawn(&layout, Duration::ZERO, Duration::from_secs(10), &mut rng)
                    .unwrap();
            assert!(layout.zones().iter().any(|z| z.center == zone.center));
        }
    }

    #[test]
    fn test_active_power_up_durations() {
        let config = PowerUpConfig::default();
        let start = Duration::from_secs(100);

        let slow = ActivePowerUp::new(PowerUpKind::SlowMotion, start, &config);
        assert!(slow.is_active(Duration::from_secs(109)));
        assert!(!slow.is_active(Duration::from_secs(110)));

        let multiplier = ActivePowerUp::new(PowerUpKind::ScoreMultiplier, start, &config);
        assert!(multiplier.is_active(Duration::from_secs(10_000)));
        assert_eq!(multiplier.remaining(start), None);

        let extra = ActivePowerUp::new(PowerUpKind::ExtraTime, start, &config);
        assert!(extra.is_active(Duration::from_secs(105)));
        assert_eq!(extra.remaining(Duration::from_secs(104)), Some(Duration::from_secs(6)));
        assert!(!extra.is_active(Duration::from_secs(110)));
    }

    #[test]
    fn test_random_kind_is_seeded() {
        let mut a = StdRng::seed_from_u64(42);
        let mut b = StdRng::seed_from_u64(42);
        let kinds_a: Vec<_> = (0..16).map(|_| PowerUpKind::random(&mut a)).collect();
        let kinds_b: Vec<_> = (0..16).map(|_| PowerUpKind::random(&mut b)).collect();
        assert_eq!(kinds_a, kinds_b);
    }
}
