//! Aggregate configuration for a game session.
//!
//! Every section has defaults, so a partial JSON document such as
//! `{"session": {"total_zones": 12}}` is a complete configuration.

use std::time::Duration;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::scoring::{PowerUpConfig, ScoringConfig};
use crate::tracker::TrackerConfig;

/// Calibration, timed-mode and detection limits.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Zones (special included) that complete a calibration
    pub total_zones: usize,
    /// Radius given to every calibrated zone, in frame pixels
    pub zone_radius: f32,
    pub timed_duration_secs: f64,
    /// Bonus-color candidates kept per frame
    pub bonus_ball_limit: usize,
    /// Same, while the Double Balls power-up is active
    pub boosted_bonus_ball_limit: usize,
    pub leaderboard_size: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            total_zones: 21,
            zone_radius: 20.0,
            timed_duration_secs: 120.0,
            bonus_ball_limit: 1,
            boosted_bonus_ball_limit: 2,
            leaderboard_size: 5,
        }
    }
}

impl SessionConfig {
    pub fn timed_duration(&self) -> Duration {
        Duration::from_secs_f64(self.timed_duration_secs)
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        check_secs("session.timed_duration_secs", self.timed_duration_secs)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub tracker: TrackerConfig,
    pub scoring: ScoringConfig,
    pub power_up: PowerUpConfig,
    pub session: SessionConfig,
}

impl GameConfig {
    /// Parse and validate a JSON config.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every seconds field. Configs built in code should call this
    /// before handing them to a session.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.scoring.validate()?;
        self.power_up.validate()?;
        self.session.validate()?;
        Ok(())
    }
}

/// Seconds must convert to a `Duration`: finite, non-negative and in range.
pub(crate) fn check_secs(field: &'static str, value: f64) -> Result<Duration, ConfigError> {
    Duration::try_from_secs_f64(value).map_err(|_| ConfigError::InvalidDuration { field, value })
}
