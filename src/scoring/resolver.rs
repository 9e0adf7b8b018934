//! Scoring resolver: turns observed tracks and zone geometry into awards.
//!
//! Every track is evaluated against, in order:
//! 1. the active power-up zone (single use, no points),
//! 2. the special zone (doubles the cumulative score once per tick),
//! 3. the regular zones in stored order (first match wins).
//!
//! A track that lands anywhere is inserted into the [`ScoredSet`] and is never
//! evaluated again until the session resets, which is what makes repeated
//! evaluation of a resting ball idempotent.

use std::collections::BTreeSet;
use std::time::Duration;

use nalgebra::Point2;
use rand::Rng;
use serde::Deserialize;

use crate::config::check_secs;
use crate::error::ConfigError;
use crate::scoring::cooldown::CooldownTimer;
use crate::scoring::power_up::{ActivePowerUp, PowerUpKind, PowerUpZone};
use crate::scoring::zone::ZoneLayout;
use crate::tracker::{ColorTag, Track, TrackId, TrackState};

/// Configuration for the ScoringResolver.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Color class that earns the bonus multiplier
    pub bonus_color: ColorTag,
    pub bonus_factor: u32,
    /// Minimum seconds between two bonus awards
    pub bonus_cooldown_secs: f64,
    /// Factor applied by an active score-multiplier power-up
    pub power_up_multiplier: u32,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            bonus_color: ColorTag::Accent,
            bonus_factor: 2,
            bonus_cooldown_secs: 2.0,
            power_up_multiplier: 3,
        }
    }
}

impl ScoringConfig {
    pub fn bonus_cooldown(&self) -> Duration {
        Duration::from_secs_f64(self.bonus_cooldown_secs)
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        check_secs("scoring.bonus_cooldown_secs", self.bonus_cooldown_secs)?;
        Ok(())
    }
}

/// Track IDs that already produced a score this session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScoredSet {
    ids: BTreeSet<TrackId>,
}

impl ScoredSet {
    pub fn contains(&self, id: TrackId) -> bool {
        self.ids.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = TrackId> + '_ {
        self.ids.iter().copied()
    }

    fn insert(&mut self, id: TrackId) -> bool {
        self.ids.insert(id)
    }

    fn clear(&mut self) {
        self.ids.clear();
    }
}

/// Mutable scoring state carried from tick to tick.
#[derive(Debug, Clone)]
pub struct ScoringState {
    pub(crate) scored: ScoredSet,
    pub(crate) cooldown: CooldownTimer,
    pub(crate) power_up_zone: Option<PowerUpZone>,
    pub(crate) active_power_up: Option<ActivePowerUp>,
}

impl ScoringState {
    pub fn new(config: &ScoringConfig) -> Self {
        Self {
            scored: ScoredSet::default(),
            cooldown: CooldownTimer::new(config.bonus_cooldown()),
            power_up_zone: None,
            active_power_up: None,
        }
    }

    pub fn scored(&self) -> &ScoredSet {
        &self.scored
    }

    pub fn cooldown(&self) -> &CooldownTimer {
        &self.cooldown
    }

    pub fn power_up_zone(&self) -> Option<&PowerUpZone> {
        self.power_up_zone.as_ref()
    }

    pub fn active_power_up(&self) -> Option<&ActivePowerUp> {
        self.active_power_up.as_ref()
    }

    pub fn set_power_up_zone(&mut self, zone: Option<PowerUpZone>) {
        self.power_up_zone = zone;
    }

    pub fn set_active_power_up(&mut self, power_up: Option<ActivePowerUp>) {
        self.active_power_up = power_up;
    }

    /// Clear scored IDs, the bonus cooldown and every power-up.
    pub fn reset(&mut self) {
        self.scored.clear();
        self.cooldown.reset();
        self.power_up_zone = None;
        self.active_power_up = None;
    }
}

/// A track as seen by the resolver for one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScorableTrack {
    pub track_id: TrackId,
    pub position: Point2<f32>,
    pub radius: f32,
    pub color: ColorTag,
}

impl ScorableTrack {
    pub fn new(track_id: TrackId, x: f32, y: f32, radius: f32, color: ColorTag) -> Self {
        Self {
            track_id,
            position: Point2::new(x, y),
            radius,
            color,
        }
    }

    /// Tracks observed in the current frame; coasting tracks are skipped.
    pub fn observed(tracks: &[Track]) -> Vec<Self> {
        tracks
            .iter()
            .filter(|t| t.state() == TrackState::Tracked)
            .map(Self::from)
            .collect()
    }
}

impl From<&Track> for ScorableTrack {
    fn from(track: &Track) -> Self {
        Self {
            track_id: track.track_id,
            position: track.position,
            radius: track.radius,
            color: track.color,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoringEvent {
    PowerUpTriggered { track_id: TrackId, kind: PowerUpKind },
    SpecialZoneTriggered { track_id: TrackId },
    ZoneScored { track_id: TrackId, points: u64, bonus: bool },
}

/// Outcome of one tick of scoring.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Resolution {
    pub score_delta: u64,
    pub scored_positions: Vec<Point2<f32>>,
    pub events: Vec<ScoringEvent>,
    /// At least one track reached the special zone this tick
    pub special_triggered: bool,
}

impl Resolution {
    /// Apply this tick to a cumulative score: double once if the special zone
    /// was reached, then add the round delta.
    pub fn apply_to(&self, score: u64) -> u64 {
        let base = if self.special_triggered {
            score.saturating_mul(2)
        } else {
            score
        };
        base.saturating_add(self.score_delta)
    }

    pub fn power_up_triggered(&self) -> Option<PowerUpKind> {
        self.events.iter().find_map(|e| match e {
            ScoringEvent::PowerUpTriggered { kind, .. } => Some(*kind),
            _ => None,
        })
    }
}

pub struct ScoringResolver {
    config: ScoringConfig,
}

impl ScoringResolver {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    pub fn resolve<R: Rng + ?Sized>(
        &self,
        tracks: &[ScorableTrack],
        layout: &ZoneLayout,
        state: &mut ScoringState,
        now: Duration,
        rng: &mut R,
    ) -> Resolution {
        let mut resolution = Resolution::default();

        for track in tracks {
            if state.scored.contains(track.track_id) {
                continue;
            }

            // Step 1: power-up zone
            if let Some(zone) = state.power_up_zone.as_mut() {
                if zone.is_active(now) && zone.contains(&track.position) {
                    zone.consume();
                    let kind = PowerUpKind::random(rng);
                    tracing::info!(track_id = track.track_id, ?kind, "power-up zone hit");
                    self.mark_scored(state, track, &mut resolution);
                    resolution.events.push(ScoringEvent::PowerUpTriggered {
                        track_id: track.track_id,
                        kind,
                    });
                    continue;
                }
            }

            // Step 2: special zone
            if let Some(special) = layout.special() {
                if special.contains(&track.position) {
                    tracing::info!(track_id = track.track_id, "special zone hit");
                    resolution.special_triggered = true;
                    self.mark_scored(state, track, &mut resolution);
                    resolution.events.push(ScoringEvent::SpecialZoneTriggered {
                        track_id: track.track_id,
                    });
                    continue;
                }
            }

            // Step 3: regular zones, first match wins
            let Some(zone) = layout.zones().iter().find(|z| z.contains(&track.position)) else {
                continue;
            };

            let mut points = zone.points as u64;
            let bonus = track.color == self.config.bonus_color && state.cooldown.try_trigger(now);
            if bonus {
                points *= self.config.bonus_factor as u64;
            }
            if let Some(active) = state.active_power_up {
                if active.kind == PowerUpKind::ScoreMultiplier && active.is_active(now) {
                    points *= self.config.power_up_multiplier as u64;
                    state.active_power_up = None;
                }
            }

            tracing::info!(track_id = track.track_id, points, bonus, "ball scored");
            resolution.score_delta += points;
            self.mark_scored(state, track, &mut resolution);
            resolution.events.push(ScoringEvent::ZoneScored {
                track_id: track.track_id,
                points,
                bonus,
            });
        }

        resolution
    }

    fn mark_scored(
        &self,
        state: &mut ScoringState,
        track: &ScorableTrack,
        resolution: &mut Resolution,
    ) {
        state.scored.insert(track.track_id);
        resolution.scored_positions.push(track.position);
    }
}
