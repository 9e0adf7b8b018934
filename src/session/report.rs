use std::time::Duration;

use nalgebra::Point2;

use crate::scoring::{ActivePowerUp, PowerUpKind, PowerUpZone};
use crate::session::phase::Phase;
use crate::tracker::{Track, TrackId};

/// Session-level notifications for the feedback layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    PhaseChanged { from: Phase, to: Phase },
    BallScored { track_id: TrackId, points: u64, bonus: bool },
    PowerUpTriggered { kind: PowerUpKind },
    /// Cumulative score after the doubling and the round's awards
    SpecialZoneDoubled { score: u64 },
    NewHighScore { score: u64 },
    GameOver { score: u64 },
}

/// Everything rendering needs after one tick.
#[derive(Debug, Clone, PartialEq)]
pub struct TickReport {
    pub phase: Phase,
    /// Live tracks, including ones coasting through a missed frame
    pub tracks: Vec<Track>,
    pub score_delta: u64,
    pub score: u64,
    pub scored_positions: Vec<Point2<f32>>,
    pub events: Vec<GameEvent>,
    /// Timed mode only
    pub time_remaining: Option<Duration>,
    pub active_power_up: Option<ActivePowerUp>,
    pub power_up_zone: Option<PowerUpZone>,
}

impl TickReport {
    pub(crate) fn idle(phase: Phase, score: u64, events: Vec<GameEvent>) -> Self {
        Self {
            phase,
            tracks: Vec::new(),
            score_delta: 0,
            score,
            scored_positions: Vec::new(),
            events,
            time_remaining: None,
            active_power_up: None,
            power_up_zone: None,
        }
    }

    pub fn is_slow_motion(&self) -> bool {
        self.active_power_up
            .is_some_and(|p| p.kind == PowerUpKind::SlowMotion)
    }
}
