//! Game session: owns the tracker, the scoring state and the score.
//!
//! One call to [`GameSession::tick`] runs a whole frame synchronously:
//! pending resets are applied first, then candidates are filtered, tracked
//! and scored. Timers are plain timestamps compared against `now`, so nothing
//! changes between ticks.

use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::config::GameConfig;
use crate::error::ConfigError;
use crate::scoring::{
    ActivePowerUp, PowerUpKind, PowerUpZone, ScorableTrack, ScoringEvent, ScoringResolver,
    ScoringState, ScoringZone, ZoneLayout,
};
use crate::session::countdown::Countdown;
use crate::session::leaderboard::Leaderboard;
use crate::session::phase::{GameMode, Phase, SessionCommand};
use crate::session::report::{GameEvent, TickReport};
use crate::tracker::{CentroidTracker, Detection};

/// Zones placed so far during calibration.
#[derive(Debug, Clone, Default)]
struct CalibrationDraft {
    zones: Vec<ScoringZone>,
    special: Option<ScoringZone>,
}

impl CalibrationDraft {
    fn len(&self) -> usize {
        self.zones.len() + usize::from(self.special.is_some())
    }
}

/// Resets requested since the last tick. Repeated requests collapse.
#[derive(Debug, Clone, Default)]
struct PendingCommands {
    recalibrate: bool,
    layout: Option<ZoneLayout>,
    save_zones: bool,
    new_game: Option<GameMode>,
}

pub struct GameSession {
    config: GameConfig,
    phase: Phase,
    mode: GameMode,
    tracker: CentroidTracker,
    resolver: ScoringResolver,
    scoring: ScoringState,
    layout: Option<ZoneLayout>,
    draft: CalibrationDraft,
    score: u64,
    leaderboard: Leaderboard,
    high_score_announced: bool,
    countdown: Option<Countdown>,
    last_power_up_spawn: Option<Duration>,
    pending: PendingCommands,
    rng: StdRng,
}

impl GameSession {
    /// Start a session in `Calibrating` with no zones.
    pub fn new(config: GameConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Same as [`GameSession::new`] with reproducible power-up draws.
    pub fn seeded(config: GameConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: GameConfig, rng: StdRng) -> Self {
        Self {
            tracker: CentroidTracker::new(config.tracker.clone()),
            resolver: ScoringResolver::new(config.scoring.clone()),
            scoring: ScoringState::new(&config.scoring),
            leaderboard: Leaderboard::new(config.session.leaderboard_size),
            phase: Phase::Calibrating,
            mode: GameMode::Classic,
            layout: None,
            draft: CalibrationDraft::default(),
            score: 0,
            high_score_announced: false,
            countdown: None,
            last_power_up_spawn: None,
            pending: PendingCommands::default(),
            rng,
            config,
        }
    }

    pub fn with_leaderboard(mut self, leaderboard: Leaderboard) -> Self {
        self.leaderboard = leaderboard;
        self
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn layout(&self) -> Option<&ZoneLayout> {
        self.layout.as_ref()
    }

    pub fn tracker(&self) -> &CentroidTracker {
        &self.tracker
    }

    pub fn scoring_state(&self) -> &ScoringState {
        &self.scoring
    }

    pub fn leaderboard(&self) -> &Leaderboard {
        &self.leaderboard
    }

    /// Zones placed so far in the current calibration, special included.
    pub fn calibrated_zone_count(&self) -> usize {
        self.draft.len()
    }

    pub fn request(&mut self, command: SessionCommand) {
        match command {
            SessionCommand::NewGame(mode) => self.new_game(mode),
            SessionCommand::Recalibrate => self.recalibrate(),
        }
    }

    /// Reset score and tracking but keep the zones. Applied on the next tick.
    pub fn new_game(&mut self, mode: GameMode) {
        self.pending.new_game = Some(mode);
    }

    /// Drop the zones and return to calibration. Applied on the next tick.
    pub fn recalibrate(&mut self) {
        self.pending.recalibrate = true;
        self.pending.layout = None;
        self.pending.save_zones = false;
    }

    /// Replace the whole zone set with `layout` and start scoring. Applied on
    /// the next tick.
    pub fn load_layout(&mut self, layout: ZoneLayout) {
        self.pending.layout = Some(layout);
    }

    /// Place one zone while calibrating. Returns the number of zones placed.
    ///
    /// Reaching `total_zones` queues a save for the next tick.
    pub fn add_zone(
        &mut self,
        x: f32,
        y: f32,
        points: u32,
        special: bool,
    ) -> Result<usize, ConfigError> {
        if self.phase != Phase::Calibrating || self.pending.recalibrate {
            return Err(ConfigError::NotCalibrating);
        }
        let total = self.config.session.total_zones;
        if self.draft.len() >= total {
            return Err(ConfigError::ZoneLimitReached(total));
        }

        let zone = ScoringZone::new(x, y, self.config.session.zone_radius, points);
        let overlaps = match (special, &self.draft.special) {
            (true, _) => self.draft.zones.iter().any(|z| zone.contains(&z.center)),
            (false, Some(existing)) => existing.contains(&zone.center),
            (false, None) => false,
        };
        if overlaps {
            return Err(ConfigError::SpecialZoneOverlap { x, y });
        }

        if special {
            if self.draft.special.is_some() {
                return Err(ConfigError::DuplicateSpecialZone);
            }
            self.draft.special = Some(zone);
        } else {
            self.draft.zones.push(zone);
        }

        let count = self.draft.len();
        tracing::debug!(x, y, points, special, count, "zone placed");
        if count >= total {
            self.pending.save_zones = true;
        }
        Ok(count)
    }

    /// Freeze the calibrated zones. Validated now, applied on the next tick.
    pub fn save_zones(&mut self) -> Result<(), ConfigError> {
        if self.phase != Phase::Calibrating {
            return Err(ConfigError::NotCalibrating);
        }
        ZoneLayout::new(self.draft.zones.clone(), self.draft.special)?;
        self.pending.save_zones = true;
        Ok(())
    }

    /// Add the current score to the leaderboard under `initials`.
    pub fn record_high_score(&mut self, initials: &str) -> Option<usize> {
        self.leaderboard.record(initials, self.score)
    }

    /// Run one frame.
    pub fn tick(&mut self, candidates: &[Detection], now: Duration) -> TickReport {
        let mut events = Vec::new();
        self.apply_pending(now, &mut events);

        if self.phase != Phase::Scoring {
            return TickReport::idle(self.phase, self.score, events);
        }

        // apply_pending has started the countdown for a timed game.
        if self.countdown.is_some_and(|c| c.is_expired(now)) {
            self.finish_timed_game(&mut events);
            return TickReport::idle(self.phase, self.score, events);
        }

        self.refresh_power_ups(now);

        let detections = self.filter_candidates(candidates, now);
        self.tracker.update(&detections);
        let scorable = ScorableTrack::observed(self.tracker.tracks());

        let Some(layout) = self.layout.as_ref() else {
            return TickReport::idle(self.phase, self.score, events);
        };
        let resolution = self
            .resolver
            .resolve(&scorable, layout, &mut self.scoring, now, &mut self.rng);

        self.score = resolution.apply_to(self.score);

        for event in &resolution.events {
            if let ScoringEvent::ZoneScored {
                track_id,
                points,
                bonus,
            } = *event
            {
                events.push(GameEvent::BallScored {
                    track_id,
                    points,
                    bonus,
                });
            }
        }
        if resolution.special_triggered {
            tracing::info!(score = self.score, "special zone doubled the score");
            events.push(GameEvent::SpecialZoneDoubled { score: self.score });
        }
        if let Some(kind) = resolution.power_up_triggered() {
            events.push(GameEvent::PowerUpTriggered { kind });
            self.activate_power_up(kind, now);
        }

        if self.mode == GameMode::Classic {
            self.check_high_score(&mut events);
        }

        TickReport {
            phase: self.phase,
            tracks: self.tracker.tracks().to_vec(),
            score_delta: resolution.score_delta,
            score: self.score,
            scored_positions: resolution.scored_positions,
            events,
            time_remaining: self.countdown.map(|c| c.remaining(now)),
            active_power_up: self
                .scoring
                .active_power_up()
                .copied()
                .filter(|p| p.is_active(now)),
            power_up_zone: self
                .scoring
                .power_up_zone()
                .copied()
                .filter(|z| z.is_active(now)),
        }
    }

    fn apply_pending(&mut self, now: Duration, events: &mut Vec<GameEvent>) {
        let pending = std::mem::take(&mut self.pending);

        if pending.recalibrate {
            tracing::info!("recalibration requested");
            self.layout = None;
            self.draft = CalibrationDraft::default();
            self.reset_play();
            self.set_phase(Phase::Calibrating, events);
        }

        if let Some(layout) = pending.layout {
            tracing::info!(zones = layout.len(), "zone layout loaded");
            self.layout = Some(layout);
            self.draft = CalibrationDraft::default();
            self.reset_play();
            self.set_phase(Phase::Scoring, events);
        }

        if pending.save_zones && self.phase == Phase::Calibrating {
            let draft = std::mem::take(&mut self.draft);
            match ZoneLayout::new(draft.zones, draft.special) {
                Ok(layout) => {
                    tracing::info!(zones = layout.len(), "calibration saved");
                    self.layout = Some(layout);
                    self.reset_play();
                    self.set_phase(Phase::Scoring, events);
                }
                Err(err) => {
                    tracing::warn!(%err, "calibration could not be saved");
                }
            }
        }

        if let Some(mode) = pending.new_game {
            tracing::info!(?mode, "new game");
            self.mode = mode;
            self.score = 0;
            self.reset_play();
            if self.phase == Phase::GameOver {
                self.set_phase(Phase::Scoring, events);
            }
        }

        let timed = self.phase == Phase::Scoring && self.mode == GameMode::Timed;
        if timed && self.countdown.is_none() {
            let duration = self.config.session.timed_duration();
            self.countdown = Some(Countdown::start(now, duration));
        }
    }

    /// Tracker, scored IDs, cooldown, power-ups and countdown.
    fn reset_play(&mut self) {
        self.tracker.reset();
        self.scoring.reset();
        self.countdown = None;
        self.last_power_up_spawn = None;
        self.high_score_announced = false;
    }

    fn set_phase(&mut self, to: Phase, events: &mut Vec<GameEvent>) {
        if self.phase != to {
            events.push(GameEvent::PhaseChanged {
                from: self.phase,
                to,
            });
            self.phase = to;
        }
    }

    fn finish_timed_game(&mut self, events: &mut Vec<GameEvent>) {
        tracing::info!(score = self.score, "timed game over");
        self.set_phase(Phase::GameOver, events);
        events.push(GameEvent::GameOver { score: self.score });
        self.check_high_score(events);
    }

    fn check_high_score(&mut self, events: &mut Vec<GameEvent>) {
        if !self.high_score_announced && self.score > self.leaderboard.best_score() {
            self.high_score_announced = true;
            tracing::info!(score = self.score, "new high score");
            events.push(GameEvent::NewHighScore { score: self.score });
        }
    }

    /// Expire timed effects and spawn a fresh power-up zone when one is due.
    fn refresh_power_ups(&mut self, now: Duration) {
        if let Some(active) = self.scoring.active_power_up().copied() {
            if !active.is_active(now) {
                tracing::debug!(kind = ?active.kind, "power-up expired");
                self.scoring.set_active_power_up(None);
            }
        }

        if !self.config.power_up.enabled {
            return;
        }

        let zone_active = self
            .scoring
            .power_up_zone()
            .is_some_and(|z| z.is_active(now));
        let due = self
            .last_power_up_spawn
            .is_none_or(|last| now.saturating_sub(last) >= self.config.power_up.spawn_interval());
        if zone_active || !due {
            return;
        }

        let Some(layout) = self.layout.as_ref() else {
            return;
        };
        let duration = self.config.power_up.zone_duration();
        let zone = PowerUpZone::spawn(layout, now, duration, &mut self.rng);
        if let Some(zone) = zone {
            tracing::debug!(x = zone.center.x, y = zone.center.y, "power-up zone spawned");
            self.scoring.set_power_up_zone(Some(zone));
            self.last_power_up_spawn = Some(now);
        }
    }

    /// A triggered power-up only takes effect when none is already running.
    fn activate_power_up(&mut self, kind: PowerUpKind, now: Duration) {
        if self
            .scoring
            .active_power_up()
            .is_some_and(|p| p.is_active(now))
        {
            tracing::debug!(?kind, "power-up ignored, another one is active");
            return;
        }

        if kind == PowerUpKind::ExtraTime {
            let Some(countdown) = self.countdown.as_mut() else {
                tracing::debug!("extra time ignored outside a timed game");
                return;
            };
            countdown.extend(self.config.power_up.extra_time());
        }

        let active = ActivePowerUp::new(kind, now, &self.config.power_up);
        self.scoring.set_active_power_up(Some(active));
    }

    fn bonus_ball_limit(&self, now: Duration) -> usize {
        let boosted = self
            .scoring
            .active_power_up()
            .is_some_and(|p| p.kind == PowerUpKind::DoubleBalls && p.is_active(now));
        if boosted {
            self.config.session.boosted_bonus_ball_limit
        } else {
            self.config.session.bonus_ball_limit
        }
    }

    /// Drop malformed candidates and cap bonus-color balls per frame.
    fn filter_candidates(&self, candidates: &[Detection], now: Duration) -> Vec<Detection> {
        let bonus_color = self.config.scoring.bonus_color;
        let mut bonus_left = self.bonus_ball_limit(now);
        let mut kept = Vec::with_capacity(candidates.len());

        for det in candidates {
            if !det.is_well_formed() {
                tracing::warn!(?det, "dropping malformed detection");
                continue;
            }
            if det.color == bonus_color {
                if bonus_left == 0 {
                    continue;
                }
                bonus_left -= 1;
            }
            kept.push(*det);
        }
        kept
    }
}
