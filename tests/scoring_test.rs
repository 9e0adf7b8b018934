use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::StdRng;
use whiffle_track::scoring::{ScorableTrack, ScoringState};
use whiffle_track::{
    ColorTag, Detection, GameConfig, GameEvent, GameMode, GameSession, Phase, ScoringConfig,
    ScoringResolver, ScoringZone, TrackId, ZoneLayout,
};

fn secs(s: u64) -> Duration {
    Duration::from_secs(s)
}

fn config() -> GameConfig {
    let mut config = GameConfig::default();
    config.power_up.enabled = false;
    config
}

fn layout() -> ZoneLayout {
    ZoneLayout::new(
        vec![ScoringZone::new(100.0, 100.0, 20.0, 50), ScoringZone::new(250.0, 100.0, 20.0, 10)],
        Some(ScoringZone::new(400.0, 400.0, 30.0, 0)),
    )
    .unwrap()
}

fn session() -> GameSession {
    let mut session = GameSession::seeded(config(), 11);
    session.load_layout(layout());
    session
}

fn white(x: f32, y: f32) -> Detection {
    Detection::new(x, y, 5.0, ColorTag::Primary)
}

fn red(id: TrackId, x: f32, y: f32) -> ScorableTrack {
    ScorableTrack::new(id, x, y, 5.0, ColorTag::Accent)
}

#[test]
fn test_score_once_then_recalibrate() {
    let mut session = session();

    let first = session.tick(&[white(100.0, 100.0)], secs(1));
    assert_eq!(first.score_delta, 50);
    let id = first.tracks[0].track_id;
    assert!(session.scoring_state().scored().contains(id));

    let second = session.tick(&[white(100.0, 100.0)], secs(2));
    assert_eq!(second.score_delta, 0);
    assert_eq!(second.score, 50);

    // Re-calibration wipes the zones, so reload the same layout.
    session.recalibrate();
    session.tick(&[], secs(3));
    assert_eq!(session.phase(), Phase::Calibrating);
    assert!(session.scoring_state().scored().is_empty());

    // Re-calibration keeps the cumulative score; only a new game resets it.
    assert_eq!(session.score(), 50);
    session.load_layout(layout());
    let third = session.tick(&[white(100.0, 100.0)], secs(4));
    assert_eq!(third.score_delta, 50);
    assert_eq!(third.score, 100);

    session.new_game(GameMode::Classic);
    assert_eq!(session.tick(&[], secs(5)).score, 0);
}

#[test]
fn test_resting_ball_never_scores_twice() {
    let mut session = session();
    let mut total = 0;
    for t in 0..200 {
        let jitter = (t % 3) as f32 - 1.0;
        total += session
            .tick(&[white(100.0 + jitter, 100.0)], Duration::from_millis(33 * t))
            .score_delta;
    }
    assert_eq!(total, 50);
    assert_eq!(session.score(), 50);
}

#[test]
fn test_cooldown_gating() {
    let resolver = ScoringResolver::new(ScoringConfig::default());
    let layout = layout();
    let mut state = ScoringState::new(resolver.config());
    let mut rng = StdRng::seed_from_u64(0);

    let hit = |id, now, state: &mut ScoringState, rng: &mut StdRng| {
        resolver
            .resolve(&[red(id, 100.0, 100.0)], &layout, state, now, rng)
            .score_delta
    };

    assert_eq!(hit(1, Duration::ZERO, &mut state, &mut rng), 100);
    // Inside the 2s window: base points only
    assert_eq!(hit(2, Duration::from_millis(1500), &mut state, &mut rng), 50);
    // Cooldown elapsed since the first bonus
    assert_eq!(hit(3, secs(2), &mut state, &mut rng), 100);
}

#[test]
fn test_special_zone_doubles_once_per_tick() {
    let mut session = session();
    session.tick(&[white(100.0, 100.0), white(250.0, 100.0)], secs(1));
    assert_eq!(session.score(), 60);

    let report = session.tick(
        &[
            white(100.0, 100.0),
            white(250.0, 100.0),
            white(395.0, 400.0),
            white(405.0, 400.0),
            white(400.0, 410.0),
        ],
        secs(2),
    );
    assert_eq!(report.score, 120);
    assert_eq!(
        report
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::SpecialZoneDoubled { .. }))
            .count(),
        1
    );
}

#[test]
fn test_doubling_precedes_round_delta() {
    let mut session = session();
    session.tick(&[white(100.0, 100.0)], secs(1));
    assert_eq!(session.score(), 50);

    // New ball in the special zone and a new ball in the 10-point zone.
    let report = session.tick(
        &[white(100.0, 100.0), white(400.0, 400.0), white(250.0, 100.0)],
        secs(2),
    );
    assert_eq!(report.score_delta, 10);
    assert_eq!(report.score, 110);
}

#[test]
fn test_ball_outside_every_zone_is_not_consumed() {
    let mut session = session();
    let report = session.tick(&[white(600.0, 50.0)], secs(1));
    assert_eq!(report.score_delta, 0);
    assert!(session.scoring_state().scored().is_empty());

    // The same track later rolls into a zone and scores.
    let report = session.tick(&[white(250.0, 100.0)], secs(2));
    assert_eq!(report.score_delta, 10);
}

#[test]
fn test_zone_layout_json_round_trip_through_session() {
    let json = r#"[
        {"x": 100, "y": 100, "points": 50},
        {"x": 250, "y": 100, "points": 10},
        {"x": 400, "y": 400, "points": 0, "special": true}
    ]"#;
    let layout = ZoneLayout::from_json(json, 20.0).unwrap();
    assert_eq!(layout.zones().len(), 2);
    assert!(layout.special().is_some());

    let mut session = GameSession::seeded(config(), 5);
    session.load_layout(layout);
    let report = session.tick(&[white(101.0, 99.0)], secs(1));
    assert_eq!(report.score, 50);
}
