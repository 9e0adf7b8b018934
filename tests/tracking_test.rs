use whiffle_track::tracker::MatchStrategy;
use whiffle_track::{CentroidTracker, ColorTag, Detection, TrackId, TrackerConfig};

fn ball(x: f32, y: f32) -> Detection {
    Detection::new(x, y, 5.0, ColorTag::Primary)
}

fn ids(tracker: &CentroidTracker) -> Vec<TrackId> {
    tracker.tracks().iter().map(|t| t.track_id).collect()
}

#[test]
fn test_basic_tracking() {
    let mut tracker = CentroidTracker::new(TrackerConfig::default());

    // Frame 1: two balls register in detection order
    let objects = tracker.update(&[ball(100.0, 100.0), ball(300.0, 300.0)]);
    assert_eq!(objects.len(), 2);
    assert_eq!(ids(&tracker), vec![0, 1]);

    // Frame 2: both moved slightly, listed in reverse order
    tracker.update(&[ball(305.0, 302.0), ball(104.0, 101.0)]);
    let objects = tracker.objects();
    assert_eq!(objects[&0].x, 104.0);
    assert_eq!(objects[&1].x, 305.0);

    // Frame 3: one ball leaves the frame
    tracker.update(&[ball(108.0, 102.0)]);
    let lost = tracker.tracks().iter().find(|t| t.track_id == 1).unwrap();
    assert_eq!(lost.missed_frames, 1);
    assert_eq!(lost.position.x, 305.0);

    // Frame 4: a ball reappears near the coasting track and takes it back
    tracker.update(&[ball(108.0, 102.0), ball(310.0, 305.0)]);
    assert_eq!(ids(&tracker), vec![0, 1]);
    assert!(tracker.tracks().iter().all(|t| t.missed_frames == 0));
}

#[test]
fn test_reappearance_after_deregistration_gets_higher_id() {
    let mut tracker = CentroidTracker::new(TrackerConfig::default());
    tracker.update(&[ball(100.0, 100.0)]);
    let first = ids(&tracker)[0];

    for _ in 0..5 {
        tracker.update(&[]);
        assert_eq!(tracker.tracks().len(), 1);
    }
    // Sixth consecutive miss exceeds max_disappeared = 5
    tracker.update(&[]);
    assert!(tracker.tracks().is_empty());

    tracker.update(&[ball(100.0, 100.0)]);
    let second = ids(&tracker)[0];
    assert!(second > first);
}

#[test]
fn test_ids_strictly_increase_across_churn() {
    let mut tracker = CentroidTracker::new(TrackerConfig {
        max_disappeared: 0,
        ..TrackerConfig::default()
    });

    let mut seen: Vec<TrackId> = Vec::new();
    for frame in 0..10 {
        // Alternate between a ball and an empty frame so each one is new.
        if frame % 2 == 0 {
            tracker.update(&[ball(50.0, 50.0)]);
            seen.extend(ids(&tracker));
        } else {
            tracker.update(&[]);
        }
    }

    assert_eq!(seen.len(), 5);
    assert!(seen.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_reset_keeps_ids_retired() {
    let mut tracker = CentroidTracker::new(TrackerConfig::default());
    tracker.update(&[ball(10.0, 10.0), ball(20.0, 20.0)]);
    tracker.reset();
    assert!(tracker.tracks().is_empty());

    tracker.update(&[ball(10.0, 10.0)]);
    assert_eq!(ids(&tracker), vec![2]);
}

#[test]
fn test_greedy_is_deterministic_with_ties() {
    // Two tracks equidistant from two detections
    let frames = [
        vec![ball(0.0, 0.0), ball(10.0, 0.0)],
        vec![ball(5.0, 5.0), ball(5.0, -5.0)],
        vec![ball(5.0, 0.0)],
        vec![ball(0.0, 0.0), ball(10.0, 0.0), ball(5.0, 5.0)],
    ];

    let run = || {
        let mut tracker = CentroidTracker::new(TrackerConfig::default());
        frames
            .iter()
            .map(|dets| tracker.update(dets))
            .collect::<Vec<_>>()
    };

    assert_eq!(run(), run());
}

#[test]
fn test_optimal_strategy_minimizes_total_distance() {
    let frames = [
        vec![ball(0.0, 0.0), ball(2.0, 0.0)],
        vec![ball(1.5, 0.0), ball(5.0, 0.0)],
    ];
    let run = |strategy| {
        let mut tracker = CentroidTracker::new(TrackerConfig {
            strategy,
            ..TrackerConfig::default()
        });
        for dets in &frames {
            tracker.update(dets);
        }
        tracker.objects()
    };

    // Greedy takes the closest pair first and leaves track 0 a long hop.
    let greedy = run(MatchStrategy::Greedy);
    assert_eq!(greedy[&0].x, 5.0);
    assert_eq!(greedy[&1].x, 1.5);

    let optimal = run(MatchStrategy::Optimal);
    assert_eq!(optimal[&0].x, 1.5);
    assert_eq!(optimal[&1].x, 5.0);
}
