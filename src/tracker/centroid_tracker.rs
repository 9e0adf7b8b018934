//! Centroid tracker: frame-to-frame identity for detected balls.

use std::collections::BTreeMap;

use nalgebra::Point2;
use serde::Deserialize;

use crate::tracker::detection::Detection;
use crate::tracker::matching::{self, AssignmentResult, MatchStrategy};
use crate::tracker::track::{Track, TrackId};

/// Configuration for the CentroidTracker.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Frames a track may go unmatched before it is deregistered
    pub max_disappeared: u32,
    /// Pairs farther apart than this are never matched
    pub max_distance: Option<f32>,
    pub strategy: MatchStrategy,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            max_disappeared: 5,
            max_distance: None,
            strategy: MatchStrategy::Greedy,
        }
    }
}

pub struct CentroidTracker {
    tracks: Vec<Track>,
    next_id: TrackId,
    frame_id: u64,
    config: TrackerConfig,
}

impl CentroidTracker {
    pub fn new(config: TrackerConfig) -> Self {
        Self {
            tracks: Vec::new(),
            next_id: 0,
            frame_id: 0,
            config,
        }
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    /// Live tracks in registration order.
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Number of frames processed since construction.
    pub fn frame_id(&self) -> u64 {
        self.frame_id
    }

    /// Current `track_id -> position` mapping for every live track.
    pub fn objects(&self) -> BTreeMap<TrackId, Point2<f32>> {
        self.tracks
            .iter()
            .map(|t| (t.track_id, t.position))
            .collect()
    }

    /// Drop every live track. Retired IDs stay retired.
    pub fn reset(&mut self) {
        tracing::debug!(retired = self.tracks.len(), "tracker reset");
        self.tracks.clear();
    }

    /// Associate one frame of detections with the live tracks.
    ///
    /// Callers filter malformed detections first; see [`Detection::is_well_formed`].
    pub fn update(&mut self, detections: &[Detection]) -> BTreeMap<TrackId, Point2<f32>> {
        self.frame_id += 1;

        if detections.is_empty() {
            for track in self.tracks.iter_mut() {
                track.mark_missed();
            }
            self.deregister_stale();
            return self.objects();
        }

        if self.tracks.is_empty() {
            for (idx, det) in detections.iter().enumerate() {
                self.register(det, idx);
            }
            return self.objects();
        }

        let track_points: Vec<Point2<f32>> = self.tracks.iter().map(|t| t.position).collect();
        let det_points: Vec<Point2<f32>> = detections.iter().map(|d| d.centroid()).collect();
        let dists = matching::euclidean_distance(&track_points, &det_points);

        let thresh = self.config.max_distance.unwrap_or(f32::INFINITY);
        let AssignmentResult {
            matches,
            unmatched_tracks,
            unmatched_detections,
        } = matching::assign(&dists, self.config.strategy, thresh);

        for (itrack, idet) in matches {
            self.tracks[itrack].update(&detections[idet], idet);
        }

        for itrack in unmatched_tracks {
            self.tracks[itrack].mark_missed();
        }
        self.deregister_stale();

        for idet in unmatched_detections {
            self.register(&detections[idet], idet);
        }

        tracing::debug!(
            frame = self.frame_id,
            detections = detections.len(),
            live = self.tracks.len(),
            "tracker updated"
        );

        self.objects()
    }

    fn register(&mut self, det: &Detection, detection_index: usize) {
        let track_id = self.next_id;
        self.next_id += 1;
        tracing::debug!(track_id, x = det.x, y = det.y, "registered track");
        self.tracks.push(Track::new(track_id, det, detection_index));
    }

    fn deregister_stale(&mut self) {
        let max_disappeared = self.config.max_disappeared;
        self.tracks.retain(|t| {
            let keep = t.missed_frames <= max_disappeared;
            if !keep {
                tracing::debug!(track_id = t.track_id, "deregistered track");
            }
            keep
        });
    }
}
