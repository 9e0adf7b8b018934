//! A single tracked ball.

use nalgebra::Point2;

use crate::tracker::detection::{ColorTag, Detection};
use crate::tracker::track_state::TrackState;

/// Identity handed out by the tracker. Monotonic, never reused.
pub type TrackId = u64;

/// Single ball track.
#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    /// Unique track identifier
    pub track_id: TrackId,
    /// Last known centroid
    pub position: Point2<f32>,
    /// Radius of the last matched detection
    pub radius: f32,
    /// Color of the last matched detection
    pub color: ColorTag,
    /// Consecutive frames without a matching detection
    pub missed_frames: u32,
    /// Index into the current frame's detections, if matched this frame
    pub detection_index: Option<usize>,
}

impl Track {
    pub(crate) fn new(track_id: TrackId, det: &Detection, detection_index: usize) -> Self {
        Self {
            track_id,
            position: det.centroid(),
            radius: det.radius,
            color: det.color,
            missed_frames: 0,
            detection_index: Some(detection_index),
        }
    }

    pub fn state(&self) -> TrackState {
        if self.missed_frames == 0 {
            TrackState::Tracked
        } else {
            TrackState::Lost
        }
    }

    #[inline]
    pub fn x(&self) -> f32 {
        self.position.x
    }

    #[inline]
    pub fn y(&self) -> f32 {
        self.position.y
    }

    pub(crate) fn update(&mut self, det: &Detection, detection_index: usize) {
        self.position = det.centroid();
        self.radius = det.radius;
        self.color = det.color;
        self.missed_frames = 0;
        self.detection_index = Some(detection_index);
    }

    /// Age the track by one frame. Returns the new miss count.
    pub(crate) fn mark_missed(&mut self) -> u32 {
        self.missed_frames += 1;
        self.detection_index = None;
        self.missed_frames
    }
}
