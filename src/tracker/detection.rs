//! Per-frame ball candidates handed to the tracker by the detection adapter.

use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// Color class of a detected ball.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorTag {
    /// Regular (white) ball
    #[default]
    Primary,
    /// Bonus (red) ball
    Accent,
}

/// A single ball candidate produced by the detection adapter for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Detection {
    /// Center x in frame pixels
    pub x: f32,
    /// Center y in frame pixels
    pub y: f32,
    /// Enclosing circle radius in pixels
    pub radius: f32,
    /// Color class the candidate was extracted from
    pub color: ColorTag,
}

impl Detection {
    pub fn new(x: f32, y: f32, radius: f32, color: ColorTag) -> Self {
        Self {
            x,
            y,
            radius,
            color,
        }
    }

    #[inline]
    pub fn centroid(&self) -> Point2<f32> {
        Point2::new(self.x, self.y)
    }

    /// Whether the candidate satisfies the tracker's input precondition.
    pub fn is_well_formed(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.radius.is_finite() && self.radius > 0.0
    }
}
