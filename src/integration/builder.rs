//! Builder for creating Detection objects from contour measurements.

use crate::tracker::{ColorTag, Detection};

/// Builder for creating `Detection` objects from the shapes detection
/// adapters usually produce.
#[derive(Debug, Clone, Default)]
pub struct CandidateBuilder {
    x: f32,
    y: f32,
    radius: f32,
    color: ColorTag,
}

impl CandidateBuilder {
    /// Create a new candidate builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the enclosing circle (center x, center y, radius).
    pub fn circle(mut self, x: f32, y: f32, radius: f32) -> Self {
        self.x = x;
        self.y = y;
        self.radius = radius;
        self
    }

    /// Set the circle from a contour bounding box in TLWH format.
    ///
    /// The radius is half of the larger side.
    pub fn tlwh(mut self, left: f32, top: f32, w: f32, h: f32) -> Self {
        self.x = left + w / 2.0;
        self.y = top + h / 2.0;
        self.radius = w.max(h) / 2.0;
        self
    }

    /// Set the color class.
    pub fn color(mut self, color: ColorTag) -> Self {
        self.color = color;
        self
    }

    /// Build the final `Detection`.
    pub fn build(self) -> Detection {
        Detection::new(self.x, self.y, self.radius, self.color)
    }
}
