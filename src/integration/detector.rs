//! Trait for ball detection backends.

use crate::tracker::Detection;

/// Trait for the color-mask/contour stage that turns a frame into ball
/// candidates.
///
/// Implement this trait to connect a camera pipeline to a game session.
///
/// # Example
///
/// ```ignore
/// use whiffle_track::{BallSource, Detection};
///
/// struct HsvMaskDetector {
///     // thresholds, morphology kernels, ...
/// }
///
/// impl BallSource for HsvMaskDetector {
///     type Error = std::io::Error;
///
///     fn detect(
///         &mut self,
///         frame: &[u8],
///         width: u32,
///         height: u32,
///     ) -> Result<Vec<Detection>, Self::Error> {
///         // Threshold, find contours, fit enclosing circles
///         Ok(vec![])
///     }
/// }
/// ```
pub trait BallSource {
    /// Error type for detection failures.
    type Error: std::error::Error + 'static;

    /// Run detection on raw frame data and return ball candidates.
    ///
    /// # Arguments
    /// * `frame` - Raw image bytes (format depends on implementation)
    /// * `width` - Image width in pixels
    /// * `height` - Image height in pixels
    fn detect(
        &mut self,
        frame: &[u8],
        width: u32,
        height: u32,
    ) -> Result<Vec<Detection>, Self::Error>;
}

/// Helper trait for converting adapter-specific outputs to `Detection`.
pub trait IntoDetections {
    /// Convert the output into a vector of detections.
    fn into_detections(self) -> Vec<Detection>;
}

impl IntoDetections for Vec<Detection> {
    fn into_detections(self) -> Vec<Detection> {
        self
    }
}

/// `(x, y, radius, color)` tuples, the shape most contour code emits.
impl IntoDetections for Vec<(f32, f32, f32, crate::tracker::ColorTag)> {
    fn into_detections(self) -> Vec<Detection> {
        self.into_iter()
            .map(|(x, y, radius, color)| Detection::new(x, y, radius, color))
            .collect()
    }
}
