//! Error types surfaced by configuration and the frame pipeline.
//!
//! Tracking and scoring themselves never fail: an unmatched detection or a
//! ball outside every zone is a normal outcome, not an error.

use thiserror::Error;

/// Zone layout, calibration or config problems, reported when they are loaded
/// or edited and never during scoring.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("zone layout has no zones")]
    EmptyLayout,
    #[error("zone layout defines more than one special zone")]
    DuplicateSpecialZone,
    #[error("zone radius must be positive and finite, got {0}")]
    InvalidRadius(f32),
    #[error("{field} must be a finite, non-negative number of seconds, got {value}")]
    InvalidDuration { field: &'static str, value: f64 },
    #[error("zone at ({x}, {y}) overlaps the special zone")]
    SpecialZoneOverlap { x: f32, y: f32 },
    #[error("all {0} zones are already placed")]
    ZoneLimitReached(usize),
    #[error("zones can only be edited while calibrating")]
    NotCalibrating,
    #[error("invalid zone layout json: {0}")]
    Json(#[from] serde_json::Error),
}

/// Error type for a pipeline step.
#[derive(Debug, Error)]
pub enum PipelineError<E: std::error::Error + 'static> {
    #[error("detection failed: {0}")]
    Detection(#[source] E),
    #[error("detection worker disconnected")]
    Disconnected,
}
