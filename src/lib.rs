//! Ball tracking and scoring for a camera-watched whiffle ball board.
//!
//! Each frame, ball candidates from a color-mask detector go through three
//! stages:
//!
//! 1. [`CentroidTracker`] gives every ball a stable ID across frames.
//! 2. [`ScoringResolver`] decides which observed balls score, in priority
//!    order: power-up zone, special zone, then regular zones.
//! 3. [`GameSession`] owns the phase machine (calibrating, scoring, game
//!    over), the cumulative score and the timed-mode countdown.
//!
//! ```ignore
//! use std::time::Duration;
//! use whiffle_track::{ColorTag, Detection, GameConfig, GameSession, ScoringZone, ZoneLayout};
//!
//! let mut session = GameSession::new(GameConfig::default());
//! let layout = ZoneLayout::new(vec![ScoringZone::new(120.0, 80.0, 20.0, 10)], None)?;
//! session.load_layout(layout);
//!
//! let ball = Detection::new(121.0, 79.0, 6.0, ColorTag::Primary);
//! let report = session.tick(&[ball], Duration::from_millis(33));
//! assert_eq!(report.score, 10);
//! ```

pub mod config;
pub mod error;
pub mod integration;
pub mod scoring;
pub mod session;
pub mod tracker;

pub use config::{GameConfig, SessionConfig};
pub use error::{ConfigError, PipelineError};
pub use integration::{BallSource, BatchedPipeline, CandidateBuilder, GamePipeline, IntoDetections};
pub use scoring::{PowerUpKind, ScoringConfig, ScoringResolver, ScoringZone, ZoneLayout};
pub use session::{GameEvent, GameMode, GameSession, Phase, TickReport};
pub use tracker::{CentroidTracker, ColorTag, Detection, Track, TrackId, TrackerConfig};
