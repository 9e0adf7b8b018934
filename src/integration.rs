//! Integration module for connecting ball detection backends with a game
//! session.
//!
//! The camera side (color masks, contours, enclosing circles) lives outside
//! this crate behind the [`BallSource`] trait. Detection can run inline with
//! [`GamePipeline`] or on a worker thread feeding a [`BatchedPipeline`].

mod builder;
mod detector;
mod pipeline;
mod queue;

pub use builder::CandidateBuilder;
pub use detector::{BallSource, IntoDetections};
pub use pipeline::{BatchedPipeline, Frame, GamePipeline, spawn_detection_worker};
pub use queue::{BatchReceiver, BatchSender, Latest, batch_channel};
