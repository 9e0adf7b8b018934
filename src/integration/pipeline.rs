//! Pipelines that feed a detection backend into a game session.

use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::integration::queue::{BatchReceiver, Latest, batch_channel};
use crate::integration::{BallSource, IntoDetections};
use crate::session::{GameSession, TickReport};
use crate::tracker::Detection;

use crate::error::PipelineError;

/// Detection and session on the same thread.
pub struct GamePipeline<S: BallSource> {
    source: S,
    session: GameSession,
}

impl<S: BallSource> GamePipeline<S> {
    /// Create a new pipeline with the given ball source and session.
    pub fn new(source: S, session: GameSession) -> Self {
        Self { source, session }
    }

    /// Detect balls in one frame and run a session tick on them.
    ///
    /// # Arguments
    /// * `frame` - Raw image bytes
    /// * `width` - Image width in pixels
    /// * `height` - Image height in pixels
    /// * `now` - Wall-clock timestamp of the frame
    pub fn process_frame(
        &mut self,
        frame: &[u8],
        width: u32,
        height: u32,
        now: Duration,
    ) -> Result<TickReport, PipelineError<S::Error>> {
        let detections = self
            .source
            .detect(frame, width, height)
            .map_err(PipelineError::Detection)?;
        Ok(self.session.tick(&detections.into_detections(), now))
    }

    /// Get a reference to the underlying source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Get a mutable reference to the underlying source.
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    /// Get a mutable reference to the session, e.g. to issue reset commands.
    pub fn session_mut(&mut self) -> &mut GameSession {
        &mut self.session
    }
}

/// A raw frame handed to a background detection worker.
#[derive(Debug, Clone)]
pub struct Frame {
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

/// Run `source` over `frames` on a background thread, pushing each batch into
/// a bounded queue of `capacity` batches.
pub fn spawn_detection_worker<S, I>(
    mut source: S,
    frames: I,
    capacity: usize,
) -> (BatchReceiver, JoinHandle<Result<(), S::Error>>)
where
    S: BallSource + Send + 'static,
    S::Error: Send,
    I: IntoIterator<Item = Frame>,
    I::IntoIter: Send + 'static,
{
    let (tx, rx) = batch_channel(capacity);
    let frames = frames.into_iter();

    let handle = thread::spawn(move || -> Result<(), S::Error> {
        for frame in frames {
            let batch = source.detect(&frame.data, frame.width, frame.height)?;
            if !tx.push(batch) {
                tracing::debug!("detection worker: consumer gone, stopping");
                break;
            }
        }
        tracing::debug!("detection worker finished");
        Ok(())
    });

    (rx, handle)
}

/// Session fed from a background detection worker.
///
/// Each tick uses the newest complete batch. When no new batch arrived the
/// previous one is reused, so a slow detector does not age tracks.
pub struct BatchedPipeline {
    receiver: BatchReceiver,
    session: GameSession,
    current: Vec<Detection>,
}

impl BatchedPipeline {
    pub fn new(receiver: BatchReceiver, session: GameSession) -> Self {
        Self {
            receiver,
            session,
            current: Vec::new(),
        }
    }

    pub fn tick(
        &mut self,
        now: Duration,
    ) -> Result<TickReport, PipelineError<std::convert::Infallible>> {
        match self.receiver.latest() {
            Latest::Batch { batch, .. } => self.current = batch,
            Latest::Empty => {}
            Latest::Disconnected => return Err(PipelineError::Disconnected),
        }
        Ok(self.session.tick(&self.current, now))
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut GameSession {
        &mut self.session
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::scoring::{ScoringZone, ZoneLayout};
    use crate::tracker::ColorTag;

    struct MockSource {
        detections: Vec<Detection>,
    }

    impl BallSource for MockSource {
        type Error = std::convert::Infallible;

        fn detect(
            &mut self,
            _frame: &[u8],
            _width: u32,
            _height: u32,
        ) -> Result<Vec<Detection>, Self::Error> {
            Ok(self.detections.clone())
        }
    }

    #[derive(Debug, thiserror::Error)]
    #[error("camera unplugged")]
    struct Unplugged;

    struct FailingSource;

    impl BallSource for FailingSource {
        type Error = Unplugged;

        fn detect(
            &mut self,
            _frame: &[u8],
            _width: u32,
            _height: u32,
        ) -> Result<Vec<Detection>, Self::Error> {
            Err(Unplugged)
        }
    }

    fn session() -> GameSession {
        let mut config = GameConfig::default();
        config.power_up.enabled = false;
        let mut session = GameSession::seeded(config, 0);
        let layout = ZoneLayout::new(vec![ScoringZone::new(100.0, 100.0, 20.0, 50)], None).unwrap();
        session.load_layout(layout);
        session
    }

    #[test]
    fn test_game_pipeline() {
        let source = MockSource {
            detections: vec![Detection::new(100.0, 100.0, 5.0, ColorTag::Primary)],
        };

        let mut pipeline = GamePipeline::new(source, session());
        let report = pipeline.process_frame(&[], 640, 480, Duration::from_secs(1)).unwrap();
        assert_eq!(report.score_delta, 50);
        assert_eq!(report.tracks.len(), 1);
    }

    #[test]
    fn test_detection_error_surfaces() {
        let mut pipeline = GamePipeline::new(FailingSource, session());
        let err = pipeline.process_frame(&[], 640, 480, Duration::ZERO).unwrap_err();
        assert_eq!(err.to_string(), "detection failed: camera unplugged");
        assert_eq!(pipeline.session().score(), 0);
    }

    #[test]
    fn test_worker_feeds_batched_pipeline() {
        let source = MockSource {
            detections: vec![Detection::new(100.0, 100.0, 5.0, ColorTag::Primary)],
        };
        let frames = vec![
            Frame {
                data: Vec::new(),
                width: 640,
                height: 480,
            };
            3
        ];

        let (rx, handle) = spawn_detection_worker(source, frames, 4);
        handle.join().unwrap().unwrap();

        let mut pipeline = BatchedPipeline::new(rx, session());
        let report = pipeline.tick(Duration::from_secs(1)).unwrap();
        assert_eq!(report.score, 50);

        // The worker is done; nothing queued and the sender is gone.
        assert!(matches!(
            pipeline.tick(Duration::from_secs(2)),
            Err(PipelineError::Disconnected)
        ));
    }
}
