mod centroid_tracker;
mod detection;
mod matching;
mod track;
mod track_state;

pub use centroid_tracker::{CentroidTracker, TrackerConfig};
pub use detection::{ColorTag, Detection};
pub use matching::{AssignmentResult, MatchStrategy, greedy_assignment, linear_assignment};
pub use track::{Track, TrackId};
pub use track_state::TrackState;
