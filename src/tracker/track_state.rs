/// Per-tick visibility of a live track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrackState {
    /// Matched to a detection in the most recent frame
    #[default]
    Tracked,
    /// Not seen in the most recent frame, still inside the disappearance budget
    Lost,
}
