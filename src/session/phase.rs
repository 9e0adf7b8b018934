use serde::{Deserialize, Serialize};

/// Lifecycle phase of a game session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Zones are being placed; no tracking or scoring
    #[default]
    Calibrating,
    /// Zones are frozen and balls are scored
    Scoring,
    /// Timed game ran out; scoring is frozen until a new game
    GameOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameMode {
    /// Untimed play
    #[default]
    Classic,
    /// Countdown play, ends in `GameOver`
    Timed,
}

/// Reset signals from the surrounding UI. Applied at the start of the next tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionCommand {
    NewGame(GameMode),
    Recalibrate,
}
