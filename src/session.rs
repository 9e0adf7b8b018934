//! Game session state: calibration, scoring, timed games and high scores.

mod countdown;
mod game;
mod leaderboard;
mod phase;
mod report;

pub use countdown::Countdown;
pub use game::GameSession;
pub use leaderboard::{Leaderboard, LeaderboardEntry};
pub use phase::{GameMode, Phase, SessionCommand};
pub use report::{GameEvent, TickReport};
