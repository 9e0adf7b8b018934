mod cooldown;
mod power_up;
mod resolver;
mod zone;

pub use cooldown::CooldownTimer;
pub use power_up::{ActivePowerUp, PowerUpConfig, PowerUpKind, PowerUpZone};
pub use resolver::{
    Resolution, ScorableTrack, ScoredSet, ScoringConfig, ScoringEvent, ScoringResolver,
    ScoringState,
};
pub use zone::{ScoringZone, ZoneLayout, ZoneRecord};
