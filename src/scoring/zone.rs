//! Scoring zone geometry and the persisted layout format.

use nalgebra::Point2;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// A circular hole on the board worth a fixed number of points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringZone {
    pub center: Point2<f32>,
    pub radius: f32,
    pub points: u32,
}

impl ScoringZone {
    pub fn new(x: f32, y: f32, radius: f32, points: u32) -> Self {
        Self {
            center: Point2::new(x, y),
            radius,
            points,
        }
    }

    /// Whether `point` lies inside the zone, boundary included.
    #[inline]
    pub fn contains(&self, point: &Point2<f32>) -> bool {
        nalgebra::distance(&self.center, point) <= self.radius
    }
}

/// One persisted zone record: `{"x": 120, "y": 80, "points": 50}` with an
/// optional `"special": true` marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneRecord {
    pub x: i32,
    pub y: i32,
    pub points: u32,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub special: bool,
}

/// Immutable snapshot of the calibrated board.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ZoneLayout {
    zones: Vec<ScoringZone>,
    special: Option<ScoringZone>,
}

impl ZoneLayout {
    /// Build a validated layout.
    pub fn new(zones: Vec<ScoringZone>, special: Option<ScoringZone>) -> Result<Self, ConfigError> {
        let layout = Self { zones, special };
        layout.validate()?;
        Ok(layout)
    }

    /// Build a layout from persisted records, giving every zone `radius`.
    pub fn from_records(records: &[ZoneRecord], radius: f32) -> Result<Self, ConfigError> {
        let mut zones = Vec::with_capacity(records.len());
        let mut special = None;

        for record in records {
            let zone = ScoringZone::new(record.x as f32, record.y as f32, radius, record.points);
            if record.special {
                if special.is_some() {
                    return Err(ConfigError::DuplicateSpecialZone);
                }
                special = Some(zone);
            } else {
                zones.push(zone);
            }
        }

        Self::new(zones, special)
    }

    pub fn from_json(json: &str, radius: f32) -> Result<Self, ConfigError> {
        let records: Vec<ZoneRecord> = serde_json::from_str(json)?;
        Self::from_records(&records, radius)
    }

    /// Regular zones first, special zone last.
    pub fn to_records(&self) -> Vec<ZoneRecord> {
        let record = |zone: &ScoringZone, special: bool| ZoneRecord {
            x: zone.center.x.round() as i32,
            y: zone.center.y.round() as i32,
            points: zone.points,
            special,
        };

        self.zones
            .iter()
            .map(|z| record(z, false))
            .chain(self.special.iter().map(|z| record(z, true)))
            .collect()
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(&self.to_records())?)
    }

    /// Regular zones in stored (priority) order.
    pub fn zones(&self) -> &[ScoringZone] {
        &self.zones
    }

    pub fn special(&self) -> Option<&ScoringZone> {
        self.special.as_ref()
    }

    /// Regular zones plus the special zone, if any.
    pub fn len(&self) -> usize {
        self.zones.len() + usize::from(self.special.is_some())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.is_empty() {
            return Err(ConfigError::EmptyLayout);
        }

        for zone in self.zones.iter().chain(self.special.iter()) {
            if !zone.radius.is_finite() || zone.radius <= 0.0 {
                return Err(ConfigError::InvalidRadius(zone.radius));
            }
        }

        // Power-up zones are spawned on regular zones, so a regular zone inside
        // the special zone would make the two effects ambiguous.
        if let Some(special) = &self.special {
            if let Some(zone) = self.zones.iter().find(|z| special.contains(&z.center)) {
                return Err(ConfigError::SpecialZoneOverlap {
                    x: zone.center.x,
                    y: zone.center.y,
                });
            }
        }

        Ok(())
    }
}
