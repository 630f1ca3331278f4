//! Closest-encounter classification of a proximity snapshot

use log::{info, warn};
use ordered_float::OrderedFloat;

use crate::common::ProximityReading;

/// Readings above this count as a near miss
pub const NEAR_THRESHOLD: f64 = 0.3;
/// A reading at full intensity means the robot is touching something
pub const CONTACT_THRESHOLD: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Encounter {
    Clear,
    Near(f64),
    Contact,
}

impl Encounter {
    /// Classify a snapshot by its strongest reading
    pub fn classify(readings: &[ProximityReading]) -> Self {
        let closest = closest_reading(readings);
        if closest >= CONTACT_THRESHOLD {
            Encounter::Contact
        } else if closest > NEAR_THRESHOLD {
            Encounter::Near(closest)
        } else {
            Encounter::Clear
        }
    }

    pub fn is_contact(&self) -> bool {
        matches!(self, Encounter::Contact)
    }

    pub fn log(&self) {
        match self {
            Encounter::Contact => warn!("crash"),
            Encounter::Near(value) => info!("closest encounter: {:.3}", value),
            Encounter::Clear => {}
        }
    }
}

/// Strongest reading value, 0 for an empty snapshot
pub fn closest_reading(readings: &[ProximityReading]) -> f64 {
    readings
        .iter()
        .map(|r| OrderedFloat(r.value))
        .max()
        .map_or(0.0, |v| v.into_inner())
}
