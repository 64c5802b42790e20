//! Celestial body definitions and calculations

use crate::coordinates::AngularPosition;
use crate::planetlib::{self, Body, CelestialBodyConstant};
use crate::time::Timestamp;

/// A trait for objects that have an orbital longitude at any instant
pub trait CelestialObject {
    /// Get the angular position of the object at a specific time
    fn position_at(&self, time: &Timestamp) -> AngularPosition;
}

impl CelestialObject for Body {
    fn position_at(&self, time: &Timestamp) -> AngularPosition {
        planetlib::position(*self, time)
    }
}

impl CelestialObject for CelestialBodyConstant {
    fn position_at(&self, time: &Timestamp) -> AngularPosition {
        self.body.position_at(time)
    }
}
