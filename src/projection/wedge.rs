//! Visibility wedges used as clip regions for day/night shading
//!
//! A wedge is a pie slice anchored on Earth's surface and opening toward the
//! observer's zenith. It reaches well past the canvas so that, used as a clip
//! path, it cuts the whole scene along its two straight edges.

use super::path::PathData;
use super::VIEW_SIZE;
use crate::coordinates::{polar_offset, screen_direction, AngularPosition, ScreenPoint};
use std::f64::consts::FRAC_PI_2;

/// Half-angle of the full visible hemisphere
pub const HEMISPHERE_HALF_ANGLE_DEG: f64 = 90.0;
/// Half-angle of the practical visibility cone, excluding the horizon band
pub const PRACTICAL_HALF_ANGLE_DEG: f64 = 75.0;
/// Wedge radius, comfortably larger than the canvas diagonal from any anchor
pub const WEDGE_RADIUS: f64 = 2.0 * VIEW_SIZE;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibilityWedge {
    pub anchor: ScreenPoint,
    pub direction: AngularPosition,
    /// Half-angle in radians
    pub half_angle: f64,
    pub radius: f64,
}

impl VisibilityWedge {
    pub fn new(anchor: ScreenPoint, direction: AngularPosition, half_angle_deg: f64) -> Self {
        Self {
            anchor,
            direction,
            half_angle: half_angle_deg.to_radians(),
            radius: WEDGE_RADIUS,
        }
    }

    /// Outer corner on the clockwise edge (`direction - half_angle`)
    pub fn start_point(&self) -> ScreenPoint {
        polar_offset(self.anchor, self.radius, self.direction.radians() - self.half_angle)
    }

    /// Outer corner on the counter-clockwise edge (`direction + half_angle`)
    pub fn end_point(&self) -> ScreenPoint {
        polar_offset(self.anchor, self.radius, self.direction.radians() + self.half_angle)
    }

    /// Whether the outer arc spans more than a semicircle
    pub fn large_arc(&self) -> bool {
        self.half_angle >= FRAC_PI_2
    }

    /// Closed pie-slice outline
    ///
    /// The arc runs counter-clockwise in angle terms, which is the
    /// non-positive sweep direction once Y points down.
    pub fn to_path(&self) -> PathData {
        PathData::new()
            .move_to(self.anchor)
            .line_to(self.start_point())
            .arc_to(self.radius, self.large_arc(), false, self.end_point())
            .close()
    }

    /// Area centroid of the circular sector
    pub fn centroid(&self) -> ScreenPoint {
        let distance = if self.half_angle > 0.0 {
            2.0 * self.radius * self.half_angle.sin() / (3.0 * self.half_angle)
        } else {
            2.0 * self.radius / 3.0
        };
        self.anchor + screen_direction(self.direction.radians()) * distance
    }

    /// True when `p` lies inside the wedge (ignoring the outer arc)
    pub fn contains_direction_of(&self, p: &ScreenPoint) -> bool {
        let v = *p - self.anchor;
        if v.norm() == 0.0 {
            return true;
        }
        let along = v.normalize().dot(&screen_direction(self.direction.radians()));
        along >= self.half_angle.cos() - 1e-12
    }
}
