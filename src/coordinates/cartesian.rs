//! # Screen Cartesian Module
//!
//! Scene coordinates are 2D with the origin at the top-left corner of the
//! canvas and Y increasing downward, as in any raster or SVG surface. Orbital
//! angles follow the mathematical convention instead (counter-clockwise from
//! +X with Y up), so every conversion from an angle to a screen vector flips
//! the sign of the Y component.
//!
//! ```rust
//! use solarview::coordinates::cartesian::{polar_offset, screen_direction};
//! use nalgebra::Point2;
//! use std::f64::consts::FRAC_PI_2;
//!
//! // 90° points straight up the screen
//! let up = screen_direction(FRAC_PI_2);
//! assert!(up.x.abs() < 1e-12 && (up.y + 1.0).abs() < 1e-12);
//!
//! let p = polar_offset(Point2::new(400.0, 400.0), 10.0, 0.0);
//! assert_eq!(p, Point2::new(410.0, 400.0));
//! ```

use nalgebra::{Point2, Vector2};

/// A point in scene coordinates
pub type ScreenPoint = Point2<f64>;

/// Unit vector on screen for a counter-clockwise angle in radians
pub fn screen_direction(angle: f64) -> Vector2<f64> {
    Vector2::new(angle.cos(), -angle.sin())
}

/// Point at `radius` from `origin` along a counter-clockwise angle
pub fn polar_offset(origin: ScreenPoint, radius: f64, angle: f64) -> ScreenPoint {
    origin + screen_direction(angle) * radius
}

/// Counter-clockwise angle of a screen-space vector
pub fn screen_angle(v: &Vector2<f64>) -> f64 {
    (-v.y).atan2(v.x)
}
