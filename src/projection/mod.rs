//! Projection of orbital quantities onto the 2D canvas
//!
//! The canvas is a fixed square of [`VIEW_SIZE`] scene units with the Sun at
//! its center. Orbital distances are mapped onto a logarithmic radial scale:
//! Neptune orbits roughly 77 times farther out than Mercury, so a linear
//! mapping would crush the inner planets into a few pixels.

pub mod path;
pub mod seasons;
pub mod wedge;

pub use path::{PathData, PathSegment};
pub use seasons::{season_arcs, Hemisphere, Season, SeasonArc};
pub use wedge::VisibilityWedge;

use crate::constants::TAU;
use crate::coordinates::{polar_offset, AngularPosition, ScreenPoint};
use crate::planetlib::{max_planet_au, min_planet_au};
use crate::time::Timestamp;
use nalgebra::Point2;

/// Width and height of the full canvas in scene units
pub const VIEW_SIZE: f64 = 800.0;
/// Canvas center on either axis
pub const CENTER: f64 = VIEW_SIZE / 2.0;
/// Orbit radius of the innermost planet
pub const MIN_RADIUS: f64 = 40.0;
/// Orbit radius of the outermost planet, leaving margin for labels
pub const MAX_RADIUS: f64 = 360.0;

/// The Sun's position, the middle of the canvas
pub fn canvas_center() -> ScreenPoint {
    Point2::new(CENTER, CENTER)
}

/// Log-scale mapping from orbital distance in AU to pixel radius
///
/// The innermost planet lands on [`MIN_RADIUS`] and the outermost on
/// [`MAX_RADIUS`]; the mapping is strictly increasing in between.
pub fn au_to_radius(au: f64) -> f64 {
    let log_min = min_planet_au().ln();
    let log_max = max_planet_au().ln();
    let t = (au.ln() - log_min) / (log_max - log_min);
    MIN_RADIUS + t * (MAX_RADIUS - MIN_RADIUS)
}

/// Screen position of a body at `angle` on an orbit of pixel `radius`
pub fn orbit_point(radius: f64, angle: AngularPosition) -> ScreenPoint {
    polar_offset(canvas_center(), radius, angle.radians())
}

/// Direction of the observer's visible sky in the ecliptic plane
///
/// Earth's rotation is modelled as a linear sweep over the local day: at
/// local midnight the observer faces straight away from the Sun (the orbital
/// angle itself) and at local noon straight toward it (orbital angle + π).
pub fn observer_angle(earth_orbital_angle: AngularPosition, ts: &Timestamp) -> AngularPosition {
    earth_orbital_angle.rotated(ts.local_day_fraction() * TAU)
}

/// The point on a body's rim facing along `angle`
pub fn surface_point(center: ScreenPoint, body_radius: f64, angle: AngularPosition) -> ScreenPoint {
    polar_offset(center, body_radius, angle.radians())
}
