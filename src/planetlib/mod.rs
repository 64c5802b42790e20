//! Planetary ephemeris calculations module
//!
//! Positions come from a circular mean-motion model: each body sweeps its
//! orbit at a constant angular rate starting from its mean longitude at
//! J2000.0. There is no eccentricity, inclination or perturbation, which is
//! plenty for a top-down view of the solar system.

use crate::constants::{DEG2RAD, TAU};
use crate::coordinates::AngularPosition;
use crate::time::Timestamp;
use crate::SolarViewError;
use lazy_static::lazy_static;
use serde::Serialize;
use std::collections::HashMap;
use std::str::FromStr;

/// Enum representing the bodies shown in the view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Body {
    Sun,
    Mercury,
    Venus,
    Earth,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
    Moon,
}

/// Fixed orbital and display properties of one body
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CelestialBodyConstant {
    pub body: Body,
    /// Mean orbital distance in AU (Sun: 0, Moon: distance from Earth)
    pub distance_au: f64,
    /// Sidereal period in days
    pub orbital_period_days: f64,
    /// Mean longitude at the J2000.0 epoch, degrees
    pub mean_longitude_j2000_deg: f64,
    /// Display color as a `#rrggbb` hex string
    pub color: &'static str,
    /// Rendered radius in pixels, independent of physical size
    pub display_radius_px: f64,
}

pub const SUN: CelestialBodyConstant = CelestialBodyConstant {
    body: Body::Sun,
    distance_au: 0.0,
    orbital_period_days: 0.0,
    mean_longitude_j2000_deg: 0.0,
    color: "#ffd700",
    display_radius_px: 16.0,
};

// Mean longitudes at J2000 epoch (degrees) and orbital periods (days)
// Sources: NASA planetary fact sheets
/// The eight planets, ordered by ascending distance from the Sun
pub const PLANETS: [CelestialBodyConstant; 8] = [
    CelestialBodyConstant {
        body: Body::Mercury,
        distance_au: 0.39,
        orbital_period_days: 87.97,
        mean_longitude_j2000_deg: 252.25,
        color: "#b0b0b0",
        display_radius_px: 6.0,
    },
    CelestialBodyConstant {
        body: Body::Venus,
        distance_au: 0.72,
        orbital_period_days: 224.7,
        mean_longitude_j2000_deg: 181.98,
        color: "#e8cda0",
        display_radius_px: 9.0,
    },
    CelestialBodyConstant {
        body: Body::Earth,
        distance_au: 1.0,
        orbital_period_days: 365.25,
        mean_longitude_j2000_deg: 100.46,
        color: "#4a90d9",
        display_radius_px: 10.0,
    },
    CelestialBodyConstant {
        body: Body::Mars,
        distance_au: 1.52,
        orbital_period_days: 687.0,
        mean_longitude_j2000_deg: 355.45,
        color: "#c1440e",
        display_radius_px: 7.0,
    },
    CelestialBodyConstant {
        body: Body::Jupiter,
        distance_au: 5.2,
        orbital_period_days: 4332.6,
        mean_longitude_j2000_deg: 34.4,
        color: "#c88b3a",
        display_radius_px: 25.0,
    },
    CelestialBodyConstant {
        body: Body::Saturn,
        distance_au: 9.58,
        orbital_period_days: 10759.2,
        mean_longitude_j2000_deg: 49.94,
        color: "#e0c080",
        display_radius_px: 20.0,
    },
    CelestialBodyConstant {
        body: Body::Uranus,
        distance_au: 19.22,
        orbital_period_days: 30688.5,
        mean_longitude_j2000_deg: 313.23,
        color: "#7ec8e3",
        display_radius_px: 13.0,
    },
    CelestialBodyConstant {
        body: Body::Neptune,
        distance_au: 30.05,
        orbital_period_days: 60182.0,
        mean_longitude_j2000_deg: 304.88,
        color: "#3f54ba",
        display_radius_px: 13.0,
    },
];

pub const MOON: CelestialBodyConstant = CelestialBodyConstant {
    body: Body::Moon,
    distance_au: 0.00257,
    orbital_period_days: 27.32,
    mean_longitude_j2000_deg: 218.32,
    color: "#cccccc",
    display_radius_px: 5.0,
};

/// Every body, Sun first and Moon last
pub const ALL_BODIES: [Body; 10] = [
    Body::Sun,
    Body::Mercury,
    Body::Venus,
    Body::Earth,
    Body::Mars,
    Body::Jupiter,
    Body::Saturn,
    Body::Uranus,
    Body::Neptune,
    Body::Moon,
];

lazy_static! {
    /// Map from lowercase body names to bodies
    static ref BODY_NAMES: HashMap<&'static str, Body> = {
        let mut m = HashMap::new();
        for body in ALL_BODIES {
            m.insert(body.key(), body);
        }
        m
    };
}

impl Body {
    /// Get the body's name as a string
    pub fn name(&self) -> &'static str {
        match self {
            Body::Sun => "Sun",
            Body::Mercury => "Mercury",
            Body::Venus => "Venus",
            Body::Earth => "Earth",
            Body::Mars => "Mars",
            Body::Jupiter => "Jupiter",
            Body::Saturn => "Saturn",
            Body::Uranus => "Uranus",
            Body::Neptune => "Neptune",
            Body::Moon => "Moon",
        }
    }

    fn key(&self) -> &'static str {
        match self {
            Body::Sun => "sun",
            Body::Mercury => "mercury",
            Body::Venus => "venus",
            Body::Earth => "earth",
            Body::Mars => "mars",
            Body::Jupiter => "jupiter",
            Body::Saturn => "saturn",
            Body::Uranus => "uranus",
            Body::Neptune => "neptune",
            Body::Moon => "moon",
        }
    }

    /// Look up a body by name, ignoring case
    pub fn from_name(name: &str) -> Option<Body> {
        BODY_NAMES.get(name.trim().to_lowercase().as_str()).copied()
    }

    /// The constant table entry for this body
    pub fn constant(&self) -> &'static CelestialBodyConstant {
        match self {
            Body::Sun => &SUN,
            Body::Moon => &MOON,
            Body::Mercury => &PLANETS[0],
            Body::Venus => &PLANETS[1],
            Body::Earth => &PLANETS[2],
            Body::Mars => &PLANETS[3],
            Body::Jupiter => &PLANETS[4],
            Body::Saturn => &PLANETS[5],
            Body::Uranus => &PLANETS[6],
            Body::Neptune => &PLANETS[7],
        }
    }

    /// True for the eight planets
    pub fn is_planet(&self) -> bool {
        !matches!(self, Body::Sun | Body::Moon)
    }
}

impl FromStr for Body {
    type Err = SolarViewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Body::from_name(s).ok_or_else(|| SolarViewError::UnknownBody(s.to_string()))
    }
}

/// Innermost planet distance, the lower end of the radial scale
pub fn min_planet_au() -> f64 {
    PLANETS[0].distance_au
}

/// Outermost planet distance, the upper end of the radial scale
pub fn max_planet_au() -> f64 {
    PLANETS[PLANETS.len() - 1].distance_au
}

/// Mean-motion longitude of an orbiting body at the given instant
pub fn mean_longitude(constant: &CelestialBodyConstant, ts: &Timestamp) -> AngularPosition {
    let days = ts.days_since_j2000();
    let mean_motion = TAU / constant.orbital_period_days;
    AngularPosition::from_radians(constant.mean_longitude_j2000_deg * DEG2RAD + mean_motion * days)
}

/// Angular position of any body at the given instant
///
/// The Sun sits at the origin and always reports the reference direction.
/// The Moon's angle is absolute, not relative to Earth.
pub fn position(body: Body, ts: &Timestamp) -> AngularPosition {
    match body {
        Body::Sun => AngularPosition::ZERO,
        other => mean_longitude(other.constant(), ts),
    }
}

/// Absolute angle of the Moon around Earth
pub fn moon_position(ts: &Timestamp) -> AngularPosition {
    position(Body::Moon, ts)
}
