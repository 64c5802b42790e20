//! Season quadrants and their curved label arcs
//!
//! The canvas is split into four 90° quadrants around the Sun, each named for
//! the season the observer's hemisphere experiences while Earth crosses it.
//! Labels follow a circular arc just outside the outermost orbit.

use super::path::PathData;
use super::{canvas_center, MAX_RADIUS};
use crate::coordinates::polar_offset;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Distance of the bottom-half label arcs beyond the outermost orbit
pub const LABEL_MARGIN: f64 = 20.0;
/// Pull-in for the top-half arcs so their glyphs sit as far from the orbit
/// as the bottom-half ones (text hangs outward on one half, inward on the other)
pub const TOP_HALF_INSET: f64 = 36.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Hemisphere {
    #[default]
    North,
    South,
}

impl Hemisphere {
    /// Hemisphere from a geographic latitude in degrees
    pub fn from_latitude(latitude: f64) -> Self {
        if latitude < 0.0 {
            Hemisphere::South
        } else {
            Hemisphere::North
        }
    }
}

impl FromStr for Hemisphere {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "north" | "n" => Ok(Hemisphere::North),
            "south" | "s" => Ok(Hemisphere::South),
            other => Err(format!("unknown hemisphere '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Season {
    Spring,
    Summer,
    Autumn,
    Winter,
}

impl Season {
    pub fn name(&self) -> &'static str {
        match self {
            Season::Spring => "Spring",
            Season::Summer => "Summer",
            Season::Autumn => "Autumn",
            Season::Winter => "Winter",
        }
    }

    /// The season on the same dates in the other hemisphere
    pub fn opposite(&self) -> Season {
        match self {
            Season::Spring => Season::Autumn,
            Season::Summer => Season::Winter,
            Season::Autumn => Season::Spring,
            Season::Winter => Season::Summer,
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Northern quadrants: top-left, top-right, bottom-right, bottom-left
const NORTHERN_QUADRANTS: [(Season, f64, f64); 4] = [
    (Season::Winter, 90.0, 180.0),
    (Season::Autumn, 0.0, 90.0),
    (Season::Summer, 270.0, 360.0),
    (Season::Spring, 180.0, 270.0),
];

/// One quadrant's label arc
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeasonArc {
    pub season: Season,
    pub start_deg: f64,
    pub end_deg: f64,
    pub radius: f64,
}

impl SeasonArc {
    fn new(season: Season, start_deg: f64, end_deg: f64) -> Self {
        let base = MAX_RADIUS + LABEL_MARGIN;
        let mut arc = Self {
            season,
            start_deg,
            end_deg,
            radius: base,
        };
        if arc.is_top_half() {
            arc.radius = base - TOP_HALF_INSET;
        }
        arc
    }

    /// Quadrants above the horizontal divider, angles within [0°, 180°)
    pub fn is_top_half(&self) -> bool {
        self.start_deg >= 0.0 && self.end_deg <= 180.0 && self.start_deg < 180.0
    }

    /// Arc for text-on-path placement
    ///
    /// Top-half arcs run from the end angle back to the start with the sweep
    /// flag set; otherwise the text would render upside-down.
    pub fn to_path(&self) -> PathData {
        let center = canvas_center();
        let start = polar_offset(center, self.radius, self.start_deg.to_radians());
        let end = polar_offset(center, self.radius, self.end_deg.to_radians());
        if self.is_top_half() {
            PathData::new()
                .move_to(end)
                .arc_to(self.radius, false, true, start)
        } else {
            PathData::new()
                .move_to(start)
                .arc_to(self.radius, false, false, end)
        }
    }
}

/// The four label arcs for a hemisphere, in drawing order
pub fn season_arcs(hemisphere: Hemisphere) -> [SeasonArc; 4] {
    NORTHERN_QUADRANTS.map(|(season, start, end)| {
        let season = match hemisphere {
            Hemisphere::North => season,
            Hemisphere::South => season.opposite(),
        };
        SeasonArc::new(season, start, end)
    })
}
