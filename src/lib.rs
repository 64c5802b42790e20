//! Solarview: a top-down view of the solar system
//!
//! Planets move on circular mean-motion orbits around a fixed Sun, projected
//! onto a square canvas with a logarithmic radial scale. On top of the orbits
//! the view marks the observer's visible sky for the local time of day and
//! the four season quadrants for the observer's hemisphere.
//!
//! The pipeline is pure and synchronous:
//!
//! ```rust
//! use solarview::projection::Hemisphere;
//! use solarview::scene::{render, svg};
//! use solarview::time::Timestamp;
//! use solarview::viewport::ViewBox;
//!
//! let when = Timestamp::from_local(3600, 2026, 2, 14, 12, 0, 0).unwrap();
//! let (scene, bounds) = render(&when, Hemisphere::North);
//! assert!(bounds.contains(&solarview::projection::canvas_center()));
//!
//! let document = svg::to_svg(&scene, &ViewBox::full_canvas());
//! assert!(document.contains("Earth"));
//! ```
//!
//! [`card::SolarViewCard`] wraps the pipeline with navigation, zoom, panning
//! and the periodic clock refresh.

use thiserror::Error;

pub mod card;
pub mod celestial;
pub mod constants;
pub mod coordinates;
pub mod planetlib;
pub mod projection;
pub mod scene;
pub mod time;
pub mod viewport;

// Re-export commonly used types
pub use card::{CardConfig, SolarViewCard};
pub use coordinates::AngularPosition;
pub use planetlib::Body;
pub use projection::Hemisphere;
pub use time::{TimeStep, Timestamp};

/// Main error type for the solarview library
#[derive(Debug, Error)]
pub enum SolarViewError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Time error: {0}")]
    Time(#[from] time::TimeError),

    #[error("Unknown body: {0}")]
    UnknownBody(String),
}

/// Result type for solarview operations
pub type Result<T> = std::result::Result<T, SolarViewError>;

// Re-export CelestialObject trait from celestial module
pub use celestial::CelestialObject;
