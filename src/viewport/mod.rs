//! Viewport over the scene canvas
//!
//! The view is always a square window onto the 800-unit canvas, described by
//! its center and side length. Two zoom policies are supported:
//!
//! - [`ZoomPolicy::Levels`]: four fixed extents selected by a 1-based level
//! - [`ZoomPolicy::Continuous`]: geometric zoom steps between a minimum
//!   extent and either the full canvas or an auto-fit of the drawn content

pub mod controller;
pub mod gesture;

pub use controller::ViewController;
pub use gesture::DragGesture;

use crate::projection::{CENTER, VIEW_SIZE};
use crate::scene::SceneBounds;
use nalgebra::Point2;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const MIN_ZOOM_LEVEL: u8 = 1;
pub const MAX_ZOOM_LEVEL: u8 = 4;
pub const DEFAULT_ZOOM_LEVEL: u8 = 1;

/// Visible extent per zoom level, level 1 first
const LEVEL_EXTENTS: [f64; 4] = [800.0, 640.0, 480.0, 320.0];

/// Continuous zoom never shows less than this extent
pub const MIN_CONTINUOUS_EXTENT: f64 = 100.0;
pub const ZOOM_IN_FACTOR: f64 = 0.8;
pub const ZOOM_OUT_FACTOR: f64 = 1.25;
/// Margin added on each side of the content when auto-fitting
pub const AUTO_FIT_MARGIN: f64 = 0.02;

/// Extent for a zoom level, `None` outside 1..=4
pub fn level_extent(level: u8) -> Option<f64> {
    if (MIN_ZOOM_LEVEL..=MAX_ZOOM_LEVEL).contains(&level) {
        Some(LEVEL_EXTENTS[usize::from(level - MIN_ZOOM_LEVEL)])
    } else {
        None
    }
}

/// What "fully zoomed out" means in continuous mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FitMode {
    #[default]
    FullCanvas,
    AutoFit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ZoomPolicy {
    #[default]
    Levels,
    Continuous { fit: FitMode },
}

/// Square window fitted around some content: center and side length
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fit {
    pub center: Point2<f64>,
    pub extent: f64,
}

/// Smallest square covering `bounds` plus [`AUTO_FIT_MARGIN`] on each side
pub fn auto_fit(bounds: &SceneBounds) -> Option<Fit> {
    if bounds.is_empty() {
        return None;
    }
    let side = bounds.width().max(bounds.height());
    Some(Fit {
        center: bounds.center(),
        extent: side * (1.0 + 2.0 * AUTO_FIT_MARGIN),
    })
}

/// SVG-style view box, `min_x min_y width height`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ViewBox {
    pub min_x: f64,
    pub min_y: f64,
    pub width: f64,
    pub height: f64,
}

impl ViewBox {
    /// The whole canvas
    pub fn full_canvas() -> Self {
        Self {
            min_x: 0.0,
            min_y: 0.0,
            width: VIEW_SIZE,
            height: VIEW_SIZE,
        }
    }
}

impl fmt::Display for ViewBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} {}", self.min_x, self.min_y, self.width, self.height)
    }
}

/// Current window onto the canvas
///
/// `width == height` always holds; the extent only changes through
/// [`ViewportState::set_extent`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ViewportState {
    pub center_x: f64,
    pub center_y: f64,
    width: f64,
    height: f64,
    pub zoom_level: u8,
}

impl ViewportState {
    /// Canvas-centered view at a zoom level (invalid levels use the default)
    pub fn at_level(level: u8) -> Self {
        let (level, extent) = match level_extent(level) {
            Some(extent) => (level, extent),
            None => (DEFAULT_ZOOM_LEVEL, VIEW_SIZE),
        };
        Self {
            center_x: CENTER,
            center_y: CENTER,
            width: extent,
            height: extent,
            zoom_level: level,
        }
    }

    /// View of a given center and extent, keeping `zoom_level` for readout
    pub fn fitted(fit: Fit, zoom_level: u8) -> Self {
        Self {
            center_x: fit.center.x,
            center_y: fit.center.y,
            width: fit.extent,
            height: fit.extent,
            zoom_level,
        }
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn extent(&self) -> f64 {
        self.width
    }

    pub fn center(&self) -> Point2<f64> {
        Point2::new(self.center_x, self.center_y)
    }

    pub fn set_center(&mut self, center: Point2<f64>) {
        self.center_x = center.x;
        self.center_y = center.y;
    }

    pub fn set_extent(&mut self, extent: f64) {
        self.width = extent;
        self.height = extent;
    }

    pub fn view_box(&self) -> ViewBox {
        ViewBox {
            min_x: self.center_x - self.width / 2.0,
            min_y: self.center_y - self.height / 2.0,
            width: self.width,
            height: self.height,
        }
    }
}
