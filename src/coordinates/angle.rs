//! # Angular Position Module
//!
//! This module provides the normalized ecliptic longitude used throughout the
//! solar view.
//!
//! ## Design Philosophy
//!
//! Every orbital angle in the view is a longitude measured counter-clockwise
//! from a fixed reference direction. Raw angles produced by the mean-motion
//! model grow without bound (and go negative for dates before J2000), so the
//! `AngularPosition` type only ever holds values in the half-open interval
//! `[0, 2π)`.
//!
//! ## Normalization
//!
//! Rust's `%` operator keeps the sign of the dividend, so a single remainder
//! is not enough for negative input. Normalization therefore applies the
//! remainder twice: `((angle % 2π) + 2π) % 2π`.
//!
//! ## Examples
//!
//! ```rust
//! use solarview::coordinates::angle::AngularPosition;
//! use std::f64::consts::PI;
//!
//! let wrapped = AngularPosition::from_radians(5.0 * PI);
//! assert!((wrapped.radians() - PI).abs() < 1e-12);
//!
//! let negative = AngularPosition::from_degrees(-90.0);
//! assert!((negative.degrees() - 270.0).abs() < 1e-12);
//! ```

use crate::constants::{DEG2RAD, RAD2DEG, TAU};
use serde::Serialize;

/// Wrap an arbitrary angle in radians into `[0, 2π)`
pub fn normalize_radians(angle: f64) -> f64 {
    let wrapped = ((angle % TAU) + TAU) % TAU;
    // (tiny negative % TAU) + TAU can round up to exactly TAU
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}

/// Shortest unsigned angular separation between two angles, in radians
pub fn separation(a: f64, b: f64) -> f64 {
    let diff = (normalize_radians(a) - normalize_radians(b)).abs();
    diff.min(TAU - diff)
}

/// Ecliptic longitude of one body at one instant, always within `[0, 2π)`
///
/// Values are derived on every render and never stored long-term.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
pub struct AngularPosition {
    radians: f64,
}

impl AngularPosition {
    /// The reference direction
    pub const ZERO: AngularPosition = AngularPosition { radians: 0.0 };

    /// Creates a position from any angle in radians, normalizing it
    pub fn from_radians(radians: f64) -> Self {
        Self {
            radians: normalize_radians(radians),
        }
    }

    /// Creates a position from any angle in degrees, normalizing it
    pub fn from_degrees(degrees: f64) -> Self {
        Self::from_radians(degrees * DEG2RAD)
    }

    /// The angle in radians, within `[0, 2π)`
    pub fn radians(&self) -> f64 {
        self.radians
    }

    /// The angle in degrees, within `[0, 360)`
    pub fn degrees(&self) -> f64 {
        self.radians * RAD2DEG
    }

    /// Rotate counter-clockwise by `delta` radians, renormalizing
    pub fn rotated(&self, delta: f64) -> Self {
        Self::from_radians(self.radians + delta)
    }

    /// Shortest angular distance to another position, in `[0, π]`
    pub fn separation(&self, other: &AngularPosition) -> f64 {
        separation(self.radians, other.radians)
    }
}

impl From<AngularPosition> for f64 {
    fn from(position: AngularPosition) -> f64 {
        position.radians
    }
}
