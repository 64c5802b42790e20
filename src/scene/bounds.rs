//! Axis-aligned bounding box of placed scene content

use crate::coordinates::ScreenPoint;
use nalgebra::Point2;
use serde::Serialize;

/// Bounding box in scene units, grown as elements are placed
///
/// A fresh box is empty (inverted infinite extents) until the first call to
/// [`SceneBounds::expand`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SceneBounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Default for SceneBounds {
    fn default() -> Self {
        Self::empty()
    }
}

impl SceneBounds {
    pub fn empty() -> Self {
        Self {
            min_x: f64::INFINITY,
            min_y: f64::INFINITY,
            max_x: f64::NEG_INFINITY,
            max_y: f64::NEG_INFINITY,
        }
    }

    /// Grow to cover a square of half-size `margin` around `p`
    pub fn expand(&mut self, p: ScreenPoint, margin: f64) {
        self.min_x = self.min_x.min(p.x - margin);
        self.min_y = self.min_y.min(p.y - margin);
        self.max_x = self.max_x.max(p.x + margin);
        self.max_y = self.max_y.max(p.y + margin);
    }

    pub fn is_empty(&self) -> bool {
        self.min_x > self.max_x || self.min_y > self.max_y
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn center(&self) -> ScreenPoint {
        Point2::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    /// Strict containment, the point may not touch an edge
    pub fn contains(&self, p: &ScreenPoint) -> bool {
        self.min_x < p.x && p.x < self.max_x && self.min_y < p.y && p.y < self.max_y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_until_expanded() {
        let mut bounds = SceneBounds::empty();
        assert!(bounds.is_empty());
        bounds.expand(Point2::new(10.0, 20.0), 5.0);
        assert!(!bounds.is_empty());
        assert_eq!(bounds.width(), 10.0);
        assert_eq!(bounds.height(), 10.0);
        assert_eq!(bounds.center(), Point2::new(10.0, 20.0));
    }

    #[test]
    fn test_expand_is_monotone() {
        let mut bounds = SceneBounds::empty();
        bounds.expand(Point2::new(0.0, 0.0), 1.0);
        bounds.expand(Point2::new(100.0, -50.0), 2.0);
        bounds.expand(Point2::new(50.0, 0.0), 0.5);
        assert_eq!(bounds.min_x, -1.0);
        assert_eq!(bounds.min_y, -52.0);
        assert_eq!(bounds.max_x, 102.0);
        assert_eq!(bounds.max_y, 1.0);
    }

    #[test]
    fn test_contains_is_strict() {
        let mut bounds = SceneBounds::empty();
        bounds.expand(Point2::new(0.0, 0.0), 1.0);
        assert!(bounds.contains(&Point2::new(0.0, 0.0)));
        assert!(!bounds.contains(&Point2::new(1.0, 0.0)));
    }
}
