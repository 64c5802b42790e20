//! Drag-to-pan gesture tracking

use nalgebra::{Point2, Vector2};

#[derive(Debug, Clone, Copy, PartialEq)]
struct DragAnchor {
    pointer: Point2<f64>,
    center: Point2<f64>,
}

/// Pointer drag state between a press and a release
///
/// Pans are computed against the pointer and view center captured at the
/// press, not incrementally, so rounding never accumulates over a long drag.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DragGesture {
    anchor: Option<DragAnchor>,
}

impl DragGesture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&mut self, pointer: Point2<f64>, view_center: Point2<f64>) {
        self.anchor = Some(DragAnchor {
            pointer,
            center: view_center,
        });
    }

    pub fn is_active(&self) -> bool {
        self.anchor.is_some()
    }

    pub fn end(&mut self) {
        self.anchor = None;
    }

    /// New view center for a pointer at `pointer`
    ///
    /// `extent` is the visible scene extent and `onscreen` the displayed size
    /// in pointer units. Returns `None` when no drag is active or the display
    /// has no area.
    pub fn pan(
        &self,
        pointer: Point2<f64>,
        extent: Vector2<f64>,
        onscreen: Vector2<f64>,
    ) -> Option<Point2<f64>> {
        let anchor = self.anchor?;
        if onscreen.x <= 0.0 || onscreen.y <= 0.0 {
            return None;
        }
        let delta = pointer - anchor.pointer;
        let scale = extent.component_div(&onscreen);
        Some(anchor.center - delta.component_mul(&scale))
    }
}
