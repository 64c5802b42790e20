//! View state owned by one solar view: displayed instant, viewport and drag

use super::{
    auto_fit, level_extent, DragGesture, Fit, FitMode, ViewBox, ViewportState, ZoomPolicy,
    DEFAULT_ZOOM_LEVEL, MAX_ZOOM_LEVEL, MIN_CONTINUOUS_EXTENT, MIN_ZOOM_LEVEL, ZOOM_IN_FACTOR,
    ZOOM_OUT_FACTOR,
};
use crate::projection::{canvas_center, VIEW_SIZE};
use crate::scene::SceneBounds;
use crate::time::{TimeStep, Timestamp};
use nalgebra::{Point2, Vector2};

/// Mutable view state behind the navigation controls
///
/// The viewport is created lazily by [`ViewController::ensure_initialized`]
/// on the first render; zoom and drag requests before that are ignored.
#[derive(Debug, Clone)]
pub struct ViewController {
    timestamp: Timestamp,
    policy: ZoomPolicy,
    default_level: u8,
    viewport: Option<ViewportState>,
    drag: DragGesture,
    latest_bounds: Option<SceneBounds>,
}

impl ViewController {
    pub fn new(timestamp: Timestamp, default_level: u8, policy: ZoomPolicy) -> Self {
        let default_level = if level_extent(default_level).is_some() {
            default_level
        } else {
            DEFAULT_ZOOM_LEVEL
        };
        Self {
            timestamp,
            policy,
            default_level,
            viewport: None,
            drag: DragGesture::new(),
            latest_bounds: None,
        }
    }

    pub fn timestamp(&self) -> &Timestamp {
        &self.timestamp
    }

    /// Takes effect at the next initialization or reset
    pub fn set_default_level(&mut self, level: u8) {
        if level_extent(level).is_some() {
            self.default_level = level;
        }
    }

    pub fn viewport(&self) -> Option<&ViewportState> {
        self.viewport.as_ref()
    }

    pub fn view_box(&self) -> Option<ViewBox> {
        self.viewport.as_ref().map(ViewportState::view_box)
    }

    /// Level shown in the zoom readout; continuous zoom has none
    pub fn zoom_level(&self) -> Option<u8> {
        match self.policy {
            ZoomPolicy::Levels => self.viewport.as_ref().map(|v| v.zoom_level),
            ZoomPolicy::Continuous { .. } => None,
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_active()
    }

    /// Record the latest content bounds and create the viewport if needed
    ///
    /// An existing auto-fit view is shrunk when the content no longer needs
    /// its full extent.
    pub fn ensure_initialized(&mut self, bounds: &SceneBounds) -> &ViewportState {
        self.latest_bounds = Some(*bounds);
        let max_extent = self.max_extent();
        let initial = self.initial_viewport();
        let viewport = self.viewport.get_or_insert(initial);
        if let ZoomPolicy::Continuous {
            fit: FitMode::AutoFit,
        } = self.policy
        {
            if viewport.extent() > max_extent {
                log::debug!("Clamping view extent {:.1} to {:.1}", viewport.extent(), max_extent);
                viewport.set_extent(max_extent);
            }
        }
        viewport
    }

    /// Largest extent the active policy allows
    fn max_extent(&self) -> f64 {
        match self.policy {
            ZoomPolicy::Continuous { fit } => self.outermost_fit(fit).extent,
            ZoomPolicy::Levels => VIEW_SIZE,
        }
    }

    fn initial_viewport(&self) -> ViewportState {
        match self.policy {
            ZoomPolicy::Levels => ViewportState::at_level(self.default_level),
            ZoomPolicy::Continuous { fit } => {
                ViewportState::fitted(self.outermost_fit(fit), self.default_level)
            }
        }
    }

    fn outermost_fit(&self, fit: FitMode) -> Fit {
        let full = Fit {
            center: canvas_center(),
            extent: VIEW_SIZE,
        };
        match fit {
            FitMode::FullCanvas => full,
            FitMode::AutoFit => self
                .latest_bounds
                .as_ref()
                .and_then(auto_fit)
                .unwrap_or(full),
        }
    }

    /// Returns whether the view changed
    pub fn zoom_in(&mut self) -> bool {
        let policy = self.policy;
        let Some(viewport) = self.viewport.as_mut() else {
            return false;
        };
        match policy {
            ZoomPolicy::Levels => {
                if viewport.zoom_level >= MAX_ZOOM_LEVEL {
                    return false;
                }
                viewport.zoom_level += 1;
                apply_level(viewport);
            }
            ZoomPolicy::Continuous { .. } => {
                let extent = (viewport.extent() * ZOOM_IN_FACTOR).max(MIN_CONTINUOUS_EXTENT);
                if extent >= viewport.extent() {
                    return false;
                }
                viewport.set_extent(extent);
            }
        }
        log::debug!("Zoomed in to {}", viewport.view_box());
        true
    }

    /// Returns whether the view changed
    pub fn zoom_out(&mut self) -> bool {
        let max_extent = self.max_extent();
        let policy = self.policy;
        let Some(viewport) = self.viewport.as_mut() else {
            return false;
        };
        match policy {
            ZoomPolicy::Levels => {
                if viewport.zoom_level <= MIN_ZOOM_LEVEL {
                    return false;
                }
                viewport.zoom_level -= 1;
                apply_level(viewport);
            }
            ZoomPolicy::Continuous { .. } => {
                // also pulls an oversized view back within the limit
                let extent = (viewport.extent() * ZOOM_OUT_FACTOR).min(max_extent);
                if extent == viewport.extent() {
                    return false;
                }
                viewport.set_extent(extent);
            }
        }
        log::debug!("Zoomed out to {}", viewport.view_box());
        true
    }

    /// Start a pan at pointer position `(x, y)`
    pub fn begin_drag(&mut self, x: f64, y: f64) {
        if let Some(viewport) = self.viewport.as_ref() {
            self.drag.begin(Point2::new(x, y), viewport.center());
        }
    }

    /// Pan for a pointer now at `(x, y)` over a display of the given size
    ///
    /// Returns whether the view moved.
    pub fn drag_to(&mut self, x: f64, y: f64, onscreen_width: f64, onscreen_height: f64) -> bool {
        let Some(viewport) = self.viewport.as_mut() else {
            return false;
        };
        let extent = Vector2::new(viewport.width(), viewport.height());
        let onscreen = Vector2::new(onscreen_width, onscreen_height);
        match self.drag.pan(Point2::new(x, y), extent, onscreen) {
            Some(center) => {
                viewport.set_center(center);
                log::trace!("Panned to ({:.1}, {:.1})", center.x, center.y);
                true
            }
            None => false,
        }
    }

    pub fn end_drag(&mut self) {
        self.drag.end();
    }

    /// Jump to `now` and restore the default, centered view
    pub fn reset(&mut self, now: Timestamp) {
        self.timestamp = now;
        self.drag.end();
        self.viewport = Some(self.initial_viewport());
        log::debug!("Reset view to {}", self.timestamp);
    }

    /// Follow the clock while the displayed date is today
    ///
    /// Returns true when the displayed instant moved and a re-render is due.
    pub fn tick(&mut self, now: Timestamp) -> bool {
        if self.timestamp.same_local_date(&now) {
            self.timestamp = now;
            true
        } else {
            false
        }
    }

    pub fn navigate(&mut self, step: TimeStep) {
        self.timestamp = self.timestamp.step(step);
        log::debug!("Navigated {:?} to {}", step, self.timestamp);
    }
}

fn apply_level(viewport: &mut ViewportState) {
    if let Some(extent) = level_extent(viewport.zoom_level) {
        viewport.set_extent(extent);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::CENTER;
    use approx::assert_relative_eq;
    use rstest::rstest;

    fn at(hour: u32) -> Timestamp {
        Timestamp::from_local(0, 2026, 2, 14, hour, 0, 0).unwrap()
    }

    fn canvas_bounds() -> SceneBounds {
        let mut bounds = SceneBounds::empty();
        bounds.expand(canvas_center(), 300.0);
        bounds
    }

    fn initialized(level: u8, policy: ZoomPolicy) -> ViewController {
        let mut controller = ViewController::new(at(12), level, policy);
        controller.ensure_initialized(&canvas_bounds());
        controller
    }

    #[test]
    fn test_lazy_initialization() {
        let mut controller = ViewController::new(at(12), 2, ZoomPolicy::Levels);
        assert!(controller.viewport().is_none());
        assert!(!controller.zoom_in());
        controller.begin_drag(0.0, 0.0);
        assert!(!controller.is_dragging());

        let viewport = *controller.ensure_initialized(&canvas_bounds());
        assert_eq!(viewport.zoom_level, 2);
        assert_eq!(viewport.extent(), 640.0);
        assert_eq!(viewport.center(), canvas_center());
    }

    #[test]
    fn test_initialization_happens_once() {
        let mut controller = initialized(1, ZoomPolicy::Levels);
        controller.zoom_in();
        controller.ensure_initialized(&canvas_bounds());
        assert_eq!(controller.zoom_level(), Some(2));
    }

    #[rstest]
    #[case(0)]
    #[case(5)]
    #[case(99)]
    fn test_invalid_default_level(#[case] level: u8) {
        let controller = initialized(level, ZoomPolicy::Levels);
        assert_eq!(controller.zoom_level(), Some(1));
    }

    #[test]
    fn test_level_zoom_round_trip() {
        let mut controller = initialized(1, ZoomPolicy::Levels);
        assert!(controller.zoom_in());
        assert_eq!(controller.viewport().unwrap().extent(), 640.0);
        assert!(controller.zoom_out());
        assert_eq!(controller.viewport().unwrap().extent(), 800.0);
        assert_eq!(controller.zoom_level(), Some(1));
    }

    #[test]
    fn test_level_zoom_clamps() {
        let mut controller = initialized(4, ZoomPolicy::Levels);
        assert!(!controller.zoom_in());
        assert_eq!(controller.zoom_level(), Some(4));

        let mut controller = initialized(1, ZoomPolicy::Levels);
        assert!(!controller.zoom_out());
        assert_eq!(controller.view_box().unwrap().to_string(), "0 0 800 800");
    }

    #[test]
    fn test_continuous_zoom_limits() {
        let policy = ZoomPolicy::Continuous {
            fit: FitMode::FullCanvas,
        };
        let mut controller = initialized(1, policy);
        assert_eq!(controller.zoom_level(), None);
        assert!(!controller.zoom_out());

        assert!(controller.zoom_in());
        assert_relative_eq!(controller.viewport().unwrap().extent(), 640.0);

        while controller.zoom_in() {}
        assert_relative_eq!(controller.viewport().unwrap().extent(), MIN_CONTINUOUS_EXTENT);

        while controller.zoom_out() {}
        assert_relative_eq!(controller.viewport().unwrap().extent(), VIEW_SIZE);
    }

    #[test]
    fn test_auto_fit_caps_zoom_out() {
        let policy = ZoomPolicy::Continuous {
            fit: FitMode::AutoFit,
        };
        let mut controller = initialized(1, policy);
        let fitted = controller.viewport().unwrap().extent();
        assert_relative_eq!(fitted, 600.0 * 1.04);
        assert!(!controller.zoom_out());
        assert!(controller.zoom_in());
        assert!(controller.zoom_out());
        assert_relative_eq!(controller.viewport().unwrap().extent(), fitted);
    }

    fn bounds_of_half_size(half: f64) -> SceneBounds {
        let mut bounds = SceneBounds::empty();
        bounds.expand(canvas_center(), half);
        bounds
    }

    #[test]
    fn test_auto_fit_view_shrinks_with_content() {
        let policy = ZoomPolicy::Continuous {
            fit: FitMode::AutoFit,
        };
        let mut controller = ViewController::new(at(12), 1, policy);
        let wide = controller.ensure_initialized(&bounds_of_half_size(390.0)).extent();
        assert_relative_eq!(wide, 780.0 * 1.04);

        let narrow = controller.ensure_initialized(&bounds_of_half_size(300.0)).extent();
        assert_relative_eq!(narrow, 600.0 * 1.04);
        assert!(!controller.zoom_out());
    }

    #[test]
    fn test_zoom_out_clamps_oversized_view() {
        let policy = ZoomPolicy::Continuous {
            fit: FitMode::AutoFit,
        };
        let mut controller = ViewController::new(at(12), 1, policy);
        controller.ensure_initialized(&bounds_of_half_size(390.0));
        // newer content bounds, recorded without going through a render
        controller.latest_bounds = Some(bounds_of_half_size(300.0));
        assert!(controller.zoom_out());
        assert_relative_eq!(controller.viewport().unwrap().extent(), 600.0 * 1.04);
        assert!(!controller.zoom_out());
    }

    #[test]
    fn test_full_canvas_view_is_never_clamped_by_content() {
        let policy = ZoomPolicy::Continuous {
            fit: FitMode::FullCanvas,
        };
        let mut controller = ViewController::new(at(12), 1, policy);
        controller.ensure_initialized(&bounds_of_half_size(390.0));
        let extent = controller.ensure_initialized(&bounds_of_half_size(100.0)).extent();
        assert_eq!(extent, VIEW_SIZE);
    }

    #[test]
    fn test_drag_pans_against_motion() {
        let mut controller = initialized(1, ZoomPolicy::Levels);
        controller.begin_drag(200.0, 200.0);
        assert!(controller.drag_to(240.0, 180.0, 400.0, 400.0));
        let viewport = controller.viewport().unwrap();
        assert_relative_eq!(viewport.center_x, CENTER - 80.0);
        assert_relative_eq!(viewport.center_y, CENTER + 40.0);

        controller.end_drag();
        assert!(!controller.drag_to(0.0, 0.0, 400.0, 400.0));
        assert_relative_eq!(controller.viewport().unwrap().center_x, CENTER - 80.0);
    }

    #[test]
    fn test_drag_without_begin_is_ignored() {
        let mut controller = initialized(1, ZoomPolicy::Levels);
        assert!(!controller.drag_to(50.0, 50.0, 400.0, 400.0));
        assert_eq!(controller.viewport().unwrap().center(), canvas_center());
    }

    #[test]
    fn test_reset_restores_default_view() {
        let mut controller = initialized(3, ZoomPolicy::Levels);
        controller.zoom_out();
        controller.begin_drag(0.0, 0.0);
        controller.drag_to(100.0, 100.0, 800.0, 800.0);
        controller.navigate(TimeStep::MonthBack);

        controller.reset(at(15));
        assert_eq!(controller.timestamp(), &at(15));
        assert_eq!(controller.zoom_level(), Some(3));
        assert_eq!(controller.viewport().unwrap().center(), canvas_center());
        assert!(!controller.is_dragging());
    }

    #[test]
    fn test_tick_follows_same_day() {
        let mut controller = initialized(1, ZoomPolicy::Levels);
        assert!(controller.tick(at(13)));
        assert_eq!(controller.timestamp(), &at(13));

        controller.navigate(TimeStep::DayBack);
        let shown = *controller.timestamp();
        assert!(!controller.tick(at(14)));
        assert_eq!(controller.timestamp(), &shown);
    }

    #[test]
    fn test_navigate_steps() {
        let mut controller = initialized(1, ZoomPolicy::Levels);
        controller.navigate(TimeStep::HourForward);
        assert_eq!(controller.timestamp(), &at(13));
        controller.navigate(TimeStep::MonthForward);
        assert_eq!(controller.timestamp().readout(), "26-03-14 13:00");
    }
}
