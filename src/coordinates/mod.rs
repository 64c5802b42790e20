pub mod angle;
pub mod cartesian;

pub use angle::{normalize_radians, AngularPosition};
pub use cartesian::{polar_offset, screen_direction, ScreenPoint};

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use nalgebra::Point2;

    #[test]
    fn test_position_to_screen_point() {
        // a normalized angle feeds straight into the screen conversion
        let angle = AngularPosition::from_degrees(-45.0);
        let p = polar_offset(Point2::new(0.0, 0.0), 2.0_f64.sqrt(), angle.radians());
        assert_abs_diff_eq!(p.x, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(p.y, 1.0, epsilon = 1e-12);
    }
}
