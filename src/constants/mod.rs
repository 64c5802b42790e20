//! Constants module for orbital and time calculations

use std::f64::consts::PI;

// Time constants
/// Milliseconds in a day
pub const DAY_MS: f64 = 86_400_000.0;
/// Milliseconds in an hour
pub const HOUR_MS: i64 = 3_600_000;
/// J2000.0 epoch (2000-01-01T12:00:00 UTC) as Unix milliseconds
pub const J2000_UNIX_MS: i64 = 946_728_000_000;

// Angles
/// Degrees to radians conversion factor
pub const DEG2RAD: f64 = PI / 180.0;
/// Radians to degrees conversion factor
pub const RAD2DEG: f64 = 180.0 / PI;
/// Tau (2*PI) for full circle
pub const TAU: f64 = 2.0 * PI;
