//! Wall-clock behavior in a zone with daylight saving time
//!
//! Every test here pins the process zone to Central European rules
//! (UTC+1, UTC+2 from the last Sunday of March to the last Sunday of October),
//! which is why they live in their own test binary.

use approx::assert_relative_eq;
use chrono::{TimeZone, Utc};
use solarview::planetlib::Body;
use solarview::scene::SystemLayout;
use solarview::time::Zone;
use solarview::{CelestialObject, TimeStep, Timestamp};

const CENTRAL_EUROPE: &str = "CET-1CEST,M3.5.0,M10.5.0/3";

fn central_europe() {
    std::env::set_var("TZ", CENTRAL_EUROPE);
}

#[test]
fn month_steps_follow_summer_time() {
    central_europe();
    let mut ts = Timestamp::parse("2026-01-15 12:00").unwrap();
    assert_eq!(ts.zone(), Zone::Local);
    assert_eq!(ts.datetime().offset().local_minus_utc(), 3600);

    for _ in 0..6 {
        ts = ts.step(TimeStep::MonthForward);
    }

    assert_eq!(ts.readout(), "26-07-15 12:00");
    assert_eq!(ts.datetime().offset().local_minus_utc(), 7200);
    assert_eq!(ts.instant(), Utc.with_ymd_and_hms(2026, 7, 15, 10, 0, 0).unwrap());
    assert_relative_eq!(ts.local_day_fraction(), 0.5);

    // local noon still faces the Sun
    let layout = SystemLayout::at(&ts);
    let facing_sun = Body::Earth.position_at(&ts).rotated(std::f64::consts::PI);
    assert!(layout.observer_angle.separation(&facing_sun) < 1e-9);
}

#[test]
fn fixed_day_steps_show_the_new_offset() {
    central_europe();
    let saturday = Timestamp::parse("2026-03-28 12:00").unwrap();
    let sunday = saturday.step(TimeStep::DayForward);
    assert_eq!(sunday.unix_millis() - saturday.unix_millis(), 86_400_000);
    assert_eq!(sunday.readout(), "26-03-29 13:00");
    assert!(!saturday.same_local_date(&sunday));
}

#[test]
fn month_step_into_skipped_hour_moves_forward() {
    central_europe();
    let april = Timestamp::parse("2026-04-29 02:30").unwrap();
    let march = april.step(TimeStep::MonthBack);
    assert_eq!(march.readout(), "26-03-29 03:30");
}

#[test]
fn winter_time_returns_in_november() {
    central_europe();
    let october = Timestamp::parse("2026-10-10 08:00").unwrap();
    assert_eq!(october.datetime().offset().local_minus_utc(), 7200);
    let november = october.step(TimeStep::MonthForward);
    assert_eq!(november.readout(), "26-11-10 08:00");
    assert_eq!(november.datetime().offset().local_minus_utc(), 3600);
}
