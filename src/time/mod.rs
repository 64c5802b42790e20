//! Time module for the solar view
//!
//! A [`Timestamp`] is an absolute instant paired with the [`Zone`] of
//! whoever is looking at the view. Orbital arithmetic only ever uses the
//! instant; the local wall clock drives the observer's rotational phase, the
//! date readout and calendar-month navigation. Local fields are resolved
//! through the zone on every access, so a timestamp moved across a daylight
//! saving change reports the offset in effect at its new instant.

use crate::constants::{DAY_MS, HOUR_MS, J2000_UNIX_MS};
use chrono::{
    DateTime, Duration, FixedOffset, Local, Months, NaiveDate, NaiveDateTime, Offset, TimeZone,
    Timelike, Utc,
};
use std::fmt;
use thiserror::Error;

/// Error type for time operations
#[derive(Debug, Error)]
pub enum TimeError {
    #[error("Invalid time format: {0}")]
    InvalidFormat(String),

    #[error("Time out of range: {0}")]
    OutOfRange(String),

    #[error("Ambiguous or nonexistent local time: {0}")]
    AmbiguousLocalTime(String),
}

/// Result type for time operations
pub type Result<T> = std::result::Result<T, TimeError>;

/// Naive layouts accepted by [`Timestamp::parse_in`], tried in order
const NAIVE_DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// A single navigation step through time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeStep {
    MonthBack,
    DayBack,
    HourBack,
    HourForward,
    DayForward,
    MonthForward,
}

/// Time zone used to read local wall-clock fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Zone {
    /// The system zone, daylight saving rules included
    Local,
    /// A constant offset east of UTC
    Fixed(FixedOffset),
}

impl Zone {
    /// UTC offset in effect at an instant
    pub fn offset_at(&self, instant: &DateTime<Utc>) -> FixedOffset {
        match self {
            Zone::Local => Local.offset_from_utc_datetime(&instant.naive_utc()),
            Zone::Fixed(offset) => *offset,
        }
    }

    /// Instant for a local wall-clock time, the earlier one when ambiguous
    pub fn resolve(&self, naive: &NaiveDateTime) -> Option<DateTime<Utc>> {
        match self {
            Zone::Local => Local
                .from_local_datetime(naive)
                .earliest()
                .map(|dt| dt.with_timezone(&Utc)),
            Zone::Fixed(offset) => offset
                .from_local_datetime(naive)
                .earliest()
                .map(|dt| dt.with_timezone(&Utc)),
        }
    }
}

/// An absolute point in time viewed from a zone
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timestamp {
    instant: DateTime<Utc>,
    zone: Zone,
}

impl Timestamp {
    pub fn new(instant: DateTime<Utc>, zone: Zone) -> Self {
        Self { instant, zone }
    }

    /// The current instant, viewed from the system zone
    pub fn now() -> Self {
        Self::new(Utc::now(), Zone::Local)
    }

    /// Create a timestamp from Unix milliseconds, viewed from UTC
    pub fn from_utc_millis(millis: i64) -> Result<Self> {
        DateTime::<Utc>::from_timestamp_millis(millis)
            .map(|dt| Self::new(dt, Zone::Fixed(Utc.fix())))
            .ok_or_else(|| TimeError::OutOfRange(format!("{} ms", millis)))
    }

    /// Create a timestamp from local calendar fields at a fixed UTC offset
    ///
    /// `offset_seconds` is east of UTC, so UTC+01:00 is `3600`.
    pub fn from_local(
        offset_seconds: i32,
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
    ) -> Result<Self> {
        let offset = FixedOffset::east_opt(offset_seconds)
            .ok_or_else(|| TimeError::OutOfRange(format!("offset {}s", offset_seconds)))?;
        offset
            .with_ymd_and_hms(year, month, day, hour, minute, second)
            .single()
            .map(|dt| Self::new(dt.with_timezone(&Utc), Zone::Fixed(offset)))
            .ok_or_else(|| {
                TimeError::InvalidFormat(format!(
                    "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
                    year, month, day, hour, minute, second
                ))
            })
    }

    /// Parse a timestamp viewed from the system zone
    ///
    /// Offset-less input is a wall-clock time in that zone.
    pub fn parse(input: &str) -> Result<Self> {
        Self::parse_zoned(input, Zone::Local)
    }

    /// Parse a timestamp viewed from a fixed offset
    pub fn parse_in(input: &str, offset: FixedOffset) -> Result<Self> {
        Self::parse_zoned(input, Zone::Fixed(offset))
    }

    fn parse_zoned(input: &str, zone: Zone) -> Result<Self> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(input.trim()) {
            return Ok(Self::new(dt.with_timezone(&Utc), zone));
        }
        let naive = parse_naive(input.trim())?;
        zone.resolve(&naive)
            .map(|instant| Self::new(instant, zone))
            .ok_or_else(|| TimeError::AmbiguousLocalTime(input.to_string()))
    }

    pub fn zone(&self) -> Zone {
        self.zone
    }

    /// The instant
    pub fn instant(&self) -> DateTime<Utc> {
        self.instant
    }

    /// Local datetime, carrying the offset in effect at this instant
    pub fn datetime(&self) -> DateTime<FixedOffset> {
        self.instant.with_timezone(&self.zone.offset_at(&self.instant))
    }

    /// Unix milliseconds of the instant
    pub fn unix_millis(&self) -> i64 {
        self.instant.timestamp_millis()
    }

    /// Fractional days elapsed since J2000.0 (negative before the epoch)
    pub fn days_since_j2000(&self) -> f64 {
        (self.unix_millis() - J2000_UNIX_MS) as f64 / DAY_MS
    }

    /// Local wall-clock time of day as a fraction of 24 hours, minute resolution
    pub fn local_day_fraction(&self) -> f64 {
        let local = self.datetime();
        let hours = local.hour() as f64 + local.minute() as f64 / 60.0;
        hours / 24.0
    }

    /// Local calendar date
    pub fn local_date(&self) -> NaiveDate {
        self.datetime().date_naive()
    }

    /// True when both timestamps fall on the same local calendar date
    pub fn same_local_date(&self, other: &Timestamp) -> bool {
        self.local_date() == other.local_date()
    }

    /// Compact readout in `YY-MM-DD HH:MM` form, local wall clock
    pub fn readout(&self) -> String {
        self.datetime().format("%y-%m-%d %H:%M").to_string()
    }

    /// Shift by a whole number of milliseconds
    ///
    /// Instants beyond chrono's range are left unchanged.
    pub fn shifted_millis(&self, millis: i64) -> Self {
        match self.instant.checked_add_signed(Duration::milliseconds(millis)) {
            Some(instant) => Self::new(instant, self.zone),
            None => {
                log::warn!("Shift of {} ms from {} is out of range", millis, self);
                *self
            }
        }
    }

    /// Apply one navigation step
    ///
    /// Day and hour steps are fixed-length; month steps move the local wall
    /// clock by a calendar month, clamping to the last day of shorter months.
    pub fn step(&self, step: TimeStep) -> Self {
        let local = self.datetime().naive_local();
        let shifted = match step {
            TimeStep::MonthBack => local.checked_sub_months(Months::new(1)),
            TimeStep::MonthForward => local.checked_add_months(Months::new(1)),
            TimeStep::DayBack => return self.shifted_millis(-(DAY_MS as i64)),
            TimeStep::DayForward => return self.shifted_millis(DAY_MS as i64),
            TimeStep::HourBack => return self.shifted_millis(-HOUR_MS),
            TimeStep::HourForward => return self.shifted_millis(HOUR_MS),
        };
        // a wall-clock time skipped by a forward transition lands an hour later
        let instant = shifted.and_then(|naive| {
            self.zone.resolve(&naive).or_else(|| {
                naive
                    .checked_add_signed(Duration::hours(1))
                    .and_then(|later| self.zone.resolve(&later))
            })
        });
        match instant {
            Some(instant) => Self::new(instant, self.zone),
            None => {
                log::warn!("Month step {:?} from {} is out of range", step, self);
                *self
            }
        }
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.datetime().to_rfc3339())
    }
}

fn parse_naive(input: &str) -> Result<NaiveDateTime> {
    for layout in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(input, layout) {
            return Ok(naive);
        }
    }
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .ok_or_else(|| TimeError::InvalidFormat(input.to_string()))
}
