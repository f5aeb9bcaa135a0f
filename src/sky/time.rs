//! Observation time parsing and time scales
//!
//! UT1 is taken equal to UTC (the difference stays under 0.9 s) and TDB
//! equal to TT.

use crate::constants::astro::{DAYS_PER_CENTURY, J2000, TT_MINUS_TAI_SECS};
use crate::error::{Error, Result};
use chrono::{DateTime, Datelike, NaiveDateTime, Utc};

/// Accepted observation time format
pub const WHEN_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Julian date of the Unix epoch
const UNIX_EPOCH_JD: f64 = 2_440_587.5;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// TAI - UTC in seconds, by (year, month) the value took effect
const LEAP_SECONDS: &[(i32, u32, f64)] = &[
    (1972, 1, 10.0),
    (1972, 7, 11.0),
    (1973, 1, 12.0),
    (1974, 1, 13.0),
    (1975, 1, 14.0),
    (1976, 1, 15.0),
    (1977, 1, 16.0),
    (1978, 1, 17.0),
    (1979, 1, 18.0),
    (1980, 1, 19.0),
    (1981, 7, 20.0),
    (1982, 7, 21.0),
    (1983, 7, 22.0),
    (1985, 7, 23.0),
    (1988, 1, 24.0),
    (1990, 1, 25.0),
    (1991, 1, 26.0),
    (1992, 7, 27.0),
    (1993, 7, 28.0),
    (1994, 7, 29.0),
    (1996, 1, 30.0),
    (1997, 7, 31.0),
    (1999, 1, 32.0),
    (2006, 1, 33.0),
    (2009, 1, 34.0),
    (2012, 7, 35.0),
    (2015, 7, 36.0),
    (2017, 1, 37.0),
];

/// Parse a local wall-clock time in `YYYY-MM-DD HH:MM` form
pub fn parse_when(when: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(when.trim(), WHEN_FORMAT)
        .map_err(|_| Error::TimeParse(when.to_string()))
}

/// Format a wall-clock time back to `YYYY-MM-DD HH:MM`
pub fn format_when(when: &NaiveDateTime) -> String {
    when.format(WHEN_FORMAT).to_string()
}

/// TAI - UTC at an instant
///
/// Before 1972 the first tabulated value is used.
pub fn tai_minus_utc(instant: DateTime<Utc>) -> f64 {
    let key = (instant.year(), instant.month());
    LEAP_SECONDS
        .iter()
        .rev()
        .find(|&&(year, month, _)| (year, month) <= key)
        .map(|&(_, _, seconds)| seconds)
        .unwrap_or(LEAP_SECONDS[0].2)
}

/// Julian date in the UTC scale (used as UT1)
pub fn julian_date_utc(instant: DateTime<Utc>) -> f64 {
    let seconds = instant.timestamp() as f64 + instant.timestamp_subsec_nanos() as f64 * 1e-9;
    UNIX_EPOCH_JD + seconds / SECONDS_PER_DAY
}

/// Julian date in Terrestrial Time
pub fn julian_date_tt(instant: DateTime<Utc>) -> f64 {
    julian_date_utc(instant) + (tai_minus_utc(instant) + TT_MINUS_TAI_SECS) / SECONDS_PER_DAY
}

/// Julian centuries since J2000.0
pub fn centuries_since_j2000(jd: f64) -> f64 {
    (jd - J2000) / DAYS_PER_CENTURY
}
