//! Timezone lookup and local time conversion
//!
//! Zone polygons are embedded in `tzf-rs`, so lookups are offline.

use crate::error::{Error, Result};
use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use tracing::debug;

/// Finds the IANA timezone for a coordinate
pub struct TimezoneLookup {
    finder: tzf_rs::DefaultFinder,
}

impl TimezoneLookup {
    /// Load the embedded zone polygons
    pub fn new() -> Self {
        Self {
            finder: tzf_rs::DefaultFinder::new(),
        }
    }

    /// IANA zone at (lat, lng)
    ///
    /// Fails when no zone covers the point or the zone name is unknown to
    /// the timezone database.
    pub fn timezone_at(&self, lat: f64, lng: f64) -> Result<Tz> {
        let name = self.finder.get_tz_name(lng, lat);
        debug!(lat, lng, zone = name, "timezone lookup");

        if name.is_empty() {
            return Err(Error::TimezoneResolution { lat, lng });
        }
        name.parse::<Tz>()
            .map_err(|_| Error::TimezoneResolution { lat, lng })
    }
}

impl Default for TimezoneLookup {
    fn default() -> Self {
        Self::new()
    }
}

/// Interpret a wall-clock time in `tz` and convert it to UTC
///
/// Local times skipped or repeated by a DST transition are rejected.
pub fn localize(local: NaiveDateTime, tz: Tz) -> Result<DateTime<Utc>> {
    tz.from_local_datetime(&local)
        .single()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| Error::AmbiguousLocalTime(format!("{} {}", local, tz.name())))
}

/// Wall-clock time in `tz` for a UTC instant
pub fn to_local(instant: DateTime<Utc>, tz: Tz) -> NaiveDateTime {
    instant.with_timezone(&tz).naive_local()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn naive(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(h, mi, 0)
            .unwrap()
    }

    #[test]
    fn test_timezone_at_juneau() {
        let lookup = TimezoneLookup::new();
        let tz = lookup.timezone_at(58.3019, -134.4197).unwrap();
        assert_eq!(tz, chrono_tz::America::Juneau);
    }

    #[test]
    fn test_timezone_at_london() {
        let lookup = TimezoneLookup::new();
        let tz = lookup.timezone_at(51.5074, -0.1278).unwrap();
        assert_eq!(tz, chrono_tz::Europe::London);
    }

    #[test]
    fn test_localize_standard_time() {
        // AKST is UTC-9 on 1 November 2023
        let utc = localize(naive(2023, 11, 1, 15, 0), chrono_tz::America::Juneau).unwrap();
        assert_eq!(utc.naive_utc(), naive(2023, 11, 2, 0, 0));
    }

    #[test]
    fn test_localize_rejects_nonexistent_time() {
        // Clocks jump from 01:00 to 02:00 in London on 26 March 2023
        let result = localize(naive(2023, 3, 26, 1, 30), chrono_tz::Europe::London);
        assert!(matches!(result, Err(Error::AmbiguousLocalTime(_))));
    }

    #[test]
    fn test_localize_rejects_ambiguous_time() {
        // 01:30 happens twice in London on 29 October 2023
        let result = localize(naive(2023, 10, 29, 1, 30), chrono_tz::Europe::London);
        assert!(matches!(result, Err(Error::AmbiguousLocalTime(_))));
    }

    #[test]
    fn test_to_local_roundtrip() {
        let local = naive(2023, 7, 4, 21, 45);
        let utc = localize(local, chrono_tz::America::New_York).unwrap();
        assert_eq!(to_local(utc, chrono_tz::America::New_York), local);
    }
}
