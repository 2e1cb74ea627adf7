//! Time zone parsing and base instant resolution.
//!
//! The base instant is a wall-clock date and time in an IANA zone. Resolution
//! uses the full tz database shipped with `chrono-tz`, so DST rules and
//! historical offset changes for the given date apply.

use chrono::{DateTime, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};
use chrono_tz::Tz;
use tracing::debug;

use crate::error::TimeError;

/// Base zones offered by the meeting form, in display order.
pub const BASE_TIMEZONES: &[&str] = &[
    "America/Buenos_Aires",
    "America/Sao_Paulo",
    "America/Santiago",
    "America/Bogota",
    "America/Lima",
    "America/Mexico_City",
    "America/New_York",
    "America/Chicago",
    "America/Denver",
    "America/Los_Angeles",
    "Europe/London",
    "Europe/Madrid",
    "Europe/Paris",
    "Europe/Berlin",
    "Asia/Dubai",
    "Asia/Kolkata",
    "Asia/Tokyo",
    "Australia/Sydney",
    "UTC",
];

/// Parses an IANA time zone identifier.
pub fn parse_timezone(s: &str) -> Result<Tz, TimeError> {
    let s = s.trim();
    s.parse::<Tz>()
        .map_err(|_| TimeError::UnknownTimezone(s.to_string()))
}

/// Parses an ISO calendar date (`YYYY-MM-DD`).
pub fn parse_date(s: &str) -> Result<NaiveDate, TimeError> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| TimeError::InvalidDateTime)
}

/// Parses a wall-clock time (`HH:MM`, or `HH:MM:SS`).
pub fn parse_time(s: &str) -> Result<NaiveTime, TimeError> {
    let s = s.trim();
    NaiveTime::parse_from_str(s, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M:%S"))
        .map_err(|_| TimeError::InvalidDateTime)
}

/// Resolves a wall-clock date and time in `zone` to a single instant.
///
/// A local time inside a spring-forward gap does not exist and is rejected.
/// A local time inside a fall-back overlap occurs twice; the earlier instant
/// is used.
pub fn resolve_base(
    date: NaiveDate,
    time: NaiveTime,
    zone: Tz,
) -> Result<DateTime<Tz>, TimeError> {
    let naive = NaiveDateTime::new(date, time);
    match zone.from_local_datetime(&naive) {
        LocalResult::Single(dt) => {
            debug!(%naive, tz = %zone, instant = %dt.to_rfc3339(), "resolved base instant");
            Ok(dt)
        }
        LocalResult::Ambiguous(earliest, latest) => {
            debug!(
                %naive,
                tz = %zone,
                earliest = %earliest.to_rfc3339(),
                latest = %latest.to_rfc3339(),
                "ambiguous local time, using earliest"
            );
            Ok(earliest)
        }
        LocalResult::None => {
            debug!(%naive, tz = %zone, "local time does not exist in zone");
            Err(TimeError::InvalidDateTime)
        }
    }
}

/// Short display label for a zone: the last path segment with underscores
/// turned into spaces. Identifiers without `/` are returned unchanged.
pub fn city_label(timezone: &str) -> String {
    match timezone.rsplit_once('/') {
        Some((_, city)) => city.replace('_', " "),
        None => timezone.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Offset, Timelike, Utc};
    use chrono_tz::{America, Europe};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn hm(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    mod parsing {
        use super::*;

        #[test]
        fn timezone() {
            assert_eq!(parse_timezone("Europe/Paris").unwrap(), Europe::Paris);
            assert_eq!(parse_timezone(" UTC ").unwrap(), Tz::UTC);
            assert_eq!(
                parse_timezone("Nowhere/Special"),
                Err(TimeError::UnknownTimezone("Nowhere/Special".into()))
            );
        }

        #[test]
        fn date_formats() {
            assert_eq!(parse_date("2025-11-22").unwrap(), date(2025, 11, 22));
            assert_eq!(parse_date("2025-02-30"), Err(TimeError::InvalidDateTime));
            assert_eq!(parse_date("22/11/2025"), Err(TimeError::InvalidDateTime));
        }

        #[test]
        fn time_formats() {
            assert_eq!(parse_time("15:00").unwrap(), hm(15, 0));
            assert_eq!(parse_time("09:30:00").unwrap(), hm(9, 30));
            assert_eq!(parse_time("25:00"), Err(TimeError::InvalidDateTime));
            assert_eq!(parse_time("3pm"), Err(TimeError::InvalidDateTime));
        }

        #[test]
        fn base_list_is_valid() {
            for zone in BASE_TIMEZONES {
                assert!(parse_timezone(zone).is_ok(), "{zone} should parse");
            }
        }
    }

    mod resolution {
        use super::*;

        #[test]
        fn single() {
            let dt = resolve_base(date(2025, 11, 22), hm(15, 0), America::Buenos_Aires).unwrap();
            assert_eq!(dt.with_timezone(&Utc).hour(), 18);
        }

        #[test]
        fn uses_offset_for_that_date() {
            let winter = resolve_base(date(2025, 1, 15), hm(12, 0), Europe::Paris).unwrap();
            let summer = resolve_base(date(2025, 7, 15), hm(12, 0), Europe::Paris).unwrap();
            assert_eq!(winter.offset().fix().local_minus_utc(), 3600);
            assert_eq!(summer.offset().fix().local_minus_utc(), 7200);
        }

        #[test]
        fn spring_forward_gap_is_invalid() {
            // 2025-03-09 02:30 does not exist in New York.
            let result = resolve_base(date(2025, 3, 9), hm(2, 30), America::New_York);
            assert_eq!(result, Err(TimeError::InvalidDateTime));
        }

        #[test]
        fn fall_back_overlap_uses_earliest() {
            // 2025-11-02 01:30 happens twice in New York: EDT then EST.
            let dt = resolve_base(date(2025, 11, 2), hm(1, 30), America::New_York).unwrap();
            assert_eq!(dt.offset().fix().local_minus_utc(), -4 * 3600);
            assert_eq!(dt.with_timezone(&Utc).hour(), 5);
        }
    }

    mod city {
        use super::*;

        #[test]
        fn labels() {
            assert_eq!(city_label("America/New_York"), "New York");
            assert_eq!(city_label("America/Argentina/Buenos_Aires"), "Buenos Aires");
            assert_eq!(city_label("Europe/Paris"), "Paris");
            assert_eq!(city_label("UTC"), "UTC");
        }
    }
}
