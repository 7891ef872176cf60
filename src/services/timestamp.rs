//! Carrier date/time parsing
//!
//! The carrier sends date and time as separate strings, with the time in a
//! localized form such as `10:15 a.m.` or `6:41 P.M.`.

use crate::error::TrackingError;
use chrono::NaiveDateTime;

/// month/day/year hour:minute AM|PM, 12-hour clock
pub const DATE_TIME_FORMAT: &str = "%m/%d/%Y %I:%M%p";

/// Rewrite a carrier time into `H:MMAM` / `H:MMPM`
fn normalize_time(time: &str) -> String {
    let compact: String =
        time.chars().filter(|c| !c.is_whitespace()).flat_map(char::to_lowercase).collect();
    compact.replace("a.m.", "AM").replace("p.m.", "PM")
}

/// Parse a carrier date and time.
///
/// Missing or empty input on either side means no timestamp is known and
/// yields `Ok(None)`. Present input that does not match [`DATE_TIME_FORMAT`]
/// is an error carrying the joined string.
pub fn parse_timestamp(
    date: Option<&str>,
    time: Option<&str>,
) -> Result<Option<NaiveDateTime>, TrackingError> {
    let (Some(date), Some(time)) = (date, time) else {
        return Ok(None);
    };
    if date.is_empty() || time.is_empty() {
        return Ok(None);
    }

    let raw = format!("{} {}", date, normalize_time(time));
    NaiveDateTime::parse_from_str(&raw, DATE_TIME_FORMAT)
        .map(Some)
        .map_err(|source| TrackingError::TimestampParse { raw, source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(h, min, 0).unwrap()
    }

    #[test]
    fn test_absent_parts_yield_none() {
        assert_eq!(parse_timestamp(None, Some("10:00AM")).unwrap(), None);
        assert_eq!(parse_timestamp(Some("01/01/2024"), None).unwrap(), None);
        assert_eq!(parse_timestamp(None, None).unwrap(), None);
        assert_eq!(parse_timestamp(Some(""), Some("10:00AM")).unwrap(), None);
        assert_eq!(parse_timestamp(Some("01/01/2024"), Some("")).unwrap(), None);
    }

    #[test]
    fn test_localized_meridian() {
        assert_eq!(
            parse_timestamp(Some("01/02/2024"), Some("10:15 a.m.")).unwrap(),
            Some(at(2024, 1, 2, 10, 15))
        );
        assert_eq!(
            parse_timestamp(Some("01/02/2024"), Some("3:05p.m.")).unwrap(),
            Some(at(2024, 1, 2, 15, 5))
        );
    }

    #[test]
    fn test_uppercase_and_plain_meridian() {
        assert_eq!(
            parse_timestamp(Some("04/12/2022"), Some("6:41 P.M.")).unwrap(),
            Some(at(2022, 4, 12, 18, 41))
        );
        assert_eq!(
            parse_timestamp(Some("4/7/2022"), Some("12:00 AM")).unwrap(),
            Some(at(2022, 4, 7, 0, 0))
        );
    }

    #[test]
    fn test_malformed_reports_raw_input() {
        let err = parse_timestamp(Some("13/40/2024"), Some("25:99AM")).unwrap_err();
        match err {
            TrackingError::TimestampParse { raw, .. } => assert_eq!(raw, "13/40/2024 25:99am"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_missing_meridian_is_error() {
        assert!(parse_timestamp(Some("01/02/2024"), Some("15:05")).is_err());
    }

    #[test]
    fn test_normalize_time() {
        assert_eq!(normalize_time(" 10 : 15  a.m. "), "10:15AM");
        assert_eq!(normalize_time("3:05\tP.M."), "3:05PM");
    }
}
