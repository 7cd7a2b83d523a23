//! Normalization and checking of inbound readings.
//!
//! Fields are checked in order: `deviceId`, then `latitude` (type, then
//! range), then `longitude` (type, then range), then `recordedAt`. The first
//! failure is returned.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::Value;
use validator::ValidateRange;

use crate::core::error::{AppError, Result};
use crate::features::locations::dtos::{LocationDraft, SubmitLocationDto};

/// Naive ISO 8601 date-time layouts, read as UTC
const NAIVE_DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// Date-time layouts with a numeric offset (`+02`, `+0200`, `+02:00`)
const OFFSET_DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f%#z", "%Y-%m-%dT%H:%M%#z"];

const LATITUDE_BOUNDS: (f64, f64) = (-90.0, 90.0);
const LONGITUDE_BOUNDS: (f64, f64) = (-180.0, 180.0);

/// Turn a raw submission into a draft ready for the store
pub fn validate_submission(dto: SubmitLocationDto) -> Result<LocationDraft> {
    let device_id = device_id(dto.device_id)?;
    let latitude = coordinate("latitude", dto.latitude, LATITUDE_BOUNDS)?;
    let longitude = coordinate("longitude", dto.longitude, LONGITUDE_BOUNDS)?;
    let recorded_at = recorded_at(dto.recorded_at)?;

    Ok(LocationDraft {
        device_id,
        latitude,
        longitude,
        recorded_at,
    })
}

fn device_id(raw: Option<Value>) -> Result<Option<String>> {
    match raw {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) if s.is_empty() => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(_) => Err(AppError::Validation(
            "\"deviceId\" must be a string".to_string(),
        )),
    }
}

fn coordinate(field: &str, raw: Option<Value>, (min, max): (f64, f64)) -> Result<f64> {
    let not_a_number = || AppError::Validation(format!("\"{}\" must be a number", field));

    let value = match raw {
        None | Some(Value::Null) => {
            return Err(AppError::Validation(format!("\"{}\" is required", field)))
        }
        Some(Value::Number(n)) => n.as_f64().ok_or_else(not_a_number)?,
        Some(Value::String(s)) => s.trim().parse::<f64>().map_err(|_| not_a_number())?,
        Some(_) => return Err(not_a_number()),
    };

    // Rejects "NaN" / "inf" strings, which f64 parsing accepts
    if !value.is_finite() {
        return Err(not_a_number());
    }

    if !value.validate_range(Some(min), Some(max), None, None) {
        return Err(AppError::Validation(format!(
            "\"{}\" must be between {} and {}",
            field, min, max
        )));
    }

    Ok(value)
}

fn recorded_at(raw: Option<Value>) -> Result<Option<DateTime<Utc>>> {
    let invalid = || {
        AppError::Validation("\"recordedAt\" must be in ISO 8601 date format".to_string())
    };

    match raw {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => parse_iso8601(s.trim()).map(Some).ok_or_else(invalid),
        Some(_) => Err(invalid()),
    }
}

/// Parse an ISO 8601 timestamp: RFC 3339, a date-time with a `Z` or numeric
/// offset (seconds optional), a naive date-time, or a bare date. Values
/// without an offset are taken as UTC.
pub fn parse_iso8601(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Some(naive) = s
        .strip_suffix(['Z', 'z'])
        .and_then(parse_naive_datetime)
    {
        return Some(naive.and_utc());
    }

    if let Some(dt) = OFFSET_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| DateTime::parse_from_str(s, fmt).ok())
    {
        return Some(dt.with_timezone(&Utc));
    }

    if let Some(naive) = parse_naive_datetime(s) {
        return Some(naive.and_utc());
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

fn parse_naive_datetime(s: &str) -> Option<NaiveDateTime> {
    NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use fake::Fake;
    use serde_json::json;

    fn dto(body: Value) -> SubmitLocationDto {
        serde_json::from_value(body).unwrap()
    }

    fn error_message(body: Value) -> String {
        match validate_submission(dto(body)) {
            Err(AppError::Validation(msg)) => msg,
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_valid_minimal_submission() {
        let draft =
            validate_submission(dto(json!({ "deviceId": "dev1", "latitude": 10, "longitude": 20 })))
                .unwrap();

        assert_eq!(draft.device_id.as_deref(), Some("dev1"));
        assert_eq!(draft.latitude, 10.0);
        assert_eq!(draft.longitude, 20.0);
        assert_eq!(draft.recorded_at, None);
    }

    #[test]
    fn test_random_in_range_coordinates_pass() {
        for _ in 0..50 {
            let lat: f64 = (-90.0..90.0).fake();
            let lng: f64 = (-180.0..180.0).fake();
            let draft =
                validate_submission(dto(json!({ "latitude": lat, "longitude": lng }))).unwrap();
            assert_eq!(draft.latitude, lat);
            assert_eq!(draft.longitude, lng);
        }
    }

    #[test]
    fn test_bounds_are_inclusive() {
        for (lat, lng) in [(90.0, 180.0), (-90.0, -180.0)] {
            let draft =
                validate_submission(dto(json!({ "latitude": lat, "longitude": lng }))).unwrap();
            assert_eq!((draft.latitude, draft.longitude), (lat, lng));
        }
    }

    #[test]
    fn test_latitude_out_of_range() {
        for lat in [91, -91] {
            let msg = error_message(json!({ "latitude": lat, "longitude": 20 }));
            assert!(msg.contains("latitude"), "{}", msg);
            assert!(msg.contains("between -90 and 90"), "{}", msg);
        }
    }

    #[test]
    fn test_longitude_out_of_range() {
        let msg = error_message(json!({ "latitude": 0, "longitude": 180.0001 }));
        assert!(msg.contains("longitude"), "{}", msg);
    }

    #[test]
    fn test_latitude_reported_before_longitude() {
        let msg = error_message(json!({ "latitude": 100, "longitude": 500 }));
        assert!(msg.starts_with("\"latitude\""), "{}", msg);
    }

    #[test]
    fn test_latitude_range_reported_before_longitude_type() {
        assert_eq!(
            error_message(json!({ "latitude": 91, "longitude": "abc" })),
            "\"latitude\" must be between -90 and 90"
        );
        assert_eq!(
            error_message(json!({ "latitude": 10, "longitude": -180.5 })),
            "\"longitude\" must be between -180 and 180"
        );
    }

    #[test]
    fn test_missing_coordinates() {
        assert_eq!(
            error_message(json!({ "longitude": 20 })),
            "\"latitude\" is required"
        );
        assert_eq!(
            error_message(json!({ "latitude": null, "longitude": 20 })),
            "\"latitude\" is required"
        );
        assert_eq!(
            error_message(json!({ "latitude": 10 })),
            "\"longitude\" is required"
        );
    }

    #[test]
    fn test_non_numeric_coordinates() {
        for bad in [json!("north"), json!(true), json!([1]), json!({}), json!("NaN"), json!("inf")] {
            assert_eq!(
                error_message(json!({ "latitude": bad, "longitude": 20 })),
                "\"latitude\" must be a number"
            );
        }
    }

    #[test]
    fn test_numeric_strings_are_coerced() {
        let draft =
            validate_submission(dto(json!({ "latitude": "-12.5", "longitude": " 44 " }))).unwrap();
        assert_eq!(draft.latitude, -12.5);
        assert_eq!(draft.longitude, 44.0);
    }

    #[test]
    fn test_device_id_rules() {
        let draft =
            validate_submission(dto(json!({ "deviceId": "", "latitude": 1, "longitude": 1 })))
                .unwrap();
        assert_eq!(draft.device_id, None);

        let draft =
            validate_submission(dto(json!({ "deviceId": null, "latitude": 1, "longitude": 1 })))
                .unwrap();
        assert_eq!(draft.device_id, None);

        assert_eq!(
            error_message(json!({ "deviceId": 42, "latitude": 1, "longitude": 1 })),
            "\"deviceId\" must be a string"
        );
    }

    #[test]
    fn test_device_id_checked_first() {
        assert_eq!(
            error_message(json!({ "deviceId": false, "latitude": 999 })),
            "\"deviceId\" must be a string"
        );
    }

    #[test]
    fn test_recorded_at_used_verbatim() {
        let draft = validate_submission(dto(json!({
            "latitude": 1,
            "longitude": 2,
            "recordedAt": "2024-03-10T08:15:30.250+02:00"
        })))
        .unwrap();

        let expected = Utc.with_ymd_and_hms(2024, 3, 10, 6, 15, 30).unwrap()
            + chrono::Duration::milliseconds(250);
        assert_eq!(draft.recorded_at, Some(expected));
    }

    #[test]
    fn test_recorded_at_invalid() {
        for bad in [json!("yesterday"), json!("2024-13-01"), json!(1700000000), json!(true)] {
            assert_eq!(
                error_message(json!({ "latitude": 1, "longitude": 2, "recordedAt": bad })),
                "\"recordedAt\" must be in ISO 8601 date format"
            );
        }
    }

    #[test]
    fn test_parse_iso8601_variants() {
        let midnight = Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap();
        assert_eq!(parse_iso8601("2024-01-02"), Some(midnight));
        assert_eq!(parse_iso8601("2024-01-02T00:00:00"), Some(midnight));
        assert_eq!(parse_iso8601("2024-01-02T00:00"), Some(midnight));
        assert_eq!(parse_iso8601("2024-01-02T00:00:00Z"), Some(midnight));
        assert_eq!(parse_iso8601("02/01/2024"), None);
    }

    #[test]
    fn test_parse_iso8601_offsets_without_seconds_or_colon() {
        let half_past = Utc.with_ymd_and_hms(2024, 6, 1, 10, 30, 0).unwrap();
        assert_eq!(parse_iso8601("2024-06-01T10:30Z"), Some(half_past));
        assert_eq!(parse_iso8601("2024-06-01T12:30+02:00"), Some(half_past));
        assert_eq!(parse_iso8601("2024-06-01T12:30:00+0200"), Some(half_past));
        assert_eq!(
            parse_iso8601("2024-06-01T12:30:00.5+02"),
            Some(half_past + chrono::Duration::milliseconds(500))
        );
        assert_eq!(
            parse_iso8601("2024-06-01T10:30:00.125z"),
            Some(half_past + chrono::Duration::milliseconds(125))
        );
        assert_eq!(parse_iso8601("2024-06-01T10:30 UTC"), None);
    }

    #[test]
    fn test_unknown_fields_ignored() {
        let draft = validate_submission(dto(json!({
            "latitude": 1,
            "longitude": 2,
            "speed": 88,
            "id": "ignored"
        })))
        .unwrap();
        assert_eq!(draft.latitude, 1.0);
    }
}
