//! Pagination math and query-string parsing helpers shared by list endpoints.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::error::CoreError;
use crate::types::Timestamp;

/// Page size used when the caller does not pass `limit`.
pub const DEFAULT_LIMIT: i64 = 100;

/// Largest page a caller may request.
pub const MAX_LIMIT: i64 = 1000;

/// Clamp a user-provided limit to valid bounds.
pub fn clamp_limit(limit: Option<i64>, default: i64, max: i64) -> i64 {
    limit.unwrap_or(default).max(1).min(max)
}

/// Clamp a user-provided offset to non-negative.
pub fn clamp_offset(offset: Option<i64>) -> i64 {
    offset.unwrap_or(0).max(0)
}

/// Pagination metadata returned alongside every list response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
    pub has_more: bool,
}

impl Pagination {
    pub fn new(total: i64, limit: i64, offset: i64) -> Self {
        Self {
            total,
            limit,
            offset,
            has_more: offset.saturating_add(limit) < total,
        }
    }
}

/// Parse a `start_date` / `end_date` query value.
///
/// Accepts RFC 3339 timestamps or bare `YYYY-MM-DD` dates (midnight UTC).
pub fn parse_time_bound(field: &str, raw: &str) -> Result<Timestamp, CoreError> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(ts.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
        .ok_or_else(|| {
            CoreError::Validation(format!(
                "Invalid {field}: expected RFC 3339 timestamp or YYYY-MM-DD"
            ))
        })
}

/// Parse an optional time bound, treating an empty value as absent.
pub fn parse_optional_time_bound(
    field: &str,
    raw: Option<&str>,
) -> Result<Option<Timestamp>, CoreError> {
    match raw.filter(|s| !s.is_empty()) {
        Some(s) => parse_time_bound(field, s).map(Some),
        None => Ok(None),
    }
}

/// Parse a `resolved` filter value (`true` / `false`).
pub fn parse_resolved(raw: Option<&str>) -> Result<Option<bool>, CoreError> {
    match raw.filter(|s| !s.is_empty()) {
        None => Ok(None),
        Some("true") => Ok(Some(true)),
        Some("false") => Ok(Some(false)),
        Some(other) => Err(CoreError::Validation(format!(
            "Invalid resolved '{other}': must be true or false"
        ))),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use chrono::{Datelike, Timelike};

    use super::*;

    #[test]
    fn clamp_limit_uses_default_when_none() {
        assert_eq!(clamp_limit(None, DEFAULT_LIMIT, MAX_LIMIT), 100);
    }

    #[test]
    fn clamp_limit_respects_max() {
        assert_eq!(clamp_limit(Some(5000), DEFAULT_LIMIT, MAX_LIMIT), 1000);
    }

    #[test]
    fn clamp_limit_floors_at_one() {
        assert_eq!(clamp_limit(Some(0), DEFAULT_LIMIT, MAX_LIMIT), 1);
        assert_eq!(clamp_limit(Some(-3), DEFAULT_LIMIT, MAX_LIMIT), 1);
    }

    #[test]
    fn clamp_offset_floors_at_zero() {
        assert_eq!(clamp_offset(None), 0);
        assert_eq!(clamp_offset(Some(-10)), 0);
        assert_eq!(clamp_offset(Some(40)), 40);
    }

    #[test]
    fn has_more_when_page_ends_before_total() {
        assert!(Pagination::new(120, 50, 0).has_more);
        assert!(Pagination::new(120, 50, 50).has_more);
    }

    #[test]
    fn no_more_on_last_page() {
        assert!(!Pagination::new(120, 50, 100).has_more);
        assert!(!Pagination::new(100, 50, 50).has_more);
        assert!(!Pagination::new(0, 100, 0).has_more);
    }

    #[test]
    fn huge_offset_is_an_empty_last_page() {
        let page = Pagination::new(
            0,
            clamp_limit(None, DEFAULT_LIMIT, MAX_LIMIT),
            clamp_offset(Some(i64::MAX)),
        );
        assert_eq!(page.offset, i64::MAX);
        assert!(!page.has_more);
        assert!(!Pagination::new(i64::MAX, 1000, i64::MAX - 10).has_more);
    }

    #[test]
    fn parses_rfc3339_with_offset() {
        let ts = parse_time_bound("start_date", "2024-03-01T12:00:00+02:00").unwrap();
        assert_eq!(ts.hour(), 10);
    }

    #[test]
    fn parses_bare_date_as_midnight_utc() {
        let ts = parse_time_bound("end_date", "2024-03-01").unwrap();
        assert_eq!((ts.year(), ts.month(), ts.day(), ts.hour()), (2024, 3, 1, 0));
    }

    #[test]
    fn rejects_garbage_and_names_the_field() {
        let err = parse_time_bound("start_date", "yesterday").unwrap_err();
        assert!(err.to_string().contains("start_date"));
    }

    #[test]
    fn empty_time_bound_is_absent() {
        assert_eq!(parse_optional_time_bound("start_date", Some("")).unwrap(), None);
        assert_eq!(parse_optional_time_bound("start_date", None).unwrap(), None);
    }

    #[test]
    fn resolved_filter_parsing() {
        assert_eq!(parse_resolved(Some("true")).unwrap(), Some(true));
        assert_eq!(parse_resolved(Some("false")).unwrap(), Some(false));
        assert_eq!(parse_resolved(None).unwrap(), None);
        assert!(parse_resolved(Some("yes")).is_err());
    }
}
