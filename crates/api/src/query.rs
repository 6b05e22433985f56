//! Query-string parameter types and the helpers that normalize them.
//!
//! Empty values (`?device_id=`) mean "no constraint". Enumerated filters are
//! checked against their canonical spelling and rejected with a 400 when
//! unknown.

use std::str::FromStr;

use serde::Deserialize;
use vitals_core::error::CoreError;
use vitals_core::search::{clamp_limit, clamp_offset, DEFAULT_LIMIT, MAX_LIMIT};

/// `GET /metrics`.
#[derive(Debug, Default, Deserialize)]
pub struct MetricListParams {
    pub device_id: Option<String>,
    pub metric_type: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// `GET /devices/{deviceId}/metrics`.
#[derive(Debug, Default, Deserialize)]
pub struct DeviceMetricsParams {
    pub metric_type: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// `GET /devices`.
#[derive(Debug, Default, Deserialize)]
pub struct DeviceListParams {
    pub status: Option<String>,
    pub device_type: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// `GET /anomalies`.
#[derive(Debug, Default, Deserialize)]
pub struct AnomalyListParams {
    pub device_id: Option<String>,
    pub metric_type: Option<String>,
    pub severity: Option<String>,
    /// Kept as text so a bad value yields a field-specific message.
    pub resolved: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// `GET /stats`.
#[derive(Debug, Default, Deserialize)]
pub struct StatsParams {
    pub device_id: Option<String>,
}

/// Effective `(limit, offset)` after defaults and clamping.
pub fn page_window(limit: Option<i64>, offset: Option<i64>) -> (i64, i64) {
    (
        clamp_limit(limit, DEFAULT_LIMIT, MAX_LIMIT),
        clamp_offset(offset),
    )
}

/// Drop empty strings.
pub fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

/// Validate an enumerated filter and return its canonical spelling.
///
/// `E` is one of the core enums (`MetricKind`, `Severity`, `DeviceStatus`);
/// their `FromStr` errors already name the field.
pub fn enum_filter<E>(value: Option<String>) -> Result<Option<String>, CoreError>
where
    E: FromStr<Err = CoreError> + ToString,
{
    non_empty(value)
        .map(|raw| raw.parse::<E>().map(|v| v.to_string()))
        .transpose()
}

/// Parse a numeric path id, naming the entity in the error.
pub fn parse_id(raw: &str, entity: &str) -> Result<i64, CoreError> {
    raw.parse::<i64>()
        .map_err(|_| CoreError::Validation(format!("Invalid {entity} ID")))
}
