//! Validation of incoming metric readings.
//!
//! A [`MetricCandidate`] is the loosely-typed shape accepted over HTTP.
//! [`validate_candidate`] checks it in a fixed order (presence first, then
//! kind) and returns a [`ValidReading`] ready for persistence.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::metric_kind::MetricKind;
use crate::search::parse_optional_time_bound;
use crate::types::Timestamp;

/// Message used when any required field is absent.
pub const MISSING_FIELDS_MSG: &str = "Missing required fields: device_id, metric_type, value";

/// A reading as submitted by a device, before validation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MetricCandidate {
    pub device_id: Option<String>,
    pub metric_type: Option<String>,
    pub value: Option<f64>,
    pub unit: Option<String>,
    /// RFC 3339 timestamp or bare `YYYY-MM-DD` date.
    pub timestamp: Option<String>,
}

/// A reading that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidReading {
    pub device_id: String,
    pub kind: MetricKind,
    pub value: f64,
    pub unit: Option<String>,
    /// Caller-supplied timestamp; `None` means "use ingestion time".
    pub timestamp: Option<Timestamp>,
}

/// Validate a single candidate. First failure wins.
///
/// - `device_id`, `metric_type`, and `value` must be present; empty strings
///   count as absent, a zero value does not.
/// - `metric_type` must name one of the known kinds.
/// - `timestamp`, when given, must parse as a time bound.
pub fn validate_candidate(candidate: &MetricCandidate) -> Result<ValidReading, CoreError> {
    let device_id = candidate.device_id.as_deref().filter(|s| !s.is_empty());
    let metric_type = candidate.metric_type.as_deref().filter(|s| !s.is_empty());

    let (Some(device_id), Some(metric_type), Some(value)) =
        (device_id, metric_type, candidate.value)
    else {
        return Err(CoreError::Validation(MISSING_FIELDS_MSG.to_string()));
    };

    let kind = metric_type.parse::<MetricKind>()?;
    let timestamp = parse_optional_time_bound("timestamp", candidate.timestamp.as_deref())?;

    Ok(ValidReading {
        device_id: device_id.to_string(),
        kind,
        value,
        unit: candidate.unit.clone().filter(|u| !u.is_empty()),
        timestamp,
    })
}

/// Validate every candidate of a batch before any is stored.
///
/// Errors are prefixed with the offending item's index.
pub fn validate_batch(candidates: &[MetricCandidate]) -> Result<Vec<ValidReading>, CoreError> {
    candidates
        .iter()
        .enumerate()
        .map(|(idx, c)| {
            validate_candidate(c).map_err(|e| match e {
                CoreError::Validation(msg) => CoreError::Validation(format!("metrics[{idx}]: {msg}")),
                other => other,
            })
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
