//! Anomaly models and DTOs.

use serde::Serialize;
use sqlx::FromRow;
use vitals_core::types::{DbId, Timestamp};

/// An out-of-range reading recorded in the `anomalies` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Anomaly {
    pub id: DbId,
    pub device_id: String,
    pub metric_type: String,
    pub detected_at: Timestamp,
    pub value: f64,
    pub threshold_min: Option<f64>,
    pub threshold_max: Option<f64>,
    pub severity: String,
    pub resolved: bool,
}

/// DTO for inserting an anomaly. `resolved` always starts false.
#[derive(Debug, Clone)]
pub struct CreateAnomaly {
    pub device_id: String,
    pub metric_type: String,
    pub value: f64,
    pub threshold_min: Option<f64>,
    pub threshold_max: Option<f64>,
    pub severity: String,
}

/// Optional constraints for listing anomalies.
#[derive(Debug, Clone, Default)]
pub struct AnomalyFilter {
    pub device_id: Option<String>,
    pub metric_type: Option<String>,
    pub severity: Option<String>,
    pub resolved: Option<bool>,
    pub start: Option<Timestamp>,
    pub end: Option<Timestamp>,
}
