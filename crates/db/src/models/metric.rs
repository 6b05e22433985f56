//! Health reading models and DTOs.

use serde::Serialize;
use sqlx::FromRow;
use vitals_core::types::{DbId, Timestamp};

/// A stored reading from the `health_metrics` table. Immutable once created.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct HealthMetric {
    pub id: DbId,
    pub device_id: String,
    pub metric_type: String,
    pub value: f64,
    pub unit: Option<String>,
    pub timestamp: Timestamp,
    pub created_at: Timestamp,
}

/// DTO for inserting a reading.
#[derive(Debug, Clone)]
pub struct CreateHealthMetric {
    pub device_id: String,
    pub metric_type: String,
    pub value: f64,
    pub unit: Option<String>,
    pub timestamp: Timestamp,
}

/// Optional constraints for listing readings. Absent fields are not applied.
#[derive(Debug, Clone, Default)]
pub struct MetricFilter {
    pub device_id: Option<String>,
    pub metric_type: Option<String>,
    pub start: Option<Timestamp>,
    pub end: Option<Timestamp>,
}
