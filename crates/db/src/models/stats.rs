//! Aggregate dashboard statistics.

use std::collections::BTreeMap;

use serde::Serialize;
use sqlx::FromRow;

/// One `GROUP BY` bucket: a key and its row count.
#[derive(Debug, Clone, FromRow)]
pub struct KeyCount {
    pub key: String,
    pub count: i64,
}

/// Headline counts plus per-severity and per-kind breakdowns.
#[derive(Debug, Clone, Default, Serialize)]
pub struct StatsSummary {
    pub total_metrics: i64,
    pub total_devices: i64,
    pub active_devices: i64,
    pub unresolved_anomalies: i64,
    pub recent_activity_24h: i64,
    pub anomalies_by_severity: BTreeMap<String, i64>,
    pub metrics_by_type: BTreeMap<String, i64>,
}
