//! Ingestion pipeline: persist a validated reading, refresh its device,
//! evaluate it, and record an anomaly when it is out of range.
//!
//! The pipeline is generic over [`IngestStore`] so it runs unchanged
//! against Postgres and against the in-memory store used in tests. The
//! writes are not wrapped in a transaction: a failure partway through
//! leaves the earlier writes in place and is reported to the caller.

use chrono::Utc;
use serde::Serialize;
use vitals_core::metric_kind::{MetricKind, Severity};
use vitals_core::thresholds::{self, Evaluation};
use vitals_core::validation::ValidReading;
use vitals_db::models::anomaly::{Anomaly, CreateAnomaly};
use vitals_db::models::metric::{CreateHealthMetric, HealthMetric};
use vitals_db::store::IngestStore;

/// Result of ingesting one reading.
#[derive(Debug, Clone)]
pub struct IngestOutcome {
    pub metric: HealthMetric,
    pub evaluation: Evaluation,
    /// The stored anomaly, when the evaluator flagged the reading.
    pub anomaly: Option<Anomaly>,
}

/// Summary of an anomaly raised during batch ingestion.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RaisedAnomaly {
    pub device_id: String,
    pub metric_type: MetricKind,
    pub value: f64,
    pub severity: Severity,
}

/// Result of ingesting a batch.
#[derive(Debug, Clone, Default)]
pub struct BatchOutcome {
    pub inserted: usize,
    pub anomalies: Vec<RaisedAnomaly>,
}

/// Ingest one validated reading.
///
/// Order: store the reading, upsert the device, evaluate, store the anomaly.
/// A missing timestamp defaults to the current time.
pub async fn ingest_reading<S: IngestStore>(
    store: &S,
    reading: &ValidReading,
) -> Result<IngestOutcome, sqlx::Error> {
    let metric = store
        .insert_metric(&CreateHealthMetric {
            device_id: reading.device_id.clone(),
            metric_type: reading.kind.as_str().to_string(),
            value: reading.value,
            unit: reading.unit.clone(),
            timestamp: reading.timestamp.unwrap_or_else(Utc::now),
        })
        .await?;

    store.touch_device(&reading.device_id).await?;

    let evaluation = thresholds::evaluate(reading.kind.as_str(), reading.value);
    let anomaly = if evaluation.is_anomaly {
        let anomaly = store
            .insert_anomaly(&CreateAnomaly {
                device_id: reading.device_id.clone(),
                metric_type: reading.kind.as_str().to_string(),
                value: reading.value,
                threshold_min: evaluation.threshold_min,
                threshold_max: evaluation.threshold_max,
                severity: evaluation.severity.as_str().to_string(),
            })
            .await?;
        tracing::warn!(
            device_id = %reading.device_id,
            metric_type = %reading.kind,
            value = reading.value,
            severity = %evaluation.severity,
            anomaly_id = anomaly.id,
            "Anomaly detected",
        );
        Some(anomaly)
    } else {
        None
    };

    tracing::debug!(
        device_id = %reading.device_id,
        metric_id = metric.id,
        metric_type = %reading.kind,
        "Reading stored",
    );

    Ok(IngestOutcome {
        metric,
        evaluation,
        anomaly,
    })
}

/// Ingest readings one after another.
///
/// Stops at the first persistence failure; readings before it stay stored.
pub async fn ingest_batch<S: IngestStore>(
    store: &S,
    readings: &[ValidReading],
) -> Result<BatchOutcome, sqlx::Error> {
    let mut outcome = BatchOutcome::default();
    for reading in readings {
        let result = ingest_reading(store, reading).await?;
        outcome.inserted += 1;
        if result.anomaly.is_some() {
            outcome.anomalies.push(RaisedAnomaly {
                device_id: reading.device_id.clone(),
                metric_type: reading.kind,
                value: reading.value,
                severity: result.evaluation.severity,
            });
        }
    }
    Ok(outcome)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
