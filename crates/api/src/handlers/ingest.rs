//! Handlers for reading ingestion.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use vitals_core::error::CoreError;
use vitals_core::metric_kind::Severity;
use vitals_core::types::Timestamp;
use vitals_core::validation::{validate_batch, validate_candidate, MetricCandidate};
use vitals_db::models::metric::HealthMetric;

use crate::error::{AppError, AppResult};
use crate::extract::ValidJson;
use crate::ingest::{ingest_batch, ingest_reading, RaisedAnomaly};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// Whether the ingested reading raised an anomaly.
#[derive(Debug, Serialize)]
pub struct AnomalyFlag {
    pub detected: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<Severity>,
}

#[derive(Debug, Serialize)]
pub struct IngestResponse {
    pub success: bool,
    pub data: HealthMetric,
    pub anomaly: AnomalyFlag,
}

#[derive(Debug, Serialize)]
pub struct BatchIngestResponse {
    pub success: bool,
    pub inserted: usize,
    pub anomalies_detected: usize,
    pub anomalies: Vec<RaisedAnomaly>,
}

#[derive(Debug, Serialize)]
pub struct HeartbeatResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub timestamp: Timestamp,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/ingest
///
/// Validate and store one reading, then evaluate it.
pub async fn ingest_one(
    State(state): State<AppState>,
    ValidJson(candidate): ValidJson<MetricCandidate>,
) -> AppResult<(StatusCode, Json<IngestResponse>)> {
    let reading = validate_candidate(&candidate)?;
    let outcome = ingest_reading(&state.pool, &reading).await?;

    let anomaly = AnomalyFlag {
        detected: outcome.anomaly.is_some(),
        severity: outcome.anomaly.as_ref().map(|_| outcome.evaluation.severity),
    };

    Ok((
        StatusCode::CREATED,
        Json(IngestResponse {
            success: true,
            data: outcome.metric,
            anomaly,
        }),
    ))
}

/// POST /api/ingest/batch
///
/// Body: `{ "metrics": [ .. ] }`. Every item is validated before any is
/// stored; storage then proceeds in order and stops at the first failure.
pub async fn ingest_many(
    State(state): State<AppState>,
    ValidJson(body): ValidJson<Value>,
) -> AppResult<(StatusCode, Json<BatchIngestResponse>)> {
    let items = body
        .get("metrics")
        .and_then(Value::as_array)
        .ok_or_else(|| {
            AppError::BadRequest("Request body must contain a \"metrics\" array".to_string())
        })?;

    let candidates = items
        .iter()
        .enumerate()
        .map(|(idx, item)| {
            MetricCandidate::deserialize(item)
                .map_err(|e| CoreError::Validation(format!("metrics[{idx}]: {e}")))
        })
        .collect::<Result<Vec<_>, _>>()?;
    let readings = validate_batch(&candidates)?;

    let outcome = ingest_batch(&state.pool, &readings).await?;
    tracing::info!(
        inserted = outcome.inserted,
        anomalies = outcome.anomalies.len(),
        "Batch ingested",
    );

    Ok((
        StatusCode::CREATED,
        Json(BatchIngestResponse {
            success: true,
            inserted: outcome.inserted,
            anomalies_detected: outcome.anomalies.len(),
            anomalies: outcome.anomalies,
        }),
    ))
}

/// GET /api/ingest
pub async fn heartbeat() -> Json<HeartbeatResponse> {
    Json(HeartbeatResponse {
        status: "healthy",
        service: "health-metrics-ingestion",
        timestamp: Utc::now(),
    })
}
