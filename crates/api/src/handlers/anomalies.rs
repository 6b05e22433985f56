//! Handlers for anomaly listing and resolution.

use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;
use vitals_core::error::CoreError;
use vitals_core::metric_kind::{MetricKind, Severity};
use vitals_core::search::{parse_optional_time_bound, parse_resolved, Pagination};
use vitals_db::models::anomaly::{Anomaly, AnomalyFilter};
use vitals_db::repositories::AnomalyRepo;

use crate::error::AppResult;
use crate::extract::{ValidJson, ValidQuery};
use crate::query::{enum_filter, non_empty, page_window, parse_id, AnomalyListParams};
use crate::response::{DataResponse, PaginatedResponse};
use crate::state::AppState;

/// Request body for `PATCH /anomalies/{id}`.
#[derive(Debug, Deserialize)]
pub struct ResolveAnomalyRequest {
    pub resolved: Option<bool>,
}

/// GET /api/anomalies
pub async fn list_anomalies(
    State(state): State<AppState>,
    ValidQuery(params): ValidQuery<AnomalyListParams>,
) -> AppResult<Json<PaginatedResponse<Anomaly>>> {
    let filter = AnomalyFilter {
        device_id: non_empty(params.device_id),
        metric_type: enum_filter::<MetricKind>(params.metric_type)?,
        severity: enum_filter::<Severity>(params.severity)?,
        resolved: parse_resolved(params.resolved.as_deref())?,
        start: parse_optional_time_bound("start_date", params.start_date.as_deref())?,
        end: parse_optional_time_bound("end_date", params.end_date.as_deref())?,
    };
    let (limit, offset) = page_window(params.limit, params.offset);

    let data = AnomalyRepo::list(&state.pool, &filter, limit, offset).await?;
    let total = AnomalyRepo::count(&state.pool, &filter).await?;

    Ok(Json(PaginatedResponse::new(
        data,
        Pagination::new(total, limit, offset),
    )))
}

/// GET /api/anomalies/{id}
pub async fn get_anomaly(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> AppResult<Json<DataResponse<Anomaly>>> {
    let id = parse_id(&raw_id, "anomaly")?;
    let anomaly = AnomalyRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| CoreError::not_found("Anomaly", id))?;
    Ok(Json(DataResponse::new(anomaly)))
}

/// PATCH /api/anomalies/{id}
///
/// Overwrites `resolved` with the given value, in either direction.
pub async fn resolve_anomaly(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    ValidJson(input): ValidJson<ResolveAnomalyRequest>,
) -> AppResult<Json<DataResponse<Anomaly>>> {
    let id = parse_id(&raw_id, "anomaly")?;
    let resolved = input
        .resolved
        .ok_or_else(|| CoreError::Validation("resolved field is required".to_string()))?;

    let anomaly = AnomalyRepo::set_resolved(&state.pool, id, resolved)
        .await?
        .ok_or_else(|| CoreError::not_found("Anomaly", id))?;
    tracing::info!(anomaly_id = id, resolved, "Anomaly resolution updated");

    Ok(Json(DataResponse::new(anomaly)))
}
