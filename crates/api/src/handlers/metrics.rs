//! Handlers for stored readings.

use axum::extract::{Path, State};
use axum::Json;
use vitals_core::error::CoreError;
use vitals_core::metric_kind::MetricKind;
use vitals_core::search::{parse_optional_time_bound, Pagination};
use vitals_db::models::metric::{HealthMetric, MetricFilter};
use vitals_db::repositories::MetricRepo;

use crate::error::AppResult;
use crate::extract::ValidQuery;
use crate::query::{enum_filter, non_empty, page_window, parse_id, MetricListParams};
use crate::response::{DataResponse, MessageResponse, PaginatedResponse};
use crate::state::AppState;

/// GET /api/metrics
///
/// Filtered listing, newest first, with pagination metadata.
pub async fn list_metrics(
    State(state): State<AppState>,
    ValidQuery(params): ValidQuery<MetricListParams>,
) -> AppResult<Json<PaginatedResponse<HealthMetric>>> {
    let filter = MetricFilter {
        device_id: non_empty(params.device_id),
        metric_type: enum_filter::<MetricKind>(params.metric_type)?,
        start: parse_optional_time_bound("start_date", params.start_date.as_deref())?,
        end: parse_optional_time_bound("end_date", params.end_date.as_deref())?,
    };
    let (limit, offset) = page_window(params.limit, params.offset);

    let data = MetricRepo::list(&state.pool, &filter, limit, offset).await?;
    let total = MetricRepo::count(&state.pool, &filter).await?;

    Ok(Json(PaginatedResponse::new(
        data,
        Pagination::new(total, limit, offset),
    )))
}

/// GET /api/metrics/{id}
pub async fn get_metric(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> AppResult<Json<DataResponse<HealthMetric>>> {
    let id = parse_id(&raw_id, "metric")?;
    let metric = MetricRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| CoreError::not_found("Metric", id))?;
    Ok(Json(DataResponse::new(metric)))
}

/// DELETE /api/metrics/{id}
pub async fn delete_metric(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> AppResult<Json<MessageResponse<HealthMetric>>> {
    let id = parse_id(&raw_id, "metric")?;
    let metric = MetricRepo::delete(&state.pool, id)
        .await?
        .ok_or_else(|| CoreError::not_found("Metric", id))?;
    tracing::info!(metric_id = id, device_id = %metric.device_id, "Metric deleted");
    Ok(Json(MessageResponse::new("Metric deleted successfully", metric)))
}
