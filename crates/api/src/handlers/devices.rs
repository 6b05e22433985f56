//! Handlers for device registration and lookup.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use vitals_core::error::CoreError;
use vitals_core::metric_kind::{DeviceStatus, MetricKind};
use vitals_core::search::{parse_optional_time_bound, Pagination};
use vitals_db::models::device::{Device, DeviceFilter, RegisterDevice, UpdateDevice};
use vitals_db::models::metric::{HealthMetric, MetricFilter};
use vitals_db::repositories::{DeviceRepo, MetricRepo};

use crate::error::{AppError, AppResult};
use crate::extract::{ValidJson, ValidQuery};
use crate::query::{enum_filter, non_empty, page_window, DeviceListParams, DeviceMetricsParams};
use crate::response::{DataResponse, MessageResponse, PaginatedResponse};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /devices`.
#[derive(Debug, Deserialize)]
pub struct RegisterDeviceRequest {
    pub device_id: Option<String>,
    pub device_name: Option<String>,
    pub device_type: Option<String>,
}

/// Readings of one device, without total-count pagination.
#[derive(Debug, Serialize)]
pub struct DeviceMetricsResponse {
    pub success: bool,
    pub device_id: String,
    pub data: Vec<HealthMetric>,
    pub count: usize,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/devices
pub async fn list_devices(
    State(state): State<AppState>,
    ValidQuery(params): ValidQuery<DeviceListParams>,
) -> AppResult<Json<PaginatedResponse<Device>>> {
    let filter = DeviceFilter {
        status: enum_filter::<DeviceStatus>(params.status)?,
        device_type: non_empty(params.device_type),
    };
    let (limit, offset) = page_window(params.limit, params.offset);

    let data = DeviceRepo::list(&state.pool, &filter, limit, offset).await?;
    let total = DeviceRepo::count(&state.pool, &filter).await?;

    Ok(Json(PaginatedResponse::new(
        data,
        Pagination::new(total, limit, offset),
    )))
}

/// POST /api/devices
///
/// Register a device or refresh an existing one. Omitted name/type keep
/// their stored values.
pub async fn register_device(
    State(state): State<AppState>,
    ValidJson(input): ValidJson<RegisterDeviceRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Device>>)> {
    let device_id = non_empty(input.device_id)
        .ok_or_else(|| CoreError::Validation("device_id is required".to_string()))?;

    let device = DeviceRepo::register(
        &state.pool,
        &RegisterDevice {
            device_id,
            device_name: input.device_name,
            device_type: input.device_type,
        },
    )
    .await?;
    tracing::info!(device_id = %device.device_id, "Device registered");

    Ok((StatusCode::CREATED, Json(DataResponse::new(device))))
}

/// GET /api/devices/{deviceId}
pub async fn get_device(
    State(state): State<AppState>,
    Path(device_id): Path<String>,
) -> AppResult<Json<DataResponse<Device>>> {
    let device = DeviceRepo::find_by_id(&state.pool, &device_id)
        .await?
        .ok_or_else(|| CoreError::not_found("Device", &device_id))?;
    Ok(Json(DataResponse::new(device)))
}

/// PATCH /api/devices/{deviceId}
///
/// Partial update of name, type, and status.
pub async fn update_device(
    State(state): State<AppState>,
    Path(device_id): Path<String>,
    ValidJson(input): ValidJson<UpdateDevice>,
) -> AppResult<Json<DataResponse<Device>>> {
    if DeviceRepo::find_by_id(&state.pool, &device_id).await?.is_none() {
        return Err(CoreError::not_found("Device", &device_id).into());
    }
    let input = UpdateDevice {
        status: enum_filter::<DeviceStatus>(input.status)?,
        ..input
    };
    if input.is_empty() {
        return Err(AppError::BadRequest("No fields to update".to_string()));
    }

    let device = DeviceRepo::update(&state.pool, &device_id, &input)
        .await?
        .ok_or_else(|| CoreError::not_found("Device", &device_id))?;
    tracing::info!(device_id = %device.device_id, status = %device.status, "Device updated");

    Ok(Json(DataResponse::new(device)))
}

/// DELETE /api/devices/{deviceId}
///
/// Readings and anomalies of the device are kept.
pub async fn delete_device(
    State(state): State<AppState>,
    Path(device_id): Path<String>,
) -> AppResult<Json<MessageResponse<Device>>> {
    let device = DeviceRepo::delete(&state.pool, &device_id)
        .await?
        .ok_or_else(|| CoreError::not_found("Device", &device_id))?;
    tracing::info!(device_id = %device.device_id, "Device deleted");
    Ok(Json(MessageResponse::new("Device deleted successfully", device)))
}

/// GET /api/devices/{deviceId}/metrics
///
/// Readings of one device, newest first. `count` is the number returned.
pub async fn list_device_metrics(
    State(state): State<AppState>,
    Path(device_id): Path<String>,
    ValidQuery(params): ValidQuery<DeviceMetricsParams>,
) -> AppResult<Json<DeviceMetricsResponse>> {
    let filter = MetricFilter {
        device_id: Some(device_id.clone()),
        metric_type: enum_filter::<MetricKind>(params.metric_type)?,
        start: parse_optional_time_bound("start_date", params.start_date.as_deref())?,
        end: parse_optional_time_bound("end_date", params.end_date.as_deref())?,
    };
    let (limit, offset) = page_window(params.limit, params.offset);

    let data = MetricRepo::list(&state.pool, &filter, limit, offset).await?;

    Ok(Json(DeviceMetricsResponse {
        success: true,
        count: data.len(),
        device_id,
        data,
    }))
}
