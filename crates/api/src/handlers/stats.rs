//! Handler for the dashboard summary.

use axum::extract::State;
use axum::Json;
use serde::Serialize;
use vitals_db::models::stats::StatsSummary;
use vitals_db::repositories::StatsRepo;

use crate::error::AppResult;
use crate::extract::ValidQuery;
use crate::query::{non_empty, StatsParams};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub success: bool,
    pub stats: StatsSummary,
}

/// GET /api/stats
///
/// `device_id` narrows reading and anomaly figures; device counts stay global.
pub async fn get_stats(
    State(state): State<AppState>,
    ValidQuery(params): ValidQuery<StatsParams>,
) -> AppResult<Json<StatsResponse>> {
    let device_id = non_empty(params.device_id);
    let stats = StatsRepo::summary(&state.pool, device_id.as_deref()).await?;
    Ok(Json(StatsResponse {
        success: true,
        stats,
    }))
}
