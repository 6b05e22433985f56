pub mod anomalies;
pub mod devices;
pub mod health;
pub mod ingest;
pub mod metrics;
pub mod stats;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /ingest                          heartbeat (GET), ingest one (POST)
/// /ingest/batch                    ingest many (POST)
///
/// /metrics                         list
/// /metrics/{id}                    get, delete
///
/// /devices                         list, register
/// /devices/{deviceId}              get, update, delete
/// /devices/{deviceId}/metrics      readings of one device
///
/// /anomalies                       list
/// /anomalies/{id}                  get, resolve
///
/// /stats                           dashboard summary
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/ingest", ingest::router())
        .nest("/metrics", metrics::router())
        .nest("/devices", devices::router())
        .nest("/anomalies", anomalies::router())
        .nest("/stats", stats::router())
}
