//! Route definitions for anomalies.

use axum::routing::get;
use axum::Router;

use crate::handlers::anomalies;
use crate::state::AppState;

/// Routes mounted at `/anomalies`.
///
/// ```text
/// GET   /        -> list_anomalies
/// GET   /{id}    -> get_anomaly
/// PATCH /{id}    -> resolve_anomaly
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(anomalies::list_anomalies))
        .route(
            "/{id}",
            get(anomalies::get_anomaly).patch(anomalies::resolve_anomaly),
        )
}
