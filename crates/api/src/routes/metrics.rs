//! Route definitions for stored readings.

use axum::routing::get;
use axum::Router;

use crate::handlers::metrics;
use crate::state::AppState;

/// Routes mounted at `/metrics`.
///
/// ```text
/// GET    /        -> list_metrics
/// GET    /{id}    -> get_metric
/// DELETE /{id}    -> delete_metric
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(metrics::list_metrics))
        .route(
            "/{id}",
            get(metrics::get_metric).delete(metrics::delete_metric),
        )
}
