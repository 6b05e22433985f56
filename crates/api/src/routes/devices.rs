//! Route definitions for devices.

use axum::routing::get;
use axum::Router;

use crate::handlers::devices;
use crate::state::AppState;

/// Routes mounted at `/devices`.
///
/// ```text
/// GET    /                      -> list_devices
/// POST   /                      -> register_device
/// GET    /{device_id}           -> get_device
/// PATCH  /{device_id}           -> update_device
/// DELETE /{device_id}           -> delete_device
/// GET    /{device_id}/metrics   -> list_device_metrics
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(devices::list_devices).post(devices::register_device),
        )
        .route(
            "/{device_id}",
            get(devices::get_device)
                .patch(devices::update_device)
                .delete(devices::delete_device),
        )
        .route("/{device_id}/metrics", get(devices::list_device_metrics))
}
