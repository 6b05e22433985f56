//! Route definitions for reading ingestion.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::ingest;
use crate::state::AppState;

/// Routes mounted at `/ingest`.
///
/// ```text
/// GET  /          -> heartbeat
/// POST /          -> ingest_one
/// POST /batch     -> ingest_many
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(ingest::heartbeat).post(ingest::ingest_one))
        .route("/batch", post(ingest::ingest_many))
}
