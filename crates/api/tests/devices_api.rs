//! Integration tests for `/api/devices`.

mod common;

use axum::http::StatusCode;
use serde_json::json;
use sqlx::PgPool;

use common::{build_test_app, delete, get, ingest, patch_json, post_json};

async fn register(pool: &PgPool, body: serde_json::Value) -> (StatusCode, serde_json::Value) {
    post_json(build_test_app(pool.clone()), "/api/devices", body).await
}

// ---------------------------------------------------------------------------
// Registration
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_register_device(pool: PgPool) {
    let (status, json) = register(
        &pool,
        json!({ "device_id": "dev-1", "device_name": "Wrist band", "device_type": "wearable" }),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["success"], true);
    assert_eq!(json["data"]["device_id"], "dev-1");
    assert_eq!(json["data"]["device_name"], "Wrist band");
    assert_eq!(json["data"]["status"], "active");
    assert!(json["data"]["last_seen"].is_string());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_repeated_registration_is_idempotent(pool: PgPool) {
    let body = json!({ "device_id": "dev-1", "device_name": "Wrist band" });
    let (_, first) = register(&pool, body.clone()).await;
    let (status, second) = register(&pool, body).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(second["data"]["device_name"], "Wrist band");
    assert_eq!(second["data"]["created_at"], first["data"]["created_at"]);

    let rows: i64 = sqlx::query_scalar("SELECT COUNT(*)::BIGINT FROM devices")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(rows, 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_reregistration_reactivates_and_keeps_name(pool: PgPool) {
    register(&pool, json!({ "device_id": "dev-1", "device_name": "Band" })).await;
    patch_json(
        build_test_app(pool.clone()),
        "/api/devices/dev-1",
        json!({ "status": "maintenance" }),
    )
    .await;

    let (_, json) = register(&pool, json!({ "device_id": "dev-1" })).await;
    assert_eq!(json["data"]["status"], "active");
    assert_eq!(json["data"]["device_name"], "Band");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_register_requires_device_id(pool: PgPool) {
    let (status, json) = register(&pool, json!({ "device_name": "nameless" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "device_id is required");
}

// ---------------------------------------------------------------------------
// Lookup, update, delete
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_get_unknown_device_is_404(pool: PgPool) {
    let (status, json) = get(build_test_app(pool), "/api/devices/ghost").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "Device not found");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_patch_device(pool: PgPool) {
    ingest(&pool, "dev-1", "steps", 10.0).await;

    let (status, json) = patch_json(
        build_test_app(pool.clone()),
        "/api/devices/dev-1",
        json!({ "device_name": "Chest strap", "status": "inactive" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["device_name"], "Chest strap");
    assert_eq!(json["data"]["status"], "inactive");

    let (_, json) = get(build_test_app(pool), "/api/devices/dev-1").await;
    assert_eq!(json["data"]["status"], "inactive");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_patch_errors(pool: PgPool) {
    let (status, _) = patch_json(
        build_test_app(pool.clone()),
        "/api/devices/ghost",
        json!({ "device_name": "x" }),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    ingest(&pool, "dev-1", "steps", 10.0).await;

    let (status, json) =
        patch_json(build_test_app(pool.clone()), "/api/devices/dev-1", json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "No fields to update");

    let (status, json) = patch_json(
        build_test_app(pool),
        "/api/devices/dev-1",
        json!({ "status": "offline" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("status"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_patch_with_only_empty_status_is_rejected(pool: PgPool) {
    ingest(&pool, "dev-1", "steps", 10.0).await;

    let (status, json) = patch_json(
        build_test_app(pool.clone()),
        "/api/devices/dev-1",
        json!({ "status": "" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "No fields to update");

    let (_, json) = get(build_test_app(pool), "/api/devices/dev-1").await;
    assert_eq!(json["data"]["status"], "active");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_device_keeps_its_readings(pool: PgPool) {
    ingest(&pool, "dev-1", "heart_rate", 180.0).await;

    let (status, json) = delete(build_test_app(pool.clone()), "/api/devices/dev-1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["message"], "Device deleted successfully");
    assert_eq!(json["data"]["device_id"], "dev-1");

    let (status, _) = delete(build_test_app(pool.clone()), "/api/devices/dev-1").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, json) = get(build_test_app(pool.clone()), "/api/metrics?device_id=dev-1").await;
    assert_eq!(json["pagination"]["total"], 1);
    let (_, json) = get(build_test_app(pool), "/api/anomalies?device_id=dev-1").await;
    assert_eq!(json["pagination"]["total"], 1);
}

// ---------------------------------------------------------------------------
// Listing
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_devices_filters(pool: PgPool) {
    register(&pool, json!({ "device_id": "a", "device_type": "wearable" })).await;
    register(&pool, json!({ "device_id": "b", "device_type": "scale" })).await;
    register(&pool, json!({ "device_id": "c", "device_type": "wearable" })).await;
    patch_json(
        build_test_app(pool.clone()),
        "/api/devices/c",
        json!({ "status": "maintenance" }),
    )
    .await;

    let (_, json) = get(build_test_app(pool.clone()), "/api/devices").await;
    assert_eq!(json["pagination"]["total"], 3);

    let (_, json) = get(
        build_test_app(pool.clone()),
        "/api/devices?device_type=wearable&status=active",
    )
    .await;
    assert_eq!(json["pagination"]["total"], 1);
    assert_eq!(json["data"][0]["device_id"], "a");

    let (status, _) = get(build_test_app(pool), "/api/devices?status=offline").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_device_metrics(pool: PgPool) {
    ingest(&pool, "dev-1", "heart_rate", 70.0).await;
    ingest(&pool, "dev-1", "steps", 100.0).await;
    ingest(&pool, "dev-2", "heart_rate", 75.0).await;

    let (status, json) = get(build_test_app(pool.clone()), "/api/devices/dev-1/metrics").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);
    assert_eq!(json["device_id"], "dev-1");
    assert_eq!(json["count"], 2);
    assert_eq!(json["data"].as_array().unwrap().len(), 2);

    let (_, json) = get(
        build_test_app(pool.clone()),
        "/api/devices/dev-1/metrics?metric_type=steps",
    )
    .await;
    assert_eq!(json["count"], 1);
    assert_eq!(json["data"][0]["metric_type"], "steps");

    let (_, json) = get(build_test_app(pool.clone()), "/api/devices/dev-1/metrics?limit=1").await;
    assert_eq!(json["count"], 1);

    let (_, json) = get(build_test_app(pool), "/api/devices/unknown/metrics").await;
    assert_eq!(json["count"], 0);
}
