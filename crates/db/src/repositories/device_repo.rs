//! Repository for the `devices` table.

use sqlx::PgPool;

use crate::filter::FilterBuilder;
use crate::models::device::{Device, DeviceFilter, RegisterDevice, UpdateDevice};

/// Column list for `devices` SELECT queries.
const COLUMNS: &str = "device_id, device_name, device_type, last_seen, status, created_at";

/// Provides CRUD and upsert operations for devices.
pub struct DeviceRepo;

impl DeviceRepo {
    /// Record that a device just reported a reading.
    ///
    /// Creates the device if absent; otherwise refreshes `last_seen` and
    /// forces `status` back to `active`. Concurrent calls converge on the
    /// last writer.
    pub async fn touch(pool: &PgPool, device_id: &str) -> Result<Device, sqlx::Error> {
        let query = format!(
            "INSERT INTO devices (device_id, last_seen, status) \
             VALUES ($1, NOW(), 'active') \
             ON CONFLICT (device_id) \
             DO UPDATE SET last_seen = NOW(), status = 'active' \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Device>(&query)
            .bind(device_id)
            .fetch_one(pool)
            .await
    }

    /// Register a device, or refresh an existing registration.
    ///
    /// Name and type are only overwritten when provided.
    pub async fn register(pool: &PgPool, input: &RegisterDevice) -> Result<Device, sqlx::Error> {
        let query = format!(
            "INSERT INTO devices (device_id, device_name, device_type, last_seen, status) \
             VALUES ($1, $2, $3, NOW(), 'active') \
             ON CONFLICT (device_id) \
             DO UPDATE SET \
                device_name = COALESCE(EXCLUDED.device_name, devices.device_name), \
                device_type = COALESCE(EXCLUDED.device_type, devices.device_type), \
                last_seen = NOW(), \
                status = 'active' \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Device>(&query)
            .bind(&input.device_id)
            .bind(&input.device_name)
            .bind(&input.device_type)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, device_id: &str) -> Result<Option<Device>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM devices WHERE device_id = $1");
        sqlx::query_as::<_, Device>(&query)
            .bind(device_id)
            .fetch_optional(pool)
            .await
    }

    /// Apply a partial update. Returns `None` if the device does not exist.
    pub async fn update(
        pool: &PgPool,
        device_id: &str,
        input: &UpdateDevice,
    ) -> Result<Option<Device>, sqlx::Error> {
        let query = format!(
            "UPDATE devices SET \
                device_name = COALESCE($2, device_name), \
                device_type = COALESCE($3, device_type), \
                status = COALESCE($4, status) \
             WHERE device_id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Device>(&query)
            .bind(device_id)
            .bind(&input.device_name)
            .bind(&input.device_type)
            .bind(&input.status)
            .fetch_optional(pool)
            .await
    }

    /// Delete a device, returning the removed row if it existed.
    ///
    /// Readings and anomalies for the device are kept.
    pub async fn delete(pool: &PgPool, device_id: &str) -> Result<Option<Device>, sqlx::Error> {
        let query = format!("DELETE FROM devices WHERE device_id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Device>(&query)
            .bind(device_id)
            .fetch_optional(pool)
            .await
    }

    /// List devices matching `filter`, most recently seen first.
    pub async fn list(
        pool: &PgPool,
        filter: &DeviceFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Device>, sqlx::Error> {
        let predicate = build_filter(filter);
        let limit_idx = predicate.next_param();
        let query = format!(
            "SELECT {COLUMNS} FROM devices {} \
             ORDER BY last_seen DESC NULLS LAST, device_id \
             LIMIT ${limit_idx} OFFSET ${}",
            predicate.where_clause(),
            limit_idx + 1
        );
        predicate
            .bind_as(sqlx::query_as::<_, Device>(&query))
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    pub async fn count(pool: &PgPool, filter: &DeviceFilter) -> Result<i64, sqlx::Error> {
        let predicate = build_filter(filter);
        let query = format!(
            "SELECT COUNT(*)::BIGINT FROM devices {}",
            predicate.where_clause()
        );
        predicate
            .bind_scalar(sqlx::query_scalar::<_, i64>(&query))
            .fetch_one(pool)
            .await
    }
}

fn build_filter(filter: &DeviceFilter) -> FilterBuilder {
    FilterBuilder::new()
        .eq_text("status", filter.status.as_deref())
        .eq_text("device_type", filter.device_type.as_deref())
}
