//! Repository for the `health_metrics` table (append-only readings).

use sqlx::PgPool;
use vitals_core::types::DbId;

use crate::filter::FilterBuilder;
use crate::models::metric::{CreateHealthMetric, HealthMetric, MetricFilter};

/// Column list for `health_metrics` SELECT queries.
const COLUMNS: &str = "id, device_id, metric_type, value, unit, timestamp, created_at";

/// Provides query operations for health readings.
pub struct MetricRepo;

impl MetricRepo {
    /// Insert a single reading.
    pub async fn insert(
        pool: &PgPool,
        input: &CreateHealthMetric,
    ) -> Result<HealthMetric, sqlx::Error> {
        let query = format!(
            "INSERT INTO health_metrics (device_id, metric_type, value, unit, timestamp) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, HealthMetric>(&query)
            .bind(&input.device_id)
            .bind(&input.metric_type)
            .bind(input.value)
            .bind(&input.unit)
            .bind(input.timestamp)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<HealthMetric>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM health_metrics WHERE id = $1");
        sqlx::query_as::<_, HealthMetric>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a reading, returning the removed row if it existed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<Option<HealthMetric>, sqlx::Error> {
        let query = format!("DELETE FROM health_metrics WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, HealthMetric>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List readings matching `filter`, newest first.
    pub async fn list(
        pool: &PgPool,
        filter: &MetricFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<HealthMetric>, sqlx::Error> {
        let predicate = build_filter(filter);
        let limit_idx = predicate.next_param();
        let query = format!(
            "SELECT {COLUMNS} FROM health_metrics {} \
             ORDER BY timestamp DESC, id DESC \
             LIMIT ${limit_idx} OFFSET ${}",
            predicate.where_clause(),
            limit_idx + 1
        );
        predicate
            .bind_as(sqlx::query_as::<_, HealthMetric>(&query))
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Count readings matching `filter` (for pagination metadata).
    pub async fn count(pool: &PgPool, filter: &MetricFilter) -> Result<i64, sqlx::Error> {
        let predicate = build_filter(filter);
        let query = format!(
            "SELECT COUNT(*)::BIGINT FROM health_metrics {}",
            predicate.where_clause()
        );
        predicate
            .bind_scalar(sqlx::query_scalar::<_, i64>(&query))
            .fetch_one(pool)
            .await
    }
}

fn build_filter(filter: &MetricFilter) -> FilterBuilder {
    FilterBuilder::new()
        .eq_text("device_id", filter.device_id.as_deref())
        .eq_text("metric_type", filter.metric_type.as_deref())
        .at_or_after("timestamp", filter.start)
        .at_or_before("timestamp", filter.end)
}
