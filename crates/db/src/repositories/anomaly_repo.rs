//! Repository for the `anomalies` table.

use sqlx::PgPool;
use vitals_core::types::DbId;

use crate::filter::FilterBuilder;
use crate::models::anomaly::{Anomaly, AnomalyFilter, CreateAnomaly};

/// Column list for `anomalies` SELECT queries.
const COLUMNS: &str = "\
    id, device_id, metric_type, detected_at, value, \
    threshold_min, threshold_max, severity, resolved";

/// Provides query operations for anomalies.
pub struct AnomalyRepo;

impl AnomalyRepo {
    pub async fn insert(pool: &PgPool, input: &CreateAnomaly) -> Result<Anomaly, sqlx::Error> {
        let query = format!(
            "INSERT INTO anomalies \
                (device_id, metric_type, value, threshold_min, threshold_max, severity) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Anomaly>(&query)
            .bind(&input.device_id)
            .bind(&input.metric_type)
            .bind(input.value)
            .bind(input.threshold_min)
            .bind(input.threshold_max)
            .bind(&input.severity)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Anomaly>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM anomalies WHERE id = $1");
        sqlx::query_as::<_, Anomaly>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Overwrite the `resolved` flag. Returns `None` if the anomaly does not exist.
    pub async fn set_resolved(
        pool: &PgPool,
        id: DbId,
        resolved: bool,
    ) -> Result<Option<Anomaly>, sqlx::Error> {
        let query = format!("UPDATE anomalies SET resolved = $2 WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Anomaly>(&query)
            .bind(id)
            .bind(resolved)
            .fetch_optional(pool)
            .await
    }

    /// List anomalies matching `filter`, most recently detected first.
    pub async fn list(
        pool: &PgPool,
        filter: &AnomalyFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Anomaly>, sqlx::Error> {
        let predicate = build_filter(filter);
        let limit_idx = predicate.next_param();
        let query = format!(
            "SELECT {COLUMNS} FROM anomalies {} \
             ORDER BY detected_at DESC, id DESC \
             LIMIT ${limit_idx} OFFSET ${}",
            predicate.where_clause(),
            limit_idx + 1
        );
        predicate
            .bind_as(sqlx::query_as::<_, Anomaly>(&query))
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    pub async fn count(pool: &PgPool, filter: &AnomalyFilter) -> Result<i64, sqlx::Error> {
        let predicate = build_filter(filter);
        let query = format!(
            "SELECT COUNT(*)::BIGINT FROM anomalies {}",
            predicate.where_clause()
        );
        predicate
            .bind_scalar(sqlx::query_scalar::<_, i64>(&query))
            .fetch_one(pool)
            .await
    }
}

fn build_filter(filter: &AnomalyFilter) -> FilterBuilder {
    FilterBuilder::new()
        .eq_text("device_id", filter.device_id.as_deref())
        .eq_text("metric_type", filter.metric_type.as_deref())
        .eq_text("severity", filter.severity.as_deref())
        .eq_bool("resolved", filter.resolved)
        .at_or_after("detected_at", filter.start)
        .at_or_before("detected_at", filter.end)
}
