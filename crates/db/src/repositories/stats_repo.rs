//! Aggregate queries backing the dashboard summary.

use std::collections::BTreeMap;

use sqlx::PgPool;

use crate::filter::FilterBuilder;
use crate::models::stats::{KeyCount, StatsSummary};

/// Provides read-only aggregate queries across all three tables.
pub struct StatsRepo;

impl StatsRepo {
    /// Build the dashboard summary.
    ///
    /// `device_id` narrows the reading and anomaly aggregates; device counts
    /// are always global.
    pub async fn summary(
        pool: &PgPool,
        device_id: Option<&str>,
    ) -> Result<StatsSummary, sqlx::Error> {
        let total_metrics =
            count(pool, "health_metrics", FilterBuilder::new().eq_text("device_id", device_id))
                .await?;
        let total_devices = count(pool, "devices", FilterBuilder::new()).await?;
        let active_devices =
            count(pool, "devices", FilterBuilder::new().raw("status = 'active'")).await?;
        let unresolved_anomalies = count(
            pool,
            "anomalies",
            FilterBuilder::new()
                .raw("resolved = FALSE")
                .eq_text("device_id", device_id),
        )
        .await?;
        let recent_activity_24h = count(
            pool,
            "health_metrics",
            FilterBuilder::new()
                .raw("timestamp >= NOW() - INTERVAL '24 hours'")
                .eq_text("device_id", device_id),
        )
        .await?;

        let anomalies_by_severity = group_count(
            pool,
            "anomalies",
            "severity",
            FilterBuilder::new().eq_text("device_id", device_id),
        )
        .await?;
        let metrics_by_type = group_count(
            pool,
            "health_metrics",
            "metric_type",
            FilterBuilder::new().eq_text("device_id", device_id),
        )
        .await?;

        Ok(StatsSummary {
            total_metrics,
            total_devices,
            active_devices,
            unresolved_anomalies,
            recent_activity_24h,
            anomalies_by_severity,
            metrics_by_type,
        })
    }
}

async fn count(pool: &PgPool, table: &str, filter: FilterBuilder) -> Result<i64, sqlx::Error> {
    let query = format!("SELECT COUNT(*)::BIGINT FROM {table} {}", filter.where_clause());
    filter
        .bind_scalar(sqlx::query_scalar::<_, i64>(&query))
        .fetch_one(pool)
        .await
}

async fn group_count(
    pool: &PgPool,
    table: &str,
    column: &str,
    filter: FilterBuilder,
) -> Result<BTreeMap<String, i64>, sqlx::Error> {
    let query = format!(
        "SELECT {column} AS key, COUNT(*)::BIGINT AS count FROM {table} {} GROUP BY {column}",
        filter.where_clause()
    );
    let rows = filter
        .bind_as(sqlx::query_as::<_, KeyCount>(&query))
        .fetch_all(pool)
        .await?;
    Ok(rows.into_iter().map(|r| (r.key, r.count)).collect())
}
