//! Persistence seam for the ingestion pipeline.
//!
//! The pipeline only needs three writes. Keeping them behind a trait lets
//! it run against Postgres in production and an in-memory store in tests.

use std::future::Future;

use sqlx::PgPool;

use crate::models::anomaly::{Anomaly, CreateAnomaly};
use crate::models::device::Device;
use crate::models::metric::{CreateHealthMetric, HealthMetric};
use crate::repositories::{AnomalyRepo, DeviceRepo, MetricRepo};

/// Writes performed while ingesting a reading.
pub trait IngestStore: Send + Sync {
    /// Persist a validated reading.
    fn insert_metric(
        &self,
        input: &CreateHealthMetric,
    ) -> impl Future<Output = Result<HealthMetric, sqlx::Error>> + Send;

    /// Create the device or refresh its `last_seen` / `status`.
    fn touch_device(
        &self,
        device_id: &str,
    ) -> impl Future<Output = Result<Device, sqlx::Error>> + Send;

    /// Persist an anomaly raised by the evaluator.
    fn insert_anomaly(
        &self,
        input: &CreateAnomaly,
    ) -> impl Future<Output = Result<Anomaly, sqlx::Error>> + Send;
}

impl IngestStore for PgPool {
    async fn insert_metric(&self, input: &CreateHealthMetric) -> Result<HealthMetric, sqlx::Error> {
        MetricRepo::insert(self, input).await
    }

    async fn touch_device(&self, device_id: &str) -> Result<Device, sqlx::Error> {
        DeviceRepo::touch(self, device_id).await
    }

    async fn insert_anomaly(&self, input: &CreateAnomaly) -> Result<Anomaly, sqlx::Error> {
        AnomalyRepo::insert(self, input).await
    }
}
