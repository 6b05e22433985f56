//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod anomaly_repo;
pub mod device_repo;
pub mod metric_repo;
pub mod stats_repo;

pub use anomaly_repo::AnomalyRepo;
pub use device_repo::DeviceRepo;
pub use metric_repo::MetricRepo;
pub use stats_repo::StatsRepo;
