pub mod anomalies;
pub mod devices;
pub mod ingest;
pub mod metrics;
pub mod stats;
