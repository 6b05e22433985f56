//! Row models and DTOs, one module per table.

pub mod anomaly;
pub mod device;
pub mod metric;
pub mod stats;
